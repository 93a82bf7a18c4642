use nalgebra::{Matrix3, Vector3};

/// Right-handed rotation about the Y axis, angle in degrees.
pub fn rotation_y(theta_deg: f64) -> Matrix3<f64> {
    let (sin, cos) = theta_deg.to_radians().sin_cos();
    Matrix3::new(
        cos, 0.0, sin, //
        0.0, 1.0, 0.0, //
        -sin, 0.0, cos,
    )
}

/// Right-handed rotation about the Z axis, angle in degrees.
pub fn rotation_z(theta_deg: f64) -> Matrix3<f64> {
    let (sin, cos) = theta_deg.to_radians().sin_cos();
    Matrix3::new(
        cos, -sin, 0.0, //
        sin, cos, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Rotation matrix relating an observer's local North-East-Down frame to
/// ECEF: Rz(lon) * Ry(-lat) * Ry(-90). The Ry(-90) aligns the reference
/// axis with the NED "down" convention before tilting by latitude and
/// swinging by longitude; the factor order is load-bearing. Its transpose
/// carries an ECEF-expressed vector into NED components.
pub fn ned_rotation_matrix(lat_deg: f64, lon_deg: f64) -> Matrix3<f64> {
    rotation_z(lon_deg) * rotation_y(-lat_deg) * rotation_y(-90.0)
}

/// Apply a rotation to a vector (matrix-vector product).
pub fn apply_rotation(rotation: &Matrix3<f64>, vector: &Vector3<f64>) -> Vector3<f64> {
    rotation * vector
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LATLON: [(f64, f64); 5] = [
        (0.0, 0.0),
        (25.0, -80.0),
        (51.6, 120.3),
        (-33.9, 18.4),
        (89.9, -179.9),
    ];

    fn max_abs_diff(a: &Matrix3<f64>, b: &Matrix3<f64>) -> f64 {
        (a - b).abs().max()
    }

    #[test]
    fn test_elemental_rotations_at_90_degrees() {
        // Ry(90): +Z axis goes to +X
        let v = apply_rotation(&rotation_y(90.0), &Vector3::z());
        assert!((v.x - 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);

        // Rz(90): +X axis goes to +Y
        let v = apply_rotation(&rotation_z(90.0), &Vector3::x());
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_ned_matrix_is_orthonormal() {
        for &(lat, lon) in &SAMPLE_LATLON {
            let r = ned_rotation_matrix(lat, lon);
            let identity = Matrix3::identity();
            assert!(
                max_abs_diff(&(r * r.transpose()), &identity) < 1e-12,
                "R * R^T != I at ({lat}, {lon})"
            );
            assert!(
                (r.determinant() - 1.0).abs() < 1e-12,
                "det != 1 at ({lat}, {lon})"
            );
        }
    }

    #[test]
    fn test_rotation_round_trip() {
        let v = Vector3::new(37_031.5, -328_988.4, 255_279.4);
        for &(lat, lon) in &SAMPLE_LATLON {
            let r = ned_rotation_matrix(lat, lon);
            let round_trip = apply_rotation(&r.transpose(), &apply_rotation(&r, &v));
            assert!((round_trip - v).norm() < 1e-6, "round trip at ({lat}, {lon})");
        }
    }

    #[test]
    fn test_ned_axes_at_equator_prime_meridian() {
        // At (0, 0) the ECEF axes line up with the local frame directly:
        // +Z is north, +Y is east, +X points up (so down is -X).
        let r_t = ned_rotation_matrix(0.0, 0.0).transpose();

        let north = apply_rotation(&r_t, &Vector3::z());
        assert!((north - Vector3::x()).norm() < 1e-12);

        let east = apply_rotation(&r_t, &Vector3::y());
        assert!((east - Vector3::y()).norm() < 1e-12);

        let up = apply_rotation(&r_t, &Vector3::x());
        assert!((up - (-Vector3::z())).norm() < 1e-12);
    }

    #[test]
    fn test_ned_axes_at_north_pole() {
        // At the pole, radially outward (+Z in ECEF) is straight up.
        let r_t = ned_rotation_matrix(90.0, 0.0).transpose();
        let up = apply_rotation(&r_t, &Vector3::z());
        assert!((up - (-Vector3::z())).norm() < 1e-12);
    }
}
