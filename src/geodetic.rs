use nalgebra::Vector3;
use thiserror::Error;

/// Mean Earth radius in meters, spherical Earth model (no oblateness).
pub const EARTH_RADIUS: f64 = 6.3781e6;

#[derive(Debug, Error, PartialEq)]
pub enum GeodeticError {
    #[error("latitude {0}° is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0}° is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// A geodetic fix: latitude/longitude in degrees, elevation in meters
/// above the spherical reference surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

impl GeodeticPosition {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self, GeodeticError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeodeticError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeodeticError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Convert to Earth-centered Earth-fixed Cartesian coordinates (meters).
    pub fn to_ecef(&self) -> Vector3<f64> {
        let lat_rad = self.latitude.to_radians();
        let lon_rad = self.longitude.to_radians();
        let dist = EARTH_RADIUS + self.elevation;

        let x = dist * lat_rad.cos() * lon_rad.cos();
        let y = dist * lat_rad.cos() * lon_rad.sin();
        let z = dist * lat_rad.sin();

        Vector3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_prime_meridian() {
        let pos = GeodeticPosition::new(0.0, 0.0, 0.0).unwrap();
        let ecef = pos.to_ecef();
        assert!((ecef.x - EARTH_RADIUS).abs() < 1e-6);
        assert!(ecef.y.abs() < 1e-6);
        assert!(ecef.z.abs() < 1e-6);
    }

    #[test]
    fn test_north_pole_maps_to_positive_z() {
        let pos = GeodeticPosition::new(90.0, 0.0, 0.0).unwrap();
        let ecef = pos.to_ecef();
        assert!(ecef.x.abs() < 1e-6);
        assert!(ecef.y.abs() < 1e-6);
        assert!((ecef.z - EARTH_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_east_longitude_maps_to_positive_y() {
        let pos = GeodeticPosition::new(0.0, 90.0, 0.0).unwrap();
        let ecef = pos.to_ecef();
        assert!(ecef.x.abs() < 1e-6);
        assert!((ecef.y - EARTH_RADIUS).abs() < 1e-6);
        assert!(ecef.z.abs() < 1e-6);
    }

    #[test]
    fn test_magnitude_is_radius_plus_elevation() {
        for &(lat, lon, elev) in &[
            (25.0, -80.0, 0.0),
            (51.6, 120.3, 1250.0),
            (-33.9, 18.4, 42.0),
            (25.7743, -80.1937, 408_000.0),
        ] {
            let ecef = GeodeticPosition::new(lat, lon, elev).unwrap().to_ecef();
            let expected = EARTH_RADIUS + elev;
            assert!(
                (ecef.norm() - expected).abs() < 1e-6,
                "magnitude mismatch at ({lat}, {lon}, {elev})"
            );
        }
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert_eq!(
            GeodeticPosition::new(90.5, 0.0, 0.0),
            Err(GeodeticError::InvalidLatitude(90.5))
        );
        assert_eq!(
            GeodeticPosition::new(-91.0, 0.0, 0.0),
            Err(GeodeticError::InvalidLatitude(-91.0))
        );
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert_eq!(
            GeodeticPosition::new(0.0, 180.1, 0.0),
            Err(GeodeticError::InvalidLongitude(180.1))
        );
        assert_eq!(
            GeodeticPosition::new(0.0, -200.0, 0.0),
            Err(GeodeticError::InvalidLongitude(-200.0))
        );
    }
}
