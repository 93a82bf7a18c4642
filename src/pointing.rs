use nalgebra::Vector3;
use thiserror::Error;

use crate::frame;
use crate::geodetic::GeodeticPosition;

#[derive(Debug, Error, PartialEq)]
pub enum PointingError {
    #[error("observer and satellite positions coincide; the relative vector is zero and has no direction")]
    DegenerateVector,
}

/// Pointing direction expressed as antenna-ready angles.
#[derive(Debug, Clone, Copy)]
pub struct LookAngles {
    pub azimuth: f64,   // degrees clockwise from north, [0, 360)
    pub elevation: f64, // degrees above the horizon
    pub range_km: f64,
}

/// Satellite position relative to the observer, both in ECEF (meters).
pub fn translate(satellite_ecef: &Vector3<f64>, observer_ecef: &Vector3<f64>) -> Vector3<f64> {
    satellite_ecef - observer_ecef
}

/// Express an ECEF-frame relative vector in the observer's NED frame.
/// The basis-change matrix maps NED to ECEF, so its transpose is applied.
pub fn rotate_to_ned(relative_ecef: &Vector3<f64>, lat_deg: f64, lon_deg: f64) -> Vector3<f64> {
    let rotation = frame::ned_rotation_matrix(lat_deg, lon_deg);
    frame::apply_rotation(&rotation.transpose(), relative_ecef)
}

pub fn normalize(vector: &Vector3<f64>) -> Result<Vector3<f64>, PointingError> {
    let norm = vector.norm();
    if norm == 0.0 {
        return Err(PointingError::DegenerateVector);
    }
    Ok(vector / norm)
}

/// Unit vector in the observer's NED frame pointing at the satellite.
pub fn direction(
    observer: &GeodeticPosition,
    satellite: &GeodeticPosition,
) -> Result<Vector3<f64>, PointingError> {
    let relative = translate(&satellite.to_ecef(), &observer.to_ecef());
    let ned = rotate_to_ned(&relative, observer.latitude(), observer.longitude());
    normalize(&ned)
}

/// Azimuth, elevation, and range from an unnormalized NED relative vector.
pub fn look_angles(ned_relative: &Vector3<f64>) -> Result<LookAngles, PointingError> {
    let range = ned_relative.norm();
    if range == 0.0 {
        return Err(PointingError::DegenerateVector);
    }

    let azimuth = ned_relative.y.atan2(ned_relative.x).to_degrees();
    let azimuth = if azimuth < 0.0 {
        azimuth + 360.0
    } else {
        azimuth
    };

    let elevation = (-ned_relative.z / range).asin().to_degrees();

    Ok(LookAngles {
        azimuth,
        elevation,
        range_km: range / 1000.0,
    })
}
