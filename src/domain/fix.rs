//! Synthetic location fixes and their validation rules.
//!
//! A [`FixRequest`] is the caller-supplied input: coordinates plus optional
//! motion attributes. Resolving a request applies defaults, normalizes the
//! heading, validates ranges, and stamps the result into a [`LocationFix`]
//! ready to be pushed to the platform.

use serde::Deserialize;
use std::time::Duration;

/// Horizontal accuracy applied when the caller omits one, in meters.
pub const DEFAULT_ACCURACY_METERS: f64 = 3.0;

/// Error returned when a fix request carries an invalid value.
///
/// Omitted fields are never an error (they take the documented defaults);
/// only present-but-invalid values are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixError {
    /// Latitude is non-finite or outside [-90, 90] degrees
    LatitudeOutOfRange(f64),
    /// Longitude is non-finite or outside [-180, 180] degrees
    LongitudeOutOfRange(f64),
    /// Accuracy is non-finite or not strictly positive
    NonPositiveAccuracy(f64),
    /// Speed is non-finite or negative
    NegativeSpeed(f64),
    /// Altitude is non-finite
    NonFiniteAltitude(f64),
    /// Heading is non-finite
    NonFiniteHeading(f64),
}

impl std::fmt::Display for FixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixError::LatitudeOutOfRange(v) => {
                write!(f, "latitude {} is outside [-90, 90] degrees", v)
            }
            FixError::LongitudeOutOfRange(v) => {
                write!(f, "longitude {} is outside [-180, 180] degrees", v)
            }
            FixError::NonPositiveAccuracy(v) => {
                write!(f, "accuracy {} must be greater than 0 meters", v)
            }
            FixError::NegativeSpeed(v) => {
                write!(f, "speed {} must not be negative", v)
            }
            FixError::NonFiniteAltitude(v) => write!(f, "altitude {} is not finite", v),
            FixError::NonFiniteHeading(v) => write!(f, "heading {} is not finite", v),
        }
    }
}

impl std::error::Error for FixError {}

/// Capture time of a fix: wall clock plus a monotonic elapsed marker.
///
/// Mirrors the pair of timestamps location consumers expect on a sample
/// (absolute time for display, monotonic time for delta computations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixTimestamp {
    /// Milliseconds since the Unix epoch
    pub epoch_millis: u64,
    /// Monotonic elapsed time since an arbitrary fixed origin
    pub elapsed: Duration,
}

/// Caller input for one synthetic sample.
///
/// Only the coordinates are required. Omitted attributes take the defaults
/// documented on each setter when the request is resolved.
///
/// # Example
///
/// ```
/// use mock_location::FixRequest;
///
/// let request = FixRequest::new(37.0, -122.0)
///     .with_accuracy(5.0)
///     .with_speed(10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FixRequest {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Horizontal accuracy in meters; defaults to 3.0
    pub accuracy: Option<f64>,
    /// Altitude in meters; defaults to 0
    pub altitude: Option<f64>,
    /// Heading in degrees, normalized into [0, 360); defaults to 0
    pub heading: Option<f64>,
    /// Ground speed in meters per second; defaults to 0
    pub speed: Option<f64>,
}

impl FixRequest {
    /// Create a request with the given coordinates and all defaults.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            heading: None,
            speed: None,
        }
    }

    /// Set the horizontal accuracy in meters (default: 3.0).
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Set the altitude in meters (default: 0).
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Set the heading in degrees (default: 0).
    ///
    /// Any finite value is accepted and normalized into [0, 360) at
    /// resolution time, so `-90.0` and `270.0` describe the same heading.
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Set the ground speed in meters per second (default: 0).
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Resolve the request into a stamped [`LocationFix`].
    ///
    /// Applies defaults for omitted fields, normalizes the heading, and
    /// validates every value.
    ///
    /// # Errors
    /// Returns [`FixError`] if any supplied value is non-finite or outside
    /// its documented range.
    pub fn resolve(&self, timestamp: FixTimestamp) -> Result<LocationFix, FixError> {
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(FixError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || self.longitude.abs() > 180.0 {
            return Err(FixError::LongitudeOutOfRange(self.longitude));
        }

        let accuracy = self.accuracy.unwrap_or(DEFAULT_ACCURACY_METERS);
        if !accuracy.is_finite() || accuracy <= 0.0 {
            return Err(FixError::NonPositiveAccuracy(accuracy));
        }

        let altitude = self.altitude.unwrap_or(0.0);
        if !altitude.is_finite() {
            return Err(FixError::NonFiniteAltitude(altitude));
        }

        let heading = self.heading.unwrap_or(0.0);
        if !heading.is_finite() {
            return Err(FixError::NonFiniteHeading(heading));
        }

        let speed = self.speed.unwrap_or(0.0);
        if !speed.is_finite() || speed < 0.0 {
            return Err(FixError::NegativeSpeed(speed));
        }

        Ok(LocationFix {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude,
            accuracy,
            heading: normalize_heading(heading),
            speed,
            timestamp,
        })
    }
}

/// One resolved synthetic sample, ready to be pushed to the platform.
///
/// Values are fully defaulted, validated, and stamped; consumers observe
/// this as if it came from a real GPS provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Horizontal accuracy in meters, always > 0
    pub accuracy: f64,
    /// Heading in degrees, always in [0, 360)
    pub heading: f64,
    /// Ground speed in meters per second, always >= 0
    pub speed: f64,
    /// Capture time of this sample
    pub timestamp: FixTimestamp,
}

/// Normalize a heading in degrees into [0, 360).
fn normalize_heading(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}
