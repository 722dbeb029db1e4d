use std::fmt::{Display, Formatter};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;
/// Minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// A point on the surface of the Earth given in geographic coordinates.
pub trait GeoPoint {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lon(&self) -> f64;
}

/// A single GeoJSON position: longitude, latitude and optional altitude.
///
/// A `Position` can only be constructed through [`Position::new`] or [`Position::with_altitude`],
/// both of which check that the coordinates are finite and inside the valid geographic range.
/// Out of range values are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    lon: f64,
    lat: f64,
    alt: Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct RawPosition {
    lon: f64,
    lat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<f64>,
}

impl TryFrom<RawPosition> for Position {
    type Error = GeometryError;

    fn try_from(value: RawPosition) -> Result<Self, Self::Error> {
        match value.alt {
            Some(alt) => Self::with_altitude(value.lon, value.lat, alt),
            None => Self::new(value.lon, value.lat),
        }
    }
}

impl From<Position> for RawPosition {
    fn from(value: Position) -> Self {
        Self {
            lon: value.lon,
            lat: value.lat,
            alt: value.alt,
        }
    }
}

impl Position {
    /// Creates a 2d position, checking the coordinate range.
    pub fn new(lon: f64, lat: f64) -> Result<Self, GeometryError> {
        check_range(lon, lat)?;
        Ok(Self {
            lon,
            lat,
            alt: None,
        })
    }

    /// Creates a position with the altitude, checking the coordinate range.
    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> Result<Self, GeometryError> {
        check_range(lon, lat)?;
        Ok(Self {
            lon,
            lat,
            alt: Some(alt),
        })
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Altitude, if the position has one.
    pub fn alt(&self) -> Option<f64> {
        self.alt
    }

    /// Returns a copy of the position without the altitude component.
    pub fn without_altitude(&self) -> Self {
        Self { alt: None, ..*self }
    }
}

fn check_range(lon: f64, lat: f64) -> Result<(), GeometryError> {
    // NaN fails both range checks.
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon)
        || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
    {
        return Err(GeometryError::OutOfRange {
            longitude: lon,
            latitude: lat,
        });
    }

    Ok(())
}

impl GeoPoint for Position {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.alt {
            Some(alt) => write!(f, "[{}, {}, {}]", self.lon, self.lat, alt),
            None => write!(f, "[{}, {}]", self.lon, self.lat),
        }
    }
}

impl AbsDiffEq for Position {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let alt_eq = match (self.alt, other.alt) {
            (Some(a), Some(b)) => a.abs_diff_eq(&b, epsilon),
            (None, None) => true,
            _ => false,
        };

        self.lon.abs_diff_eq(&other.lon, epsilon)
            && self.lat.abs_diff_eq(&other.lat, epsilon)
            && alt_eq
    }
}

/// Creates a new [`Position`] from longitude and latitude values (in degrees).
///
/// Panics if the values are out of range, so it is intended for literals in tests and examples.
///
/// ```
/// use geolayer_types::lonlat;
///
/// let position = lonlat!(30.0, 10.0);
/// assert_eq!(position.lat(), 10.0);
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        match $crate::Position::new($lon, $lat) {
            Ok(position) => position,
            Err(err) => panic!("{err}"),
        }
    };
}
