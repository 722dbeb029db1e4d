use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::position::Position;

/// Minimum number of points in a linear ring, including the closing point.
pub const MIN_RING_POINTS: usize = 4;

/// Closed sequence of points bounding a polygon or a hole in it.
///
/// The first and the last points of a ring are always equal, and a ring always has at least
/// [`MIN_RING_POINTS`] points. Winding order is kept exactly as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<P>",
    into = "Vec<P>",
    bound(
        serialize = "P: Serialize + Clone",
        deserialize = "P: Deserialize<'de> + PartialEq + Display"
    )
)]
pub struct LinearRing<P = Position> {
    points: Vec<P>,
}

impl<P: PartialEq + Display> LinearRing<P> {
    /// Creates a new ring from the points, that must already be closed.
    ///
    /// Fails with [`GeometryError::UnclosedRing`] if the first and the last points differ and with
    /// [`GeometryError::DegenerateRing`] if there are fewer than 4 points.
    pub fn new(points: Vec<P>) -> Result<Self, GeometryError> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(GeometryError::DegenerateRing { len: 0 });
        };

        if first != last {
            return Err(GeometryError::UnclosedRing {
                first: first.to_string(),
                last: last.to_string(),
            });
        }

        Self::check_len(points)
    }

    fn check_len(points: Vec<P>) -> Result<Self, GeometryError> {
        if points.len() < MIN_RING_POINTS {
            return Err(GeometryError::DegenerateRing { len: points.len() });
        }

        Ok(Self { points })
    }
}

impl<P: PartialEq + Display + Clone> LinearRing<P> {
    /// Creates a new ring, appending a copy of the first point if the points are not closed.
    ///
    /// Closing is done before the length check, so three distinct points make a valid ring.
    pub fn auto_closed(mut points: Vec<P>) -> Result<Self, GeometryError> {
        let Some(first) = points.first().cloned() else {
            return Err(GeometryError::DegenerateRing { len: 0 });
        };

        if points.last() != Some(&first) {
            points.push(first);
        }

        Self::check_len(points)
    }
}

impl<P> LinearRing<P> {
    /// All points of the ring including the closing one.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Consumes the ring returning its points.
    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P> std::ops::Deref for LinearRing<P> {
    type Target = [P];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<P: PartialEq + Display> TryFrom<Vec<P>> for LinearRing<P> {
    type Error = GeometryError;

    fn try_from(value: Vec<P>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<P> From<LinearRing<P>> for Vec<P> {
    fn from(value: LinearRing<P>) -> Self {
        value.points
    }
}
