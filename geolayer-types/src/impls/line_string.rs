use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::position::Position;

/// Minimum number of points in a line string.
pub const MIN_LINE_POINTS: usize = 2;

/// Open sequence of at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<P>",
    into = "Vec<P>",
    bound(serialize = "P: Serialize + Clone", deserialize = "P: Deserialize<'de>")
)]
pub struct LineString<P = Position> {
    points: Vec<P>,
}

impl<P> LineString<P> {
    /// Creates a new line string.
    ///
    /// Fails with [`GeometryError::DegenerateLine`] if fewer than two points are given.
    pub fn new(points: Vec<P>) -> Result<Self, GeometryError> {
        if points.len() < MIN_LINE_POINTS {
            return Err(GeometryError::DegenerateLine { len: points.len() });
        }

        Ok(Self { points })
    }

    /// Points of the line.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Consumes the line returning its points.
    pub fn into_points(self) -> Vec<P> {
        self.points
    }
}

impl<P> std::ops::Deref for LineString<P> {
    type Target = [P];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<P> TryFrom<Vec<P>> for LineString<P> {
    type Error = GeometryError;

    fn try_from(value: Vec<P>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<P> From<LineString<P>> for Vec<P> {
    fn from(value: LineString<P>) -> Self {
        value.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lonlat;
    use assert_matches::assert_matches;

    #[test]
    fn requires_two_points() {
        assert_matches!(
            LineString::<Position>::new(vec![]),
            Err(GeometryError::DegenerateLine { len: 0 })
        );
        assert_matches!(
            LineString::new(vec![lonlat!(1.0, 1.0)]),
            Err(GeometryError::DegenerateLine { len: 1 })
        );

        let line = LineString::new(vec![lonlat!(1.0, 1.0), lonlat!(2.0, 2.0)]).unwrap();
        assert_eq!(line.len(), 2);
        assert_eq!(line.first(), Some(&lonlat!(1.0, 1.0)));
    }
}
