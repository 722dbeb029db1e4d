use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::impls::linear_ring::LinearRing;
use crate::position::Position;

/// Polygon geometry. Polygon consists of one exterior ring, and zero or more interior rings.
///
/// Interior rings represent *holes* in the polygon. Rings are kept in the order they were given;
/// their winding is not checked or changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize + Clone",
    deserialize = "P: Deserialize<'de> + PartialEq + std::fmt::Display"
))]
pub struct Polygon<P = Position> {
    exterior: LinearRing<P>,
    interiors: Vec<LinearRing<P>>,
}

impl<P> Polygon<P> {
    /// Creates a new polygon.
    pub fn new(exterior: LinearRing<P>, interiors: Vec<LinearRing<P>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Creates a polygon from a list of rings, the first one being the exterior ring.
    ///
    /// Fails with [`GeometryError::MissingExteriorRing`] if the list is empty.
    pub fn from_rings(rings: Vec<LinearRing<P>>) -> Result<Self, GeometryError> {
        let mut rings = rings.into_iter();
        let exterior = rings.next().ok_or(GeometryError::MissingExteriorRing)?;

        Ok(Self {
            exterior,
            interiors: rings.collect(),
        })
    }

    /// Exterior ring of the polygon.
    pub fn exterior(&self) -> &LinearRing<P> {
        &self.exterior
    }

    /// Interior rings (holes) of the polygon.
    pub fn interiors(&self) -> &[LinearRing<P>] {
        &self.interiors
    }

    /// Iterates over all rings of the polygon starting with the exterior one.
    pub fn iter_rings(&self) -> impl Iterator<Item = &'_ LinearRing<P>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

impl<P> From<LinearRing<P>> for Polygon<P> {
    fn from(value: LinearRing<P>) -> Self {
        Self {
            exterior: value,
            interiors: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lonlat;
    use assert_matches::assert_matches;

    fn ring(offset: f64) -> LinearRing {
        LinearRing::auto_closed(vec![
            lonlat!(offset, offset),
            lonlat!(offset + 1.0, offset),
            lonlat!(offset + 1.0, offset + 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn from_rings() {
        assert_matches!(
            Polygon::<Position>::from_rings(vec![]),
            Err(GeometryError::MissingExteriorRing)
        );

        let polygon = Polygon::from_rings(vec![ring(0.0), ring(0.2), ring(0.4)]).unwrap();
        assert_eq!(polygon.exterior(), &ring(0.0));
        assert_eq!(polygon.interiors().len(), 2);
        assert_eq!(polygon.iter_rings().nth(2), Some(&ring(0.4)));
    }
}
