use serde::{Deserialize, Serialize};

use crate::impls::polygon::Polygon;
use crate::position::Position;

/// A set of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize + Clone",
    deserialize = "P: Deserialize<'de> + PartialEq + std::fmt::Display"
))]
pub struct MultiPolygon<P = Position> {
    parts: Vec<Polygon<P>>,
}

impl<P> From<Vec<Polygon<P>>> for MultiPolygon<P> {
    fn from(parts: Vec<Polygon<P>>) -> Self {
        Self { parts }
    }
}

impl<P> MultiPolygon<P> {
    /// Returns reference to the inner polygons.
    pub fn parts(&self) -> &[Polygon<P>] {
        &self.parts
    }
}
