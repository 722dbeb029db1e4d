use serde::{Deserialize, Serialize};

use crate::position::Position;

/// A set of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint<P = Position>(Vec<P>);

impl<P> MultiPoint<P> {
    /// Points of the set.
    pub fn points(&self) -> &[P] {
        &self.0
    }
}

impl<P> From<Vec<P>> for MultiPoint<P> {
    fn from(value: Vec<P>) -> Self {
        Self(value)
    }
}
