use serde::{Deserialize, Serialize};

use crate::impls::line_string::LineString;
use crate::position::Position;

/// A set of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize + Clone",
    deserialize = "P: Deserialize<'de>"
))]
pub struct MultiLineString<P = Position>(Vec<LineString<P>>);

impl<P> MultiLineString<P> {
    /// Lines of the set.
    pub fn lines(&self) -> &[LineString<P>] {
        &self.0
    }
}

impl<P> From<Vec<LineString<P>>> for MultiLineString<P> {
    fn from(value: Vec<LineString<P>>) -> Self {
        Self(value)
    }
}
