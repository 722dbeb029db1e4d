//! Error type used by the crate.

use thiserror::Error;

/// Semantic error in otherwise well-formed geometry input.
///
/// These errors are returned when the structure of the input is correct, but the values violate
/// geometry invariants: coordinates outside of the valid range, rings that are not closed, lines
/// with too few positions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Longitude or latitude is outside of the valid range.
    #[error("position ({longitude}, {latitude}) is out of range: longitude must be in [-180, 180] and latitude in [-90, 90]")]
    OutOfRange {
        /// Longitude of the offending position.
        longitude: f64,
        /// Latitude of the offending position.
        latitude: f64,
    },

    /// The first and the last positions of a linear ring are not the same.
    #[error("linear ring is not closed: first position {first} differs from last position {last}")]
    UnclosedRing {
        /// First position of the ring, formatted.
        first: String,
        /// Last position of the ring, formatted.
        last: String,
    },

    /// Linear ring has fewer than 4 positions.
    #[error("linear ring must have at least 4 positions, but has {len}")]
    DegenerateRing {
        /// Number of positions in the ring.
        len: usize,
    },

    /// Line string has fewer than 2 positions.
    #[error("line string must have at least 2 positions, but has {len}")]
    DegenerateLine {
        /// Number of positions in the line.
        len: usize,
    },

    /// Polygon does not have any rings.
    #[error("polygon must have an exterior ring")]
    MissingExteriorRing,
}
