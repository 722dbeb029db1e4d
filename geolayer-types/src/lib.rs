//! Typed geometries produced from GeoJSON documents.
//!
//! All types here keep the GeoJSON invariants: positions are within the geographic range, line
//! strings have at least two points and linear rings are closed and have at least four points.
//! The constructors check the invariants and return [`GeometryError`] if they are violated, so an
//! instance of a type always holds valid data.

pub mod bounding_rect;
pub mod error;
pub mod geometry;
pub mod impls;
mod position;

pub use bounding_rect::BoundingRect;
pub use error::GeometryError;
pub use geometry::{AltitudeReference, Geom, GeometryType, ShapeKind};
pub use impls::{LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Polygon};
pub use position::{
    GeoPoint, Position, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
