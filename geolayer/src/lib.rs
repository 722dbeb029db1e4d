//! Geolayer turns GeoJSON text into styled geometry layers ready to be drawn by a map engine.
//!
//! # Quick start
//!
//! ```
//! use geolayer::{Color, Style};
//! use geolayer::pipeline::GeoJsonParser;
//!
//! let layer = GeoJsonParser::new()
//!     .with_style(Style::default().with_stroke_color(Color::GREEN).with_fill_color(Color::ORANGE))
//!     .parse(r#"{"type": "Polygon", "coordinates": [[[30, 10], [40, 40], [20, 40], [10, 20], [30, 10]]]}"#)?;
//!
//! assert_eq!(layer.features().len(), 1);
//! # Ok::<(), geolayer::error::GeoJsonError>(())
//! ```
//!
//! # Processing stages
//!
//! Parsing is done in four stages, each of which can be used separately:
//!
//! * [`json`] parses text into a generic [`JsonValue`](json::JsonValue) tree, reporting
//!   [`SyntaxError`](error::SyntaxError) for malformed text;
//! * [`schema`] checks that the tree has the structure of a GeoJSON object, reporting
//!   [`SchemaError`](error::SchemaError) with the path to the offending value;
//! * [`builder`] creates typed geometries from [`geolayer_types`], checking coordinate ranges and
//!   ring closure and reporting [`GeometryError`](geolayer_types::GeometryError);
//! * [`layer`] assembles the geometries and a [`Style`] into a [`GeoJsonLayer`].
//!
//! [`GeoJsonParser`](pipeline::GeoJsonParser) runs all of them and wraps the stage errors into
//! [`GeoJsonError`](error::GeoJsonError).
//!
//! The produced layer can be given to anything implementing [`MapSurface`](surface::MapSurface).
//! The crate does no rendering, I/O or logging setup of its own. Diagnostic messages are emitted
//! through the `log` facade.

pub mod builder;
mod color;
pub mod error;
pub mod feature;
pub mod json;
pub mod layer;
pub mod pipeline;
pub mod schema;
pub mod style;
pub mod surface;

pub use color::{Color, ColorParseError};
pub use layer::{GeoJsonLayer, LayerFeature};
pub use pipeline::parse;
pub use style::Style;

// Reexport geolayer_types
pub use geolayer_types;
