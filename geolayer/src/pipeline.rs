//! Text to layer pipeline. See [`GeoJsonParser`].

use std::str::FromStr;

use crate::builder::{BuilderOptions, GeometryBuilder};
use crate::error::GeoJsonError;
use crate::feature::GeoJson;
use crate::json::{self, ParseOptions};
use crate::layer::{assemble, GeoJsonLayer};
use crate::schema;
use crate::Style;

/// Parses GeoJSON text into a [`GeoJsonLayer`].
///
/// The text goes through four stages: JSON parsing, GeoJSON structure validation, building typed
/// geometries and layer assembly. Each stage has its own error type, and the first error stops
/// the pipeline, so a layer is either built completely or not at all.
///
/// ```
/// use geolayer::{Color, Style};
/// use geolayer::pipeline::GeoJsonParser;
///
/// let layer = GeoJsonParser::new()
///     .with_auto_close_rings(true)
///     .with_style(Style::default().with_fill_color(Color::ORANGE))
///     .parse(r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}"#)?;
///
/// assert_eq!(layer.len(), 1);
/// # Ok::<(), geolayer::error::GeoJsonError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeoJsonParser {
    parse_options: ParseOptions,
    builder_options: BuilderOptions,
    style: Option<Style>,
}

impl GeoJsonParser {
    /// Creates a parser with default options: rings must be closed, nesting depth is limited to
    /// [`json::DEFAULT_MAX_DEPTH`] and the default style is used.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether unclosed rings are closed automatically instead of being rejected.
    pub fn with_auto_close_rings(mut self, auto_close_rings: bool) -> Self {
        self.builder_options.auto_close_rings = auto_close_rings;
        self
    }

    /// Sets the maximum nesting depth of JSON arrays and objects.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.parse_options.max_depth = max_depth;
        self
    }

    /// Sets the style of produced layers.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Replaces all builder options.
    pub fn with_builder_options(mut self, options: BuilderOptions) -> Self {
        self.builder_options = options;
        self
    }

    /// Replaces all JSON parser options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Parses the text into a layer.
    pub fn parse(&self, text: &str) -> Result<GeoJsonLayer, GeoJsonError> {
        let geojson = self.parse_geojson(text)?;
        let layer = assemble(geojson, self.style);
        log::debug!("Assembled layer with {} features", layer.len());

        Ok(layer)
    }

    /// Parses the text into a typed GeoJSON document without assembling a layer.
    pub fn parse_geojson(&self, text: &str) -> Result<GeoJson, GeoJsonError> {
        let value = json::parse_with_options(text, &self.parse_options)?;
        log::debug!("Parsed {} bytes of JSON", text.len());

        let validated = schema::validate(&value)?;
        log::debug!("Validated GeoJSON document");

        let geojson = GeometryBuilder::new(self.builder_options).build(validated)?;
        log::debug!("Built geometries");

        Ok(geojson)
    }
}

/// Parses GeoJSON text into a layer with default options and style.
pub fn parse(text: &str) -> Result<GeoJsonLayer, GeoJsonError> {
    GeoJsonParser::new().parse(text)
}

impl FromStr for GeoJsonLayer {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
