//! Renderable layer assembled from a typed GeoJSON document.

use geolayer_types::{BoundingRect, Geom, ShapeKind};

use crate::feature::{Feature, GeoJson};
use crate::json::{JsonObject, JsonValue};
use crate::Style;

/// Single renderable entry of a [`GeoJsonLayer`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFeature {
    geometry: Geom,
    properties: JsonObject,
    id: Option<JsonValue>,
}

impl LayerFeature {
    /// Creates a new entry.
    pub fn new(geometry: Geom, properties: JsonObject, id: Option<JsonValue>) -> Self {
        Self {
            geometry,
            properties,
            id,
        }
    }

    /// Geometry of the entry.
    pub fn geometry(&self) -> &Geom {
        &self.geometry
    }

    /// Properties of the source feature. Empty for bare geometries.
    pub fn properties(&self) -> &JsonObject {
        &self.properties
    }

    /// Identifier of the source feature.
    pub fn id(&self) -> Option<&JsonValue> {
        self.id.as_ref()
    }

    /// Kind of the shape drawn for the entry, see [`Geom::shape_kind`].
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        self.geometry.shape_kind()
    }
}

/// Ordered set of geometries drawn with one [`Style`].
///
/// Points, lines and polygons can be hidden separately. Hidden entries stay in the layer and are
/// only skipped by [`GeoJsonLayer::visible_features`]. Geometry collections mixing different
/// kinds of shapes are never hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonLayer {
    features: Vec<LayerFeature>,
    style: Style,
    points_visible: bool,
    lines_visible: bool,
    polygons_visible: bool,
}

impl GeoJsonLayer {
    /// Creates a layer with all kinds of shapes visible.
    pub fn new(features: Vec<LayerFeature>, style: Style) -> Self {
        Self {
            features,
            style,
            points_visible: true,
            lines_visible: true,
            polygons_visible: true,
        }
    }

    /// All entries in document order.
    pub fn features(&self) -> &[LayerFeature] {
        &self.features
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no entries.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Style of the layer.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Mutable style of the layer.
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Replaces the style of the layer.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Shows or hides point geometries.
    pub fn set_points_visible(&mut self, visible: bool) {
        self.points_visible = visible;
    }

    /// Shows or hides line geometries.
    pub fn set_lines_visible(&mut self, visible: bool) {
        self.lines_visible = visible;
    }

    /// Shows or hides polygon geometries.
    pub fn set_polygons_visible(&mut self, visible: bool) {
        self.polygons_visible = visible;
    }

    /// Whether entries of the given kind are drawn.
    pub fn is_visible(&self, kind: ShapeKind) -> bool {
        match kind {
            ShapeKind::Point => self.points_visible,
            ShapeKind::Line => self.lines_visible,
            ShapeKind::Polygon => self.polygons_visible,
        }
    }

    /// Entries that are not hidden, in document order.
    pub fn visible_features(&self) -> impl Iterator<Item = &'_ LayerFeature> + '_ {
        self.features
            .iter()
            .filter(|feature| feature.shape_kind().map_or(true, |kind| self.is_visible(kind)))
    }

    /// Removes all point entries, returning them.
    pub fn remove_points(&mut self) -> Vec<LayerFeature> {
        self.remove_kind(ShapeKind::Point)
    }

    /// Removes all line entries, returning them.
    pub fn remove_lines(&mut self) -> Vec<LayerFeature> {
        self.remove_kind(ShapeKind::Line)
    }

    /// Removes all polygon entries, returning them.
    pub fn remove_polygons(&mut self) -> Vec<LayerFeature> {
        self.remove_kind(ShapeKind::Polygon)
    }

    fn remove_kind(&mut self, kind: ShapeKind) -> Vec<LayerFeature> {
        let (removed, kept) = std::mem::take(&mut self.features)
            .into_iter()
            .partition(|feature| feature.shape_kind() == Some(kind));
        self.features = kept;

        removed
    }

    /// Bounding rectangle of all entries, `None` if the layer has no positions.
    pub fn bounding_rect(&self) -> Option<BoundingRect> {
        BoundingRect::merge_all(
            self.features
                .iter()
                .filter_map(|feature| feature.geometry.bounding_rect()),
        )
    }
}

/// Assembles a layer from the document. Default style is used if `style` is `None`.
///
/// A bare geometry becomes a single entry with empty properties. Features without geometry are
/// skipped.
pub fn assemble(geojson: GeoJson, style: Option<Style>) -> GeoJsonLayer {
    let features = match geojson {
        GeoJson::Geometry(geometry) => vec![LayerFeature::new(geometry, JsonObject::new(), None)],
        GeoJson::Feature(feature) => layer_feature(feature).into_iter().collect(),
        GeoJson::FeatureCollection(collection) => {
            collection.into_iter().filter_map(layer_feature).collect()
        }
    };

    GeoJsonLayer::new(features, style.unwrap_or_default())
}

fn layer_feature(feature: Feature) -> Option<LayerFeature> {
    let Some(geometry) = feature.geometry else {
        log::debug!("Skipping feature {:?} without geometry", feature.id);
        return None;
    };

    Some(LayerFeature::new(geometry, feature.properties, feature.id))
}
