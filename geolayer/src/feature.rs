//! Typed GeoJSON documents produced by the [`GeometryBuilder`](crate::builder::GeometryBuilder).

use geolayer_types::Geom;

use crate::json::{JsonObject, JsonValue};

/// GeoJSON document with typed and checked geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    /// Bare geometry object.
    Geometry(Geom),
    /// Single feature.
    Feature(Feature),
    /// Collection of features.
    FeatureCollection(FeatureCollection),
}

/// Geometry with its properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Geometry of the feature. `None` for features with `null` geometry.
    pub geometry: Option<Geom>,
    /// Properties of the feature.
    pub properties: JsonObject,
    /// Identifier of the feature, as it was given in the document.
    pub id: Option<JsonValue>,
}

/// Ordered list of features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    /// Features in document order.
    pub features: Vec<Feature>,
}

impl From<Geom> for GeoJson {
    fn from(value: Geom) -> Self {
        Self::Geometry(value)
    }
}

impl From<Feature> for GeoJson {
    fn from(value: Feature) -> Self {
        Self::Feature(value)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(value: FeatureCollection) -> Self {
        Self::FeatureCollection(value)
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}
