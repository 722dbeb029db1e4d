//! Conversion of validated GeoJSON into typed geometries.

use geolayer_types::{
    Geom, GeometryError, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon,
    Polygon, Position,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureCollection, GeoJson};
use crate::schema::{RawPosition, ValidatedFeature, ValidatedGeoJson, ValidatedGeometry};

/// Options of the [`GeometryBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuilderOptions {
    /// If set, rings whose first and last positions differ are closed by appending a copy of the
    /// first position instead of being rejected.
    pub auto_close_rings: bool,
}

/// Builds typed geometries from validated GeoJSON, checking the geometry invariants.
///
/// Besides the checks done by the `geolayer_types` constructors, the builder normalizes
/// altitudes: GeoJSON geometry either has altitude in all of its positions or in none of them.
/// If a geometry object mixes 2d and 3d positions, the altitudes are dropped from all positions
/// of that geometry and a warning is logged. Every member of a geometry collection is checked
/// separately.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    options: BuilderOptions,
}

impl GeometryBuilder {
    /// Creates a new builder.
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    /// Options of the builder.
    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Builds a typed GeoJSON document.
    ///
    /// The first invalid value aborts the build; no partial result is returned.
    pub fn build(&self, validated: ValidatedGeoJson) -> Result<GeoJson, GeometryError> {
        let mut state = BuildState::default();

        let geojson = match validated {
            ValidatedGeoJson::Geometry(geometry) => {
                GeoJson::Geometry(self.geometry(&geometry, &mut state)?)
            }
            ValidatedGeoJson::Feature(feature) => {
                GeoJson::Feature(self.feature(feature, &mut state)?)
            }
            ValidatedGeoJson::FeatureCollection(features) => {
                GeoJson::FeatureCollection(FeatureCollection {
                    features: features
                        .into_iter()
                        .map(|feature| self.feature(feature, &mut state))
                        .collect::<Result<_, _>>()?,
                })
            }
        };

        if state.flattened > 0 {
            log::warn!(
                "Altitudes are dropped from {} geometries with positions missing altitude",
                state.flattened
            );
        }

        Ok(geojson)
    }

    /// Builds a single typed geometry.
    pub fn build_geometry(&self, geometry: &ValidatedGeometry) -> Result<Geom, GeometryError> {
        let mut state = BuildState::default();
        let geom = self.geometry(geometry, &mut state)?;

        if state.flattened > 0 {
            log::warn!("Altitudes are dropped from a geometry with positions missing altitude");
        }

        Ok(geom)
    }

    fn feature(
        &self,
        feature: ValidatedFeature,
        state: &mut BuildState,
    ) -> Result<Feature, GeometryError> {
        Ok(Feature {
            geometry: feature
                .geometry
                .map(|geometry| self.geometry(&geometry, state))
                .transpose()?,
            properties: feature.properties,
            id: feature.id,
        })
    }

    fn geometry(
        &self,
        geometry: &ValidatedGeometry,
        state: &mut BuildState,
    ) -> Result<Geom, GeometryError> {
        // Collection members decide on their altitudes separately.
        let flatten = !matches!(geometry, ValidatedGeometry::GeometryCollection(_))
            && has_mixed_altitudes(geometry);
        if flatten {
            state.flattened += 1;
        }

        let converter = Converter {
            flatten,
            auto_close_rings: self.options.auto_close_rings,
        };

        let geom = match geometry {
            ValidatedGeometry::Point(p) => Geom::Point(converter.position(p)?),
            ValidatedGeometry::MultiPoint(points) => {
                Geom::MultiPoint(MultiPoint::from(converter.positions(points)?))
            }
            ValidatedGeometry::LineString(points) => {
                Geom::LineString(converter.line_string(points)?)
            }
            ValidatedGeometry::MultiLineString(lines) => Geom::MultiLineString(
                MultiLineString::from(
                    lines
                        .iter()
                        .map(|line| converter.line_string(line))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            ),
            ValidatedGeometry::Polygon(rings) => Geom::Polygon(converter.polygon(rings)?),
            ValidatedGeometry::MultiPolygon(polygons) => Geom::MultiPolygon(MultiPolygon::from(
                polygons
                    .iter()
                    .map(|polygon| converter.polygon(polygon))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            ValidatedGeometry::GeometryCollection(members) => Geom::GeometryCollection(
                members
                    .iter()
                    .map(|member| self.geometry(member, state))
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(geom)
    }
}

#[derive(Default)]
struct BuildState {
    /// Number of geometries whose altitudes were dropped.
    flattened: usize,
}

fn has_mixed_altitudes(geometry: &ValidatedGeometry) -> bool {
    let mut with_altitude = false;
    let mut without_altitude = false;
    for position in geometry.iter_positions() {
        match position.alt {
            Some(_) => with_altitude = true,
            None => without_altitude = true,
        }

        if with_altitude && without_altitude {
            return true;
        }
    }

    false
}

struct Converter {
    flatten: bool,
    auto_close_rings: bool,
}

impl Converter {
    fn position(&self, raw: &RawPosition) -> Result<Position, GeometryError> {
        match raw.alt {
            Some(alt) if !self.flatten => Position::with_altitude(raw.lon, raw.lat, alt),
            _ => Position::new(raw.lon, raw.lat),
        }
    }

    fn positions(&self, raw: &[RawPosition]) -> Result<Vec<Position>, GeometryError> {
        raw.iter().map(|p| self.position(p)).collect()
    }

    fn line_string(&self, raw: &[RawPosition]) -> Result<LineString, GeometryError> {
        LineString::new(self.positions(raw)?)
    }

    fn ring(&self, raw: &[RawPosition]) -> Result<LinearRing, GeometryError> {
        let points = self.positions(raw)?;
        if self.auto_close_rings {
            LinearRing::auto_closed(points)
        } else {
            LinearRing::new(points)
        }
    }

    fn polygon(&self, raw: &[Vec<RawPosition>]) -> Result<Polygon, GeometryError> {
        Polygon::from_rings(
            raw.iter()
                .map(|ring| self.ring(ring))
                .collect::<Result<_, _>>()?,
        )
    }
}
