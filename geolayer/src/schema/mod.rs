//! Structural validation of GeoJSON documents.
//!
//! [`validate`] walks a [`JsonValue`] tree and recognizes GeoJSON objects by their `type` member.
//! Only the shape of the document is checked here: coordinate ranges and ring closure are checked
//! later by the [`GeometryBuilder`](crate::builder::GeometryBuilder), so that malformed documents
//! ([`SchemaError`]) and invalid values ([`GeometryError`](geolayer_types::GeometryError)) are
//! reported as different errors.

use std::str::FromStr;

use geolayer_types::GeometryType;

use crate::error::SchemaError;
use crate::json::{JsonObject, JsonValue};

mod path;

use path::JsonPath;

const POSITION_SHAPE: &str = "a position (array of 2 or 3 numbers)";

/// Members that cannot appear in geometry objects.
const GEOMETRY_FORBIDDEN: &[&str] = &["geometry", "properties", "features"];
/// Members that cannot appear in feature objects.
const FEATURE_FORBIDDEN: &[&str] = &["features", "coordinates", "geometries"];
/// Members that cannot appear in feature collection objects.
const COLLECTION_FORBIDDEN: &[&str] = &["geometry", "properties", "coordinates", "geometries"];

/// A GeoJSON document with verified structure.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedGeoJson {
    /// Top level geometry object.
    Geometry(ValidatedGeometry),
    /// Top level feature.
    Feature(ValidatedFeature),
    /// Top level feature collection.
    FeatureCollection(Vec<ValidatedFeature>),
}

/// Position which has the right shape, but whose values are not checked yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Longitude (first number).
    pub lon: f64,
    /// Latitude (second number).
    pub lat: f64,
    /// Altitude (third number) if present.
    pub alt: Option<f64>,
}

/// Geometry object with coordinates of the right nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedGeometry {
    /// `Point`
    Point(RawPosition),
    /// `MultiPoint`
    MultiPoint(Vec<RawPosition>),
    /// `LineString`
    LineString(Vec<RawPosition>),
    /// `MultiLineString`
    MultiLineString(Vec<Vec<RawPosition>>),
    /// `Polygon`, list of rings.
    Polygon(Vec<Vec<RawPosition>>),
    /// `MultiPolygon`, list of polygons.
    MultiPolygon(Vec<Vec<Vec<RawPosition>>>),
    /// `GeometryCollection`
    GeometryCollection(Vec<ValidatedGeometry>),
}

impl ValidatedGeometry {
    /// GeoJSON type of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            ValidatedGeometry::Point(_) => GeometryType::Point,
            ValidatedGeometry::MultiPoint(_) => GeometryType::MultiPoint,
            ValidatedGeometry::LineString(_) => GeometryType::LineString,
            ValidatedGeometry::MultiLineString(_) => GeometryType::MultiLineString,
            ValidatedGeometry::Polygon(_) => GeometryType::Polygon,
            ValidatedGeometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            ValidatedGeometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Iterates over all positions of the geometry, including the members of collections.
    pub fn iter_positions(&self) -> Box<dyn Iterator<Item = &'_ RawPosition> + '_> {
        match self {
            ValidatedGeometry::Point(p) => Box::new(std::iter::once(p)),
            ValidatedGeometry::MultiPoint(v) | ValidatedGeometry::LineString(v) => {
                Box::new(v.iter())
            }
            ValidatedGeometry::MultiLineString(v) | ValidatedGeometry::Polygon(v) => {
                Box::new(v.iter().flatten())
            }
            ValidatedGeometry::MultiPolygon(v) => Box::new(v.iter().flatten().flatten()),
            ValidatedGeometry::GeometryCollection(v) => {
                Box::new(v.iter().flat_map(ValidatedGeometry::iter_positions))
            }
        }
    }
}

/// Feature object with verified structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFeature {
    /// Geometry of the feature. `None` if the `geometry` member is `null`.
    pub geometry: Option<ValidatedGeometry>,
    /// Properties of the feature. Empty if the `properties` member is `null`.
    pub properties: JsonObject,
    /// Value of the `id` member, as is.
    pub id: Option<JsonValue>,
}

/// Value of the `type` member of a GeoJSON object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum GeoJsonType {
    Geometry(GeometryType),
    Feature,
    FeatureCollection,
}

impl GeoJsonType {
    fn as_str(&self) -> &'static str {
        match self {
            GeoJsonType::Geometry(t) => t.as_str(),
            GeoJsonType::Feature => "Feature",
            GeoJsonType::FeatureCollection => "FeatureCollection",
        }
    }
}

impl FromStr for GeoJsonType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feature" => Ok(GeoJsonType::Feature),
            "FeatureCollection" => Ok(GeoJsonType::FeatureCollection),
            _ => s.parse().map(GeoJsonType::Geometry),
        }
    }
}

/// Checks that the value is a GeoJSON object of one of the supported types.
pub fn validate(value: &JsonValue) -> Result<ValidatedGeoJson, SchemaError> {
    let path = JsonPath::Root;
    let object = expect_object(value, &path, "a GeoJSON object")?;

    match object_type(object, &path)? {
        GeoJsonType::Geometry(geometry_type) => Ok(ValidatedGeoJson::Geometry(
            validate_geometry_object(object, geometry_type, &path)?,
        )),
        GeoJsonType::Feature => Ok(ValidatedGeoJson::Feature(validate_feature_object(
            object, &path,
        )?)),
        GeoJsonType::FeatureCollection => Ok(ValidatedGeoJson::FeatureCollection(
            validate_feature_collection(object, &path)?,
        )),
    }
}

fn error(path: &JsonPath, reason: impl Into<String>) -> SchemaError {
    SchemaError {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn expect_object<'v>(
    value: &'v JsonValue,
    path: &JsonPath,
    expected: &str,
) -> Result<&'v JsonObject, SchemaError> {
    value.as_object().ok_or_else(|| {
        error(
            path,
            format!("expected {expected}, found {}", value.kind_name()),
        )
    })
}

fn expect_array<'v>(
    value: &'v JsonValue,
    path: &JsonPath,
    expected: &str,
) -> Result<&'v [JsonValue], SchemaError> {
    value.as_array().ok_or_else(|| {
        error(
            path,
            format!("expected {expected}, found {}", value.kind_name()),
        )
    })
}

fn required_member<'v>(
    object: &'v JsonObject,
    key: &str,
    type_name: &str,
    path: &JsonPath,
) -> Result<&'v JsonValue, SchemaError> {
    object.get(key).ok_or_else(|| {
        error(
            path,
            format!("{type_name} object must have a \"{key}\" member"),
        )
    })
}

fn object_type(object: &JsonObject, path: &JsonPath) -> Result<GeoJsonType, SchemaError> {
    let Some(value) = object.get("type") else {
        return Err(error(path, "object must have a \"type\" member"));
    };

    let type_path = path.key("type");
    let Some(name) = value.as_str() else {
        return Err(error(
            &type_path,
            format!("\"type\" must be a string, found {}", value.kind_name()),
        ));
    };

    name.parse()
        .map_err(|_| error(&type_path, format!("unknown GeoJSON type \"{name}\"")))
}

fn check_forbidden_members(
    object: &JsonObject,
    forbidden: &[&str],
    geojson_type: GeoJsonType,
    path: &JsonPath,
) -> Result<(), SchemaError> {
    match forbidden.iter().find(|member| object.contains_key(member)) {
        Some(member) => Err(error(
            &path.key(member),
            format!(
                "{} object cannot have a \"{member}\" member",
                geojson_type.as_str()
            ),
        )),
        None => Ok(()),
    }
}

fn validate_geometry(value: &JsonValue, path: &JsonPath) -> Result<ValidatedGeometry, SchemaError> {
    let object = expect_object(value, path, "a geometry object")?;
    match object_type(object, path)? {
        GeoJsonType::Geometry(geometry_type) => {
            validate_geometry_object(object, geometry_type, path)
        }
        other => Err(error(
            &path.key("type"),
            format!("expected a geometry type, found \"{}\"", other.as_str()),
        )),
    }
}

fn validate_geometry_object(
    object: &JsonObject,
    geometry_type: GeometryType,
    path: &JsonPath,
) -> Result<ValidatedGeometry, SchemaError> {
    check_forbidden_members(
        object,
        GEOMETRY_FORBIDDEN,
        GeoJsonType::Geometry(geometry_type),
        path,
    )?;

    let geometry = match geometry_type {
        GeometryType::Point => {
            ValidatedGeometry::Point(coordinates(object, geometry_type, path, position)?)
        }
        GeometryType::MultiPoint => {
            ValidatedGeometry::MultiPoint(coordinates(object, geometry_type, path, positions)?)
        }
        GeometryType::LineString => {
            ValidatedGeometry::LineString(coordinates(object, geometry_type, path, positions)?)
        }
        GeometryType::MultiLineString => ValidatedGeometry::MultiLineString(coordinates(
            object,
            geometry_type,
            path,
            position_lists,
        )?),
        GeometryType::Polygon => {
            ValidatedGeometry::Polygon(coordinates(object, geometry_type, path, position_lists)?)
        }
        GeometryType::MultiPolygon => {
            ValidatedGeometry::MultiPolygon(coordinates(object, geometry_type, path, |v, p| {
                array_of(
                    v,
                    p,
                    "an array of polygons (arrays of linear rings)",
                    position_lists,
                )
            })?)
        }
        GeometryType::GeometryCollection => {
            let geometries = required_member(object, "geometries", geometry_type.as_str(), path)?;
            ValidatedGeometry::GeometryCollection(array_of(
                geometries,
                &path.key("geometries"),
                "an array of geometry objects",
                validate_geometry,
            )?)
        }
    };

    Ok(geometry)
}

fn coordinates<T>(
    object: &JsonObject,
    geometry_type: GeometryType,
    path: &JsonPath,
    parse: impl Fn(&JsonValue, &JsonPath) -> Result<T, SchemaError>,
) -> Result<T, SchemaError> {
    let value = required_member(object, "coordinates", geometry_type.as_str(), path)?;
    parse(value, &path.key("coordinates"))
}

fn array_of<T>(
    value: &JsonValue,
    path: &JsonPath,
    expected: &str,
    item: impl Fn(&JsonValue, &JsonPath) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError> {
    expect_array(value, path, expected)?
        .iter()
        .enumerate()
        .map(|(i, v)| item(v, &path.index(i)))
        .collect()
}

fn position(value: &JsonValue, path: &JsonPath) -> Result<RawPosition, SchemaError> {
    let items = expect_array(value, path, POSITION_SHAPE)?;
    if !(2..=3).contains(&items.len()) {
        return Err(error(
            path,
            format!(
                "expected {POSITION_SHAPE}, found array of {} elements",
                items.len()
            ),
        ));
    }

    let mut numbers = [0.0; 3];
    for (i, item) in items.iter().enumerate() {
        numbers[i] = item.as_f64().ok_or_else(|| {
            error(
                &path.index(i),
                format!("expected a number, found {}", item.kind_name()),
            )
        })?;
    }

    Ok(RawPosition {
        lon: numbers[0],
        lat: numbers[1],
        alt: (items.len() == 3).then_some(numbers[2]),
    })
}

fn positions(value: &JsonValue, path: &JsonPath) -> Result<Vec<RawPosition>, SchemaError> {
    array_of(value, path, "an array of positions", position)
}

fn position_lists(
    value: &JsonValue,
    path: &JsonPath,
) -> Result<Vec<Vec<RawPosition>>, SchemaError> {
    array_of(value, path, "an array of arrays of positions", positions)
}

fn validate_feature_object(
    object: &JsonObject,
    path: &JsonPath,
) -> Result<ValidatedFeature, SchemaError> {
    check_forbidden_members(object, FEATURE_FORBIDDEN, GeoJsonType::Feature, path)?;

    let geometry = match required_member(object, "geometry", "Feature", path)? {
        JsonValue::Null => None,
        value => Some(validate_geometry(value, &path.key("geometry"))?),
    };

    let properties = match required_member(object, "properties", "Feature", path)? {
        JsonValue::Null => JsonObject::new(),
        JsonValue::Object(properties) => properties.clone(),
        other => {
            return Err(error(
                &path.key("properties"),
                format!("expected an object or null, found {}", other.kind_name()),
            ))
        }
    };

    Ok(ValidatedFeature {
        geometry,
        properties,
        id: object.get("id").cloned(),
    })
}

fn validate_feature(value: &JsonValue, path: &JsonPath) -> Result<ValidatedFeature, SchemaError> {
    let object = expect_object(value, path, "a Feature object")?;
    match object_type(object, path)? {
        GeoJsonType::Feature => validate_feature_object(object, path),
        other => Err(error(
            &path.key("type"),
            format!("expected \"Feature\", found \"{}\"", other.as_str()),
        )),
    }
}

fn validate_feature_collection(
    object: &JsonObject,
    path: &JsonPath,
) -> Result<Vec<ValidatedFeature>, SchemaError> {
    check_forbidden_members(
        object,
        COLLECTION_FORBIDDEN,
        GeoJsonType::FeatureCollection,
        path,
    )?;

    let features = required_member(object, "features", "FeatureCollection", path)?;
    array_of(
        features,
        &path.key("features"),
        "an array of Feature objects",
        validate_feature,
    )
}
