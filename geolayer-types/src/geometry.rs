//! See [`Geom`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounding_rect::BoundingRect;
use crate::impls::{LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon};
use crate::position::{GeoPoint, Position};

/// Any of the GeoJSON geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize + Clone",
    deserialize = "P: Deserialize<'de> + PartialEq + Display"
))]
pub enum Geom<P = Position> {
    /// Single point.
    Point(P),
    /// Set of points.
    MultiPoint(MultiPoint<P>),
    /// Open line.
    LineString(LineString<P>),
    /// Set of open lines.
    MultiLineString(MultiLineString<P>),
    /// Polygon with optional holes.
    Polygon(Polygon<P>),
    /// Set of polygons.
    MultiPolygon(MultiPolygon<P>),
    /// Heterogeneous set of geometries.
    GeometryCollection(Vec<Geom<P>>),
}

impl<P> Geom<P> {
    /// GeoJSON type of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geom::Point(_) => GeometryType::Point,
            Geom::MultiPoint(_) => GeometryType::MultiPoint,
            Geom::LineString(_) => GeometryType::LineString,
            Geom::MultiLineString(_) => GeometryType::MultiLineString,
            Geom::Polygon(_) => GeometryType::Polygon,
            Geom::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geom::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Kind of shape that is drawn for this geometry.
    ///
    /// A geometry collection has a shape kind only if all of its members share it. Empty and
    /// mixed collections return `None`.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Geom::Point(_) | Geom::MultiPoint(_) => Some(ShapeKind::Point),
            Geom::LineString(_) | Geom::MultiLineString(_) => Some(ShapeKind::Line),
            Geom::Polygon(_) | Geom::MultiPolygon(_) => Some(ShapeKind::Polygon),
            Geom::GeometryCollection(members) => {
                let mut kinds = members.iter().map(Geom::shape_kind);
                let first = kinds.next()??;
                kinds.all(|kind| kind == Some(first)).then_some(first)
            }
        }
    }

    /// Iterates over all points of the geometry, including the closing points of rings.
    pub fn iter_points(&self) -> Box<dyn Iterator<Item = &'_ P> + '_> {
        match self {
            Geom::Point(p) => Box::new(std::iter::once(p)),
            Geom::MultiPoint(v) => Box::new(v.points().iter()),
            Geom::LineString(v) => Box::new(v.iter()),
            Geom::MultiLineString(v) => Box::new(v.lines().iter().flat_map(|l| l.iter())),
            Geom::Polygon(v) => Box::new(v.iter_rings().flat_map(|r| r.iter())),
            Geom::MultiPolygon(v) => Box::new(
                v.parts()
                    .iter()
                    .flat_map(|p| p.iter_rings().flat_map(|r| r.iter())),
            ),
            Geom::GeometryCollection(v) => Box::new(v.iter().flat_map(Geom::iter_points)),
        }
    }
}

impl Geom<Position> {
    /// Altitude reference of the geometry.
    ///
    /// The geometry is placed relative to the ellipsoid only if every one of its positions has an
    /// altitude. Otherwise it is drawn on the surface.
    pub fn altitude_reference(&self) -> AltitudeReference {
        let mut points = self.iter_points().peekable();
        if points.peek().is_some() && points.all(|p| p.alt().is_some()) {
            AltitudeReference::Ellipsoid
        } else {
            AltitudeReference::Surface
        }
    }
}

impl<P: GeoPoint> Geom<P> {
    /// Bounding rectangle (in degrees) of all points of the geometry, `None` for empty geometries.
    pub fn bounding_rect(&self) -> Option<BoundingRect> {
        BoundingRect::from_points(self.iter_points())
    }
}

impl<P> From<LineString<P>> for Geom<P> {
    fn from(value: LineString<P>) -> Self {
        Self::LineString(value)
    }
}

impl<P> From<MultiPoint<P>> for Geom<P> {
    fn from(value: MultiPoint<P>) -> Self {
        Self::MultiPoint(value)
    }
}

impl<P> From<MultiLineString<P>> for Geom<P> {
    fn from(value: MultiLineString<P>) -> Self {
        Self::MultiLineString(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<Position> for Geom<Position> {
    fn from(value: Position) -> Self {
        Self::Point(value)
    }
}

/// GeoJSON geometry type discriminator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    /// `Point`
    Point,
    /// `MultiPoint`
    MultiPoint,
    /// `LineString`
    LineString,
    /// `MultiLineString`
    MultiLineString,
    /// `Polygon`
    Polygon,
    /// `MultiPolygon`
    MultiPolygon,
    /// `GeometryCollection`
    GeometryCollection,
}

impl GeometryType {
    /// All geometry types.
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// Name of the type as it is written in the `type` member of a GeoJSON object.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Kind of the shape a geometry is rendered as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Icons/markers.
    Point,
    /// Polylines.
    Line,
    /// Filled polygons.
    Polygon,
}

/// What the altitude of the geometry positions is measured from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AltitudeReference {
    /// Geometry is clamped to the surface, altitudes are ignored.
    Surface,
    /// Altitudes are heights above the ellipsoid.
    Ellipsoid,
}
