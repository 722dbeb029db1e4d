use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::position::GeoPoint;

/// Axis aligned rectangle. For geographic data `x` is longitude and `y` is latitude.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect<N: Num + Copy + PartialOrd = f64> {
    /// Minimum x (west) coordinate.
    pub x_min: N,
    /// Minimum y (south) coordinate.
    pub y_min: N,
    /// Maximum x (east) coordinate.
    pub x_max: N,
    /// Maximum y (north) coordinate.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd> BoundingRect<N> {
    /// Creates a new rectangle.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: if self.x_min < other.x_min {
                self.x_min
            } else {
                other.x_min
            },
            y_min: if self.y_min < other.y_min {
                self.y_min
            } else {
                other.y_min
            },
            x_max: if self.x_max > other.x_max {
                self.x_max
            } else {
                other.x_max
            },
            y_max: if self.y_max > other.y_max {
                self.y_max
            } else {
                other.y_max
            },
        }
    }

    /// Merges all the rectangles. Returns `None` if the iterator is empty.
    pub fn merge_all(rects: impl IntoIterator<Item = Self>) -> Option<Self> {
        rects.into_iter().reduce(|acc, rect| acc.merge(rect))
    }

    /// Whether the point is inside the rectangle or on its border.
    pub fn contains(&self, x: N, y: N) -> bool {
        self.x_min <= x && self.x_max >= x && self.y_min <= y && self.y_max >= y
    }
}

impl BoundingRect<f64> {
    /// Rectangle of zero size at the given point.
    pub fn from_point(p: &impl GeoPoint) -> Self {
        Self {
            x_min: p.lon(),
            x_max: p.lon(),
            y_min: p.lat(),
            y_max: p.lat(),
        }
    }

    /// Smallest rectangle containing all the points, `None` if there are no points.
    pub fn from_points<'a, P: GeoPoint + 'a>(points: impl Iterator<Item = &'a P>) -> Option<Self> {
        Self::merge_all(points.map(Self::from_point))
    }
}
