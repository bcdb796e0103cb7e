//! Geometric primitives for chart layout and positioning.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in chart space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Dendra uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Radial charts are drawn around the origin. Angles are measured in radians
//! clockwise from twelve o'clock, so angle `0` points up (negative Y) and
//! angle `π/2` points right (positive X). See [`Point::from_polar`].

use std::f32::consts::PI;

/// Converts an angle in radians to degrees.
pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// A 2D point representing a position in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use dendra_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point from an angle and a distance from the origin.
    ///
    /// The angle is measured clockwise from twelve o'clock, which is the
    /// convention used by radial tree layouts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dendra_core::geometry::Point;
    /// # use float_cmp::assert_approx_eq;
    /// let top = Point::from_polar(0.0, 10.0);
    /// assert_approx_eq!(f32, top.x(), 0.0);
    /// assert_approx_eq!(f32, top.y(), -10.0);
    ///
    /// let right = Point::from_polar(std::f32::consts::FRAC_PI_2, 10.0);
    /// assert_approx_eq!(f32, right.x(), 10.0, epsilon = 1e-5);
    /// ```
    pub fn from_polar(angle: f32, radius: f32) -> Self {
        Self {
            x: radius * angle.sin(),
            y: -radius * angle.cos(),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Rotates the point around the origin by `radians`, clockwise in screen
    /// space (the direction of an SVG `rotate()` transform).
    pub fn rotate(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Converts a point and size into a bounds rectangle centered on the point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dendra_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([Point::new(-1.0, 2.0), Point::new(3.0, -4.0)]).unwrap();
    /// assert_eq!(bounds.min_x(), -1.0);
    /// assert_eq!(bounds.max_y(), 2.0);
    /// assert!(Bounds::from_points(std::iter::empty()).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(seed, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Returns the four corners, clockwise from the top-left.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if the point lies inside or on the edge of the bounds.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_from_polar_quadrants() {
        let bottom = Point::from_polar(PI, 5.0);
        assert_approx_eq!(f32, bottom.x(), 0.0, epsilon = 1e-5);
        assert_approx_eq!(f32, bottom.y(), 5.0, epsilon = 1e-5);

        let left = Point::from_polar(3.0 * FRAC_PI_2, 5.0);
        assert_approx_eq!(f32, left.x(), -5.0, epsilon = 1e-5);
        assert_approx_eq!(f32, left.y(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_matches_svg_direction() {
        // SVG rotate(90) turns +X into +Y.
        let rotated = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert_approx_eq!(f32, rotated.x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, rotated.y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_polar_equals_rotated_translation() {
        // rotate(angle - 90°) translate(radius, 0) is the same point as from_polar.
        let angle = 1.2_f32;
        let radius = 42.0;
        let via_rotation = Point::new(radius, 0.0).rotate(angle - FRAC_PI_2);
        let via_polar = Point::from_polar(angle, radius);
        assert_approx_eq!(f32, via_rotation.x(), via_polar.x(), epsilon = 1e-4);
        assert_approx_eq!(f32, via_rotation.y(), via_polar.y(), epsilon = 1e-4);
    }

    #[test]
    fn test_bounds_merge_and_center() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(20.0, -10.0), Size::new(10.0, 10.0));
        let merged = a.merge(&b);
        assert_approx_eq!(f32, merged.width(), 30.0);
        assert_approx_eq!(f32, merged.height(), 20.0);
        assert_approx_eq!(f32, merged.center().x(), 15.0);
        assert_approx_eq!(f32, merged.center().y(), 0.0);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new_from_center(Point::default(), Size::new(4.0, 4.0));
        assert!(bounds.contains(Point::new(2.0, -2.0)));
        assert!(!bounds.contains(Point::new(2.1, 0.0)));
    }

    #[test]
    fn test_to_degrees() {
        assert_approx_eq!(f32, to_degrees(PI), 180.0);
        assert_approx_eq!(f32, to_degrees(FRAC_PI_2), 90.0);
    }
}
