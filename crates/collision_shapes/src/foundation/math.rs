//! Math utilities and types
//!
//! Provides the 2D math types used by every shape and query. All geometry is
//! computed in `f64`; homogeneous 3x3 matrices carry 2D affine transforms.

pub use nalgebra::{Matrix3, Unit, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f64>;

/// 3x3 homogeneous matrix type (2D affine transforms)
pub type Mat3 = Matrix3<f64>;

/// Tolerance for treating two coordinates, slopes or lengths as equal
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Margin a ray hit must lie in front of the ray origin.
///
/// A reflected ray starts exactly on the surface it left, so its first
/// candidate hit is that same surface at a distance of roughly 1e-14.
pub const RAY_EPSILON: f64 = 1e-8;

/// Tolerance when comparing the two angle measures used during reflection
pub const REFLECTION_ANGLE_EPSILON: f64 = 1e-6;

/// Returns true if `a` and `b` are equal within [`GEOMETRY_EPSILON`]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx::abs_diff_eq!(a, b, epsilon = GEOMETRY_EPSILON)
}

/// Returns true if both points are equal within [`GEOMETRY_EPSILON`]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Inclusive range test that accepts the bounds in either order
pub fn is_between(value: f64, lower: f64, upper: f64) -> bool {
    (lower <= value && value <= upper) || (upper <= value && value <= lower)
}

/// Sign of `value`: 1.0, -1.0, or 0.0 for zero
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Angle of a vector measured counter-clockwise from +x, in `(-PI, PI]`
pub fn angle_of(vector: &Vec2) -> f64 {
    vector.y.atan2(vector.x)
}

/// Unit vector pointing along `angle`
pub fn unit_from_angle(angle: f64) -> Unit<Vec2> {
    Unit::new_unchecked(Vec2::new(angle.cos(), angle.sin()))
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner
    pub origin: Point2,
    /// Extent along each axis (non-negative)
    pub size: Vec2,
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

impl Rect {
    /// Create a rectangle from its minimum corner and size
    pub fn new(origin: Point2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Empty rectangle at the origin
    pub fn zero() -> Self {
        Self::new(Point2::origin(), Vec2::zeros())
    }

    /// Create a rectangle centered on `center`
    pub fn centered(center: Point2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    /// Create the rectangle spanning two opposite corners
    pub fn from_corners(a: &Point2, b: &Point2) -> Self {
        let min = Point2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point2::new(a.x.max(b.x), a.y.max(b.y));
        Self::new(min, max - min)
    }

    /// Smallest rectangle containing every point, or `None` for no points
    pub fn containing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min, mut max) = (*first, *first);
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Some(Self::new(min, max - min))
    }

    /// Smallest rectangle containing both rectangles
    pub fn union(&self, other: &Self) -> Self {
        let corners = [
            self.origin,
            self.max(),
            other.origin,
            other.max(),
        ];
        Self::containing(&corners).unwrap_or(*self)
    }

    /// Minimum x coordinate
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Maximum x coordinate
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    /// Minimum y coordinate
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Maximum y coordinate
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Maximum corner
    pub fn max(&self) -> Point2 {
        self.origin + self.size
    }

    /// Center point
    pub fn center(&self) -> Point2 {
        self.origin + self.size / 2.0
    }

    /// Corners in counter-clockwise order starting at the minimum corner
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.origin,
            Point2::new(self.max_x(), self.min_y()),
            self.max(),
            Point2::new(self.min_x(), self.max_y()),
        ]
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Point2) -> bool {
        self.min_x() <= point.x
            && point.x <= self.max_x()
            && self.min_y() <= point.y
            && point.y <= self.max_y()
    }

    /// Containment test padded by [`GEOMETRY_EPSILON`] on every side
    ///
    /// Intersection points computed from a line equation can land a rounding
    /// error outside a zero-height or zero-width frame.
    pub fn contains_approx(&self, point: &Point2) -> bool {
        self.min_x() - GEOMETRY_EPSILON <= point.x
            && point.x <= self.max_x() + GEOMETRY_EPSILON
            && self.min_y() - GEOMETRY_EPSILON <= point.y
            && point.y <= self.max_y() + GEOMETRY_EPSILON
    }

    /// Bounding box of this rectangle after transforming its corners
    pub fn transformed(&self, matrix: &Mat3) -> Self {
        let corners = self.corners().map(|corner| matrix.transform_point(&corner));
        Self::containing(&corners).unwrap_or(*self)
    }
}
