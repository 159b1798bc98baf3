//! Axis-aligned rectangle shapes

use crate::foundation::math::{Point2, Vec2};
use crate::foundation::transform::Transform;
use crate::physics::collision::shape::{Shape, ShapeKind};

/// Corners of `[0, 0]..size`, counter-clockwise from the origin
pub(crate) fn corner_points(size: Vec2) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(size.x, 0.0),
        Point2::new(size.x, size.y),
        Point2::new(0.0, size.y),
    ]
}

/// Inclusive bounds test in local space
pub(crate) fn contains(size: Vec2, point: &Point2) -> bool {
    0.0 <= point.x && point.x <= size.x && 0.0 <= point.y && point.y <= size.y
}

impl Shape {
    /// Rectangle of the given size, centered on the origin
    pub fn rectangle(size: Vec2) -> Self {
        Self::from_parts(Transform::with_size(size), ShapeKind::Rectangle)
    }

    /// Rectangle of the given size centered on `center`
    pub fn rectangle_at(center: Point2, size: Vec2) -> Self {
        let mut transform = Transform::with_size(size);
        transform.set_center(center);
        Self::from_parts(transform, ShapeKind::Rectangle)
    }
}
