//! Line segment shapes
//!
//! Wraps a [`LineSegment`] as a shape with exactly two points. Like
//! triangles, the segment is stored relative to its bounding box.

use crate::foundation::math::{Point2, Rect, Vec2};
use crate::foundation::transform::Transform;
use crate::physics::collision::primitives::LineSegment;
use crate::physics::collision::shape::{Shape, ShapeKind};
use crate::physics::collision::GeometryError;

impl Shape {
    /// Segment between two points given in the parent's space
    pub fn segment(first: Point2, second: Point2) -> Self {
        let frame = Rect::from_corners(&first, &second);
        let local = LineSegment::new(
            Point2::from(first - frame.origin),
            Point2::from(second - frame.origin),
        );

        let mut transform = Transform::with_size(frame.size);
        transform.anchor = Vec2::zeros();
        transform.position = frame.origin;
        Self::from_parts(transform, ShapeKind::Segment(local))
    }

    /// Segment from a flat `[x1, y1, x2, y2]` array
    pub fn segment_from_coordinates(coordinates: &[f64]) -> Result<Self, GeometryError> {
        match coordinates {
            [x1, y1, x2, y2, ..] => Ok(Self::segment(Point2::new(*x1, *y1), Point2::new(*x2, *y2))),
            _ => Err(GeometryError::TooFewCoordinates {
                expected: 4,
                found: coordinates.len(),
            }),
        }
    }

    /// The local segment if this shape is a line segment
    pub fn as_segment(&self) -> Option<&LineSegment> {
        match self.kind() {
            ShapeKind::Segment(segment) => Some(segment),
            _ => None,
        }
    }
}
