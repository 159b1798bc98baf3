//! Triangle shapes
//!
//! Vertices are stored relative to their own bounding box; the box origin
//! becomes the shape's position (with a zero anchor) so the shape's points
//! land exactly where they were specified.

use crate::foundation::math::{Point2, Rect, Vec2};
use crate::foundation::transform::Transform;
use crate::physics::collision::primitives::LineSegment;
use crate::physics::collision::shape::{Shape, ShapeKind};
use crate::physics::collision::GeometryError;

/// Three vertices in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point2; 3],
}

impl Triangle {
    /// Vertices in local space
    pub fn vertices(&self) -> [Point2; 3] {
        self.vertices
    }

    /// Average of the three vertices
    pub fn centroid(&self) -> Point2 {
        let sum = self.vertices.iter().fold(Vec2::zeros(), |acc, vertex| acc + vertex.coords);
        Point2::from(sum / 3.0)
    }

    /// Local bounding box
    pub fn frame(&self) -> Rect {
        Rect::containing(&self.vertices).unwrap_or_default()
    }

    /// True if `point` lies on the centroid's side of every edge
    pub fn contains(&self, point: &Point2) -> bool {
        let centroid = self.centroid();
        LineSegment::lines_between_points(&self.vertices)
            .iter()
            .all(|edge| edge.point_lies_above(&centroid) == edge.point_lies_above(point))
    }
}

impl Shape {
    /// Triangle through three points given in the parent's space
    pub fn triangle(first: Point2, second: Point2, third: Point2) -> Self {
        let points = [first, second, third];
        let frame = Rect::containing(&points).unwrap_or_default();
        let vertices = points.map(|point| Point2::from(point - frame.origin));

        let mut transform = Transform::with_size(frame.size);
        transform.anchor = Vec2::zeros();
        transform.position = frame.origin;
        Self::from_parts(transform, ShapeKind::Triangle(Triangle { vertices }))
    }

    /// Triangle from a flat `[x1, y1, x2, y2, x3, y3]` array
    pub fn triangle_from_coordinates(coordinates: &[f64]) -> Result<Self, GeometryError> {
        match coordinates {
            [x1, y1, x2, y2, x3, y3, ..] => Ok(Self::triangle(
                Point2::new(*x1, *y1),
                Point2::new(*x2, *y2),
                Point2::new(*x3, *y3),
            )),
            _ => Err(GeometryError::TooFewCoordinates {
                expected: 6,
                found: coordinates.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Shape {
        Shape::triangle(
            Point2::new(2.0, 1.0),
            Point2::new(6.0, 1.0),
            Point2::new(2.0, 5.0),
        )
    }

    #[test]
    fn test_triangle_normalized_to_bounding_box() {
        let shape = right_triangle();

        assert_eq!(shape.position(), Point2::new(2.0, 1.0));
        assert_eq!(shape.size(), Vec2::new(4.0, 4.0));
        assert_eq!(shape.points()[0], Point2::new(0.0, 0.0));
        assert_eq!(shape.points()[1], Point2::new(4.0, 0.0));
        assert_eq!(shape.points()[2], Point2::new(0.0, 4.0));

        // World placement matches the input points
        let matrix = shape.transform().model_matrix(true);
        assert_relative_eq!(matrix.transform_point(&shape.points()[2]), Point2::new(2.0, 5.0));
    }

    #[test]
    fn test_triangle_containment() {
        let shape = right_triangle();

        assert!(shape.point_lies_inside(&Point2::new(1.0, 1.0)));
        assert!(shape.point_lies_inside(&Point2::new(0.5, 3.0)));
        assert!(!shape.point_lies_inside(&Point2::new(3.0, 3.0)));
        assert!(!shape.point_lies_inside(&Point2::new(-0.5, 1.0)));
        assert!(!shape.point_lies_inside(&Point2::new(1.0, -0.5)));
    }

    #[test]
    fn test_triangle_centroid_and_frame() {
        let ShapeKind::Triangle(triangle) = right_triangle().kind().clone() else {
            panic!("expected a triangle");
        };

        assert_relative_eq!(triangle.centroid(), Point2::new(4.0 / 3.0, 4.0 / 3.0));
        assert_eq!(triangle.frame().size, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_triangle_from_coordinates() {
        let shape = Shape::triangle_from_coordinates(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(shape.points().len(), 3);

        let err = Shape::triangle_from_coordinates(&[0.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(err, GeometryError::TooFewCoordinates { expected: 6, found: 3 });
    }
}
