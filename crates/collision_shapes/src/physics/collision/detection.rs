//! Recursive shape-vs-shape collision test
//!
//! The test walks both shape trees at once, carrying each tree's
//! accumulated parent matrix. For every pair of nodes it checks, in order:
//!
//! 1. points of the first node inside the second,
//! 2. points of the second node inside the first,
//! 3. edges of the first node against edges of the second, then the reverse,
//!
//! and only then descends: the first node against each child of the second
//! (and the first node's children against that child), then the first
//! node's children against the untouched second node. Containment comes
//! before edges because a fully enclosed shape crosses no edges. The first
//! hit in this order is the one reported.

use super::primitives::LineSegment;
use super::shape::Shape;
use crate::foundation::math::{Mat3, Point2};

/// First colliding pair found by [`Shape::collides_with_shape`]
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult<'a> {
    /// Node from the tree `collides_with_shape` was called on
    pub first_shape: &'a Shape,
    /// Node from the tree passed as the argument
    pub second_shape: &'a Shape,
    /// Contact point, in the frame both root shapes are placed in.
    ///
    /// For a containment hit this is the contained point; for an edge hit,
    /// the crossing of the two edges.
    pub collision_point: Point2,
}

impl<'a> CollisionResult<'a> {
    /// Both shapes as a tuple
    pub fn shapes(&self) -> (&'a Shape, &'a Shape) {
        (self.first_shape, self.second_shape)
    }

    /// The same collision with first and second shapes swapped
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            first_shape: self.second_shape,
            second_shape: self.first_shape,
            collision_point: self.collision_point,
        }
    }
}

impl Shape {
    /// Test whether this shape tree overlaps `other`'s tree.
    ///
    /// Returns the first colliding pair in traversal order, not an
    /// exhaustive list. Nodes with a zero scale are skipped.
    pub fn collides_with_shape<'a>(&'a self, other: &'a Self) -> Option<CollisionResult<'a>> {
        let identity = Mat3::identity();
        collides_recursive(self, &identity, other, &identity)
    }

    /// True if the two shape trees overlap anywhere
    pub fn intersects(&self, other: &Self) -> bool {
        self.collides_with_shape(other).is_some()
    }
}

fn collides_recursive<'a>(
    first: &'a Shape,
    first_parent: &Mat3,
    second: &'a Shape,
    second_parent: &Mat3,
) -> Option<CollisionResult<'a>> {
    if let Some(result) = collides_nodes(first, first_parent, second, second_parent) {
        return Some(result);
    }

    let first_child_parent = first_parent * first.transform().model_matrix(false);
    let second_child_parent = second_parent * second.transform().model_matrix(false);

    for second_child in second.children() {
        if let Some(result) = collides_recursive(first, first_parent, second_child, &second_child_parent) {
            return Some(result);
        }
        for first_child in first.children() {
            if let Some(result) =
                collides_recursive(first_child, &first_child_parent, second_child, &second_child_parent)
            {
                return Some(result);
            }
        }
    }

    first.children().iter().find_map(|first_child| {
        collides_recursive(first_child, &first_child_parent, second, second_parent)
    })
}

/// Test the own geometry of one pair of nodes, ignoring children
fn collides_nodes<'a>(
    first: &'a Shape,
    first_parent: &Mat3,
    second: &'a Shape,
    second_parent: &Mat3,
) -> Option<CollisionResult<'a>> {
    if first.points().is_empty() || second.points().is_empty() {
        return None;
    }

    let first_model = first_parent * first.transform().model_matrix(true);
    let second_model = second_parent * second.transform().model_matrix(true);
    let (Some(first_inverse), Some(second_inverse)) =
        (first_model.try_inverse(), second_model.try_inverse())
    else {
        log::warn!(
            "Skipping {} vs {}: transform is not invertible",
            first.kind().name(),
            second.kind().name()
        );
        return None;
    };

    let result = |local_point: Point2, model: &Mat3| CollisionResult {
        first_shape: first,
        second_shape: second,
        collision_point: model.transform_point(&local_point),
    };

    // First's space -> second's space, and back
    let first_to_second = second_inverse * first_model;
    let second_to_first = first_inverse * second_model;

    for point in first.points() {
        let mapped = first_to_second.transform_point(point);
        if second.point_lies_inside(&mapped) {
            log::trace!("{} point inside {}", first.kind().name(), second.kind().name());
            return Some(result(mapped, &second_model));
        }
    }

    for point in second.points() {
        let mapped = second_to_first.transform_point(point);
        if first.point_lies_inside(&mapped) {
            log::trace!("{} point inside {}", second.kind().name(), first.kind().name());
            return Some(result(mapped, &first_model));
        }
    }

    let first_lines = LineSegment::lines_between_points(first.points());
    let second_lines = LineSegment::lines_between_points(second.points());

    for line in first_lines.iter().map(|line| line.transformed(&first_to_second)) {
        for second_line in &second_lines {
            if let Some(point) = line.collides_with(second_line) {
                log::trace!("{} edge crosses {}", first.kind().name(), second.kind().name());
                return Some(result(point, &second_model));
            }
        }
    }

    for line in second_lines.iter().map(|line| line.transformed(&second_to_first)) {
        for first_line in &first_lines {
            if let Some(point) = line.collides_with(first_line) {
                log::trace!("{} edge crosses {}", second.kind().name(), first.kind().name());
                return Some(result(point, &first_model));
            }
        }
    }

    None
}
