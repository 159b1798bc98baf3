//! Group shapes
//!
//! A group defines no geometry of its own: it has no points and nothing
//! lies inside it. It bundles child shapes and caches the axis-aligned
//! bounding frame of all of its descendants.

use crate::foundation::math::{Mat3, Point2, Rect};
use crate::foundation::transform::Transform;
use crate::physics::collision::shape::{Shape, ShapeKind};

/// Cached bounds of a group's descendants
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Group {
    local_frame: Option<Rect>,
}

impl Group {
    /// Bounding box of all descendant points in the group's child space,
    /// or `None` if no descendant has points
    pub fn local_frame(&self) -> Option<Rect> {
        self.local_frame
    }

    pub(crate) fn recompute_frame(&mut self, children: &[Shape]) {
        let mut points = Vec::new();
        for child in children {
            collect_points(child, &Mat3::identity(), &mut points);
        }
        self.local_frame = Rect::containing(&points);
    }
}

/// Push every point of `shape` and its descendants, mapped into the space of `parent`
fn collect_points(shape: &Shape, parent: &Mat3, points: &mut Vec<Point2>) {
    let model = parent * shape.transform().model_matrix(true);
    points.extend(shape.points().iter().map(|point| model.transform_point(point)));

    let child_model = parent * shape.transform().model_matrix(false);
    for child in shape.children() {
        collect_points(child, &child_model, points);
    }
}

impl Shape {
    /// Group bundling `children`
    pub fn group(children: Vec<Self>) -> Self {
        let mut shape = Self::from_parts(Transform::identity(), ShapeKind::Group(Group::default()));
        shape.set_children(children);
        shape
    }

    /// World-space (parent-space) bounding box of a group's descendants.
    ///
    /// `None` for non-group shapes and for groups without any points.
    pub fn collision_frame(&self) -> Option<Rect> {
        match self.kind() {
            ShapeKind::Group(group) => group
                .local_frame()
                .map(|frame| frame.transformed(&self.transform().model_matrix(false))),
            _ => None,
        }
    }
}
