//! Composable collision shapes
//!
//! A [`Shape`] is one node of a shape tree: a local point list, the
//! [`Transform`] placing it in its parent, a hit/hurt [`BoxType`] tag and the
//! child shapes positioned relative to it. The concrete geometry is a closed
//! set of variants ([`ShapeKind`]); everything the collision and raycast
//! algorithms need is available through the shared node data.
//!
//! Points are stored in MODEL SPACE and cached. The cache is regenerated by
//! the setters whenever size or sample count changes, so mutation goes
//! through methods rather than public fields.

use std::fmt;

use super::primitives::LineSegment;
use super::shapes::{rectangle, Ellipse, Group, Triangle};
use super::GeometryError;
use crate::foundation::math::{Point2, Rect, Vec2};
use crate::foundation::transform::Transform;
use crate::physics::box_type::BoxType;

/// Concrete geometry of a shape node
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned box spanning `[0, 0]..size`
    Rectangle,
    /// Three explicit vertices relative to their bounding box
    Triangle(Triangle),
    /// Ellipse inscribed in `[0, 0]..size`, sampled at equal angles
    Ellipse(Ellipse),
    /// Single segment relative to its bounding box
    Segment(LineSegment),
    /// Pointless container for child shapes
    Group(Group),
}

impl ShapeKind {
    /// Short variant name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Triangle(_) => "Triangle",
            Self::Ellipse(_) => "Ellipse",
            Self::Segment(_) => "LineSegment",
            Self::Group(_) => "Group",
        }
    }
}

/// One node of a shape tree
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    transform: Transform,
    box_type: BoxType,
    kind: ShapeKind,
    points: Vec<Point2>,
    children: Vec<Shape>,
}

impl Shape {
    /// Create a shape from its parts and build its point cache
    pub(crate) fn from_parts(transform: Transform, kind: ShapeKind) -> Self {
        let mut shape = Self {
            transform,
            box_type: BoxType::BOTH,
            kind,
            points: Vec::new(),
            children: Vec::new(),
        };
        shape.refresh();
        shape
    }

    // Builders

    /// Place the shape's anchor at `position`
    #[must_use]
    pub fn with_position(mut self, position: Point2) -> Self {
        self.transform.position = position;
        self
    }

    /// Rotate the shape by `rotation` radians
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.transform.rotation = rotation;
        self
    }

    /// Scale the shape
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Change the normalized anchor
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.transform.anchor = anchor;
        self
    }

    /// Tag the shape as a hit box, hurt box or both
    #[must_use]
    pub fn with_box_type(mut self, box_type: BoxType) -> Self {
        self.box_type = box_type;
        self
    }

    /// Append a child shape
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.add_child(child);
        self
    }

    // Accessors

    /// Local placement
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Hit/hurt classification
    pub fn box_type(&self) -> BoxType {
        self.box_type
    }

    /// Concrete geometry
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Local polygon vertices or boundary samples
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Nested shapes positioned relative to this one
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Anchor position in the parent's space
    pub fn position(&self) -> Point2 {
        self.transform.position
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    /// Scale factors
    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    /// Normalized anchor
    pub fn anchor(&self) -> Vec2 {
        self.transform.anchor
    }

    /// Content size
    pub fn size(&self) -> Vec2 {
        self.transform.size()
    }

    /// Center of the content box in the parent's space
    pub fn center(&self) -> Point2 {
        self.transform.center()
    }

    /// Axis-aligned content box in the parent's space
    pub fn frame(&self) -> Rect {
        self.transform.frame()
    }

    // Mutation

    /// Replace the whole transform, regenerating points if the size changed
    pub fn set_transform(&mut self, transform: Transform) {
        let resized = transform.size() != self.transform.size();
        self.transform = transform;
        if resized {
            self.refresh();
        }
    }

    /// Resize the shape's content box
    pub fn set_size(&mut self, size: Vec2) {
        let mut transform = self.transform;
        transform.set_size(size);
        self.set_transform(transform);
    }

    /// Move the anchor point
    pub fn set_position(&mut self, position: Point2) {
        self.transform.position = position;
    }

    /// Move so the content box is centered on `center`
    pub fn set_center(&mut self, center: Point2) {
        self.transform.set_center(center);
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f64) {
        self.transform.rotation = rotation;
    }

    /// Set the scale factors
    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale;
    }

    /// Set the normalized anchor
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.transform.anchor = anchor;
    }

    /// Set the hit/hurt classification
    pub fn set_box_type(&mut self, box_type: BoxType) {
        self.box_type = box_type;
    }

    /// Change the number of boundary samples of an ellipse.
    ///
    /// Has no effect on other variants.
    pub fn set_ellipse_samples(&mut self, sample_count: usize) -> Result<(), GeometryError> {
        if let ShapeKind::Ellipse(ellipse) = &mut self.kind {
            ellipse.set_sample_count(sample_count)?;
            self.refresh();
        }
        Ok(())
    }

    /// Append a child shape
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
        self.refresh_group();
    }

    /// Replace every child shape
    pub fn set_children(&mut self, children: Vec<Self>) {
        self.children = children;
        self.refresh_group();
    }

    /// Mutate the children in place; cached group frames are recomputed afterwards
    pub fn update_children<F, R>(&mut self, update: F) -> R
    where
        F: FnOnce(&mut Vec<Self>) -> R,
    {
        let result = update(&mut self.children);
        self.refresh_group();
        result
    }

    /// Remove and return every child shape
    pub fn take_children(&mut self) -> Vec<Self> {
        let children = std::mem::take(&mut self.children);
        self.refresh_group();
        children
    }

    // Containment

    /// True if `point`, in this shape's local space, lies inside the shape
    pub fn point_lies_inside(&self, point: &Point2) -> bool {
        match &self.kind {
            ShapeKind::Rectangle => rectangle::contains(self.size(), point),
            ShapeKind::Triangle(triangle) => triangle.contains(point),
            ShapeKind::Ellipse(ellipse) => ellipse.contains(point),
            ShapeKind::Segment(segment) => segment.point_lies_inside(point),
            ShapeKind::Group(_) => false,
        }
    }

    /// True if at least one of the local points lies inside the shape
    pub fn any_point_lies_inside(&self, points: &[Point2]) -> bool {
        points.iter().any(|point| self.point_lies_inside(point))
    }

    /// True if `point`, in the parent's space, lies inside this shape.
    ///
    /// Only this node's own geometry is tested; children are ignored.
    pub fn contains_world_point(&self, point: &Point2) -> bool {
        match self.transform.inverse_model_matrix(true) {
            Ok(inverse) => self.point_lies_inside(&inverse.transform_point(point)),
            Err(err) => {
                log::warn!("Skipping containment test on {}: {}", self.kind.name(), err);
                false
            }
        }
    }

    /// Rebuild the point cache (and derived variant state) from the transform
    fn refresh(&mut self) {
        let size = self.transform.size();
        self.points = match &mut self.kind {
            ShapeKind::Rectangle => rectangle::corner_points(size),
            ShapeKind::Triangle(triangle) => triangle.vertices().to_vec(),
            ShapeKind::Ellipse(ellipse) => {
                ellipse.resize(size);
                ellipse.sample_points()
            }
            ShapeKind::Segment(segment) => segment.points().to_vec(),
            ShapeKind::Group(group) => {
                group.recompute_frame(&self.children);
                Vec::new()
            }
        };
    }

    fn refresh_group(&mut self) {
        if let ShapeKind::Group(group) = &mut self.kind {
            group.recompute_frame(&self.children);
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ShapeKind::Triangle(triangle) => {
                let [a, b, c] = triangle.vertices();
                let origin = self.position();
                write!(
                    f,
                    "Triangle: ({}, {}), ({}, {}), ({}, {})",
                    a.x + origin.x,
                    a.y + origin.y,
                    b.x + origin.x,
                    b.y + origin.y,
                    c.x + origin.x,
                    c.y + origin.y
                )
            }
            ShapeKind::Segment(segment) => {
                let origin = self.position().coords;
                let first = segment.first_point + origin;
                let second = segment.second_point + origin;
                write!(f, "LineSegment ({}, {}) -> ({}, {})", first.x, first.y, second.x, second.y)
            }
            ShapeKind::Group(_) => write!(f, "Group ({} children)", self.children.len()),
            kind => {
                let center = self.center();
                let size = self.size();
                write!(f, "{} ({}, {}) [{} x {}]", kind.name(), center.x, center.y, size.x, size.y)
            }
        }
    }
}
