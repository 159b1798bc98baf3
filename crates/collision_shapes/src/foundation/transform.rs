//! Affine placement of a shape within its parent
//!
//! A [`Transform`] is pure data: position, anchor, rotation, scale and size.
//! Two model matrices are derived from it:
//!
//! - `model_matrix(true)` maps the shape's own local polygon space into the
//!   parent's space, shifting by the anchor so `position` names the anchor
//!   point of the shape's content box.
//! - `model_matrix(false)` omits the anchor/size term. Children are expressed
//!   relative to the node's origin, rotation and scale only.

use serde::{Deserialize, Serialize};

use super::math::{Mat3, Point2, Rect, Vec2};
use crate::physics::collision::GeometryError;

/// Per-node affine state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformData")]
pub struct Transform {
    /// Location of the anchor point in the parent's space
    pub position: Point2,
    /// Normalized anchor within the content box; (0.5, 0.5) is the center
    pub anchor: Vec2,
    /// Counter-clockwise rotation in radians
    pub rotation: f64,
    /// Scale factors; negative values mirror
    pub scale: Vec2,
    /// Content size, never negative
    size: Vec2,
}

/// Serialized form of [`Transform`]; `size` is clamped on the way in
#[derive(Deserialize)]
struct TransformData {
    position: Point2,
    anchor: Vec2,
    rotation: f64,
    scale: Vec2,
    size: Vec2,
}

impl From<TransformData> for Transform {
    fn from(data: TransformData) -> Self {
        Self::new(data.position, data.anchor, data.rotation, data.scale, data.size)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            anchor: Vec2::new(0.5, 0.5),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            size: Vec2::zeros(),
        }
    }
}

impl Transform {
    /// Create an identity transform with zero size
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with the given size at the origin
    pub fn with_size(size: Vec2) -> Self {
        let mut transform = Self::default();
        transform.set_size(size);
        transform
    }

    /// Create a transform from every component
    pub fn new(position: Point2, anchor: Vec2, rotation: f64, scale: Vec2, size: Vec2) -> Self {
        let mut transform = Self {
            position,
            anchor,
            rotation,
            scale,
            size: Vec2::zeros(),
        };
        transform.set_size(size);
        transform
    }

    /// Content size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Set the content size; negative components are clamped to zero
    pub fn set_size(&mut self, size: Vec2) {
        if size.x < 0.0 || size.y < 0.0 {
            log::warn!("Clamping negative transform size ({}, {}) to zero", size.x, size.y);
        }
        self.size = Vec2::new(size.x.max(0.0), size.y.max(0.0));
    }

    /// Set the same scale on both axes
    pub fn set_uniform_scale(&mut self, scale: f64) {
        self.scale = Vec2::new(scale, scale);
    }

    /// Derive the 2D affine model matrix
    ///
    /// `M = T(position) * R(rotation) * S(scale) * T(-anchor * size)` when
    /// `including_own_extent` is true, otherwise the final anchor term is
    /// dropped.
    pub fn model_matrix(&self, including_own_extent: bool) -> Mat3 {
        let base = Mat3::new_translation(&self.position.coords)
            * Mat3::new_rotation(self.rotation)
            * Mat3::new_nonuniform_scaling(&self.scale);
        if including_own_extent {
            base * Mat3::new_translation(&-self.anchor.component_mul(&self.size))
        } else {
            base
        }
    }

    /// Inverse of [`Transform::model_matrix`]
    ///
    /// Fails for a zero scale on either axis.
    pub fn inverse_model_matrix(&self, including_own_extent: bool) -> Result<Mat3, GeometryError> {
        self.model_matrix(including_own_extent)
            .try_inverse()
            .ok_or(GeometryError::NonInvertibleTransform)
    }

    /// Center of the content box in the parent's space (ignores rotation and scale)
    pub fn center(&self) -> Point2 {
        self.position - (self.anchor - Vec2::new(0.5, 0.5)).component_mul(&self.size)
    }

    /// Move the transform so its content box is centered on `center`
    pub fn set_center(&mut self, center: Point2) {
        self.position = center + (self.anchor - Vec2::new(0.5, 0.5)).component_mul(&self.size);
    }

    /// Axis-aligned content box centered on [`Transform::center`]
    pub fn frame(&self) -> Rect {
        Rect::centered(self.center(), self.size)
    }

    /// Resize and move the transform to cover `frame`
    pub fn set_frame(&mut self, frame: Rect) {
        self.set_size(frame.size);
        self.set_center(frame.center());
    }

    fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Bottom-left corner of the content box
    pub fn bottom_left(&self) -> Point2 {
        self.center() - self.half_size()
    }

    /// Move so the bottom-left corner lands on `point`
    pub fn set_bottom_left(&mut self, point: Point2) {
        self.set_center(point + self.half_size());
    }

    /// Bottom-right corner of the content box
    pub fn bottom_right(&self) -> Point2 {
        let half = self.half_size();
        self.center() + Vec2::new(half.x, -half.y)
    }

    /// Move so the bottom-right corner lands on `point`
    pub fn set_bottom_right(&mut self, point: Point2) {
        let half = self.half_size();
        self.set_center(point + Vec2::new(-half.x, half.y));
    }

    /// Top-right corner of the content box
    pub fn top_right(&self) -> Point2 {
        self.center() + self.half_size()
    }

    /// Move so the top-right corner lands on `point`
    pub fn set_top_right(&mut self, point: Point2) {
        self.set_center(point - self.half_size());
    }

    /// Top-left corner of the content box
    pub fn top_left(&self) -> Point2 {
        let half = self.half_size();
        self.center() + Vec2::new(-half.x, half.y)
    }

    /// Move so the top-left corner lands on `point`
    pub fn set_top_left(&mut self, point: Point2) {
        let half = self.half_size();
        self.set_center(point + Vec2::new(half.x, -half.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position, Point2::origin());
        assert_eq!(transform.anchor, Vec2::new(0.5, 0.5));
        assert_eq!(transform.scale, Vec2::new(1.0, 1.0));
        assert_relative_eq!(transform.model_matrix(true), Mat3::identity());
    }

    #[test]
    fn test_model_matrix_centers_content_on_position() {
        let mut transform = Transform::with_size(Vec2::new(10.0, 4.0));
        transform.position = Point2::new(3.0, 3.0);

        let matrix = transform.model_matrix(true);
        let center = matrix.transform_point(&Point2::new(5.0, 2.0));
        let origin = matrix.transform_point(&Point2::origin());

        assert_relative_eq!(center, Point2::new(3.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(origin, Point2::new(-2.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_child_matrix_omits_extent() {
        let mut transform = Transform::with_size(Vec2::new(10.0, 10.0));
        transform.position = Point2::new(1.0, 2.0);

        let matrix = transform.model_matrix(false);
        let mapped = matrix.transform_point(&Point2::origin());

        assert_relative_eq!(mapped, Point2::new(1.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_then_scale_order() {
        let transform = Transform::new(
            Point2::new(1.0, 0.0),
            Vec2::zeros(),
            PI / 2.0,
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
        );

        // Scale first (x doubled), then rotate a quarter turn, then translate
        let mapped = transform.model_matrix(true).transform_point(&Point2::new(1.0, 0.0));
        assert_relative_eq!(mapped, Point2::new(1.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_negative_scale_mirrors() {
        let mut transform = Transform::identity();
        transform.scale = Vec2::new(-1.0, 1.0);

        let mapped = transform.model_matrix(true).transform_point(&Point2::new(2.0, 3.0));
        assert_relative_eq!(mapped, Point2::new(-2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_round_trip_and_zero_scale() {
        let transform = Transform::new(
            Point2::new(4.0, -2.0),
            Vec2::new(0.25, 0.75),
            0.3,
            Vec2::new(1.5, 0.5),
            Vec2::new(6.0, 2.0),
        );
        let point = Point2::new(0.7, 1.9);
        let forward = transform.model_matrix(true).transform_point(&point);
        let back = transform.inverse_model_matrix(true).unwrap().transform_point(&forward);
        assert_relative_eq!(back, point, epsilon = 1e-10);

        let mut flat = transform;
        flat.scale = Vec2::new(0.0, 1.0);
        assert!(matches!(
            flat.inverse_model_matrix(true),
            Err(GeometryError::NonInvertibleTransform)
        ));
    }

    #[test]
    fn test_center_and_corners() {
        let mut transform = Transform::with_size(Vec2::new(4.0, 2.0));
        transform.anchor = Vec2::zeros();
        transform.position = Point2::new(1.0, 1.0);

        assert_relative_eq!(transform.center(), Point2::new(3.0, 2.0));
        assert_relative_eq!(transform.bottom_left(), Point2::new(1.0, 1.0));
        assert_relative_eq!(transform.top_right(), Point2::new(5.0, 3.0));

        transform.set_top_left(Point2::new(0.0, 0.0));
        assert_relative_eq!(transform.top_left(), Point2::new(0.0, 0.0));
        assert_relative_eq!(transform.position, Point2::new(0.0, -2.0));

        transform.set_bottom_right(Point2::new(10.0, 10.0));
        assert_relative_eq!(transform.bottom_right(), Point2::new(10.0, 10.0));
    }

    #[test]
    fn test_set_frame_and_negative_size() {
        let mut transform = Transform::identity();
        transform.set_frame(Rect::new(Point2::new(2.0, 2.0), Vec2::new(2.0, 6.0)));

        assert_relative_eq!(transform.center(), Point2::new(3.0, 5.0));
        assert_eq!(transform.size(), Vec2::new(2.0, 6.0));

        transform.set_size(Vec2::new(-1.0, 3.0));
        assert_eq!(transform.size(), Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_deserialized_negative_size_is_clamped() {
        let transform: Transform = ron::from_str(
            "(position: (1.0, 2.0), anchor: (0.0, 0.0), rotation: 0.0, scale: (1.0, 1.0), size: (-4.0, 3.0))",
        )
        .unwrap();

        assert_eq!(transform.size(), Vec2::new(0.0, 3.0));
        assert_eq!(transform.position, Point2::new(1.0, 2.0));

        let round_trip: Transform = ron::from_str(&ron::to_string(&transform).unwrap()).unwrap();
        assert_eq!(round_trip, transform);
    }
}
