//! Ellipse shapes
//!
//! The boundary is sampled at `sample_count` equal angular steps around the
//! center of the content box. Containment uses the focal-distance rule: a
//! point is inside iff the sum of its distances to the two foci does not
//! exceed the major axis length.

use std::f64::consts::TAU;

use crate::config::GeometryConfig;
use crate::foundation::math::{Point2, Vec2, GEOMETRY_EPSILON};
use crate::foundation::transform::Transform;
use crate::physics::collision::shape::{Shape, ShapeKind};
use crate::physics::collision::GeometryError;

/// Boundary samples used when no count is given
pub const DEFAULT_ELLIPSE_SAMPLES: usize = 8;

/// Smallest sample count that still encloses an area
const MIN_ELLIPSE_SAMPLES: usize = 3;

/// Ellipse inscribed in its shape's content box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    semi_axes: Vec2,
    sample_count: usize,
}

impl Ellipse {
    fn new(size: Vec2, sample_count: usize) -> Result<Self, GeometryError> {
        if sample_count < MIN_ELLIPSE_SAMPLES {
            return Err(GeometryError::InvalidSampleCount(sample_count));
        }
        Ok(Self {
            semi_axes: size / 2.0,
            sample_count,
        })
    }

    /// Horizontal semi-axis
    pub fn a(&self) -> f64 {
        self.semi_axes.x
    }

    /// Vertical semi-axis
    pub fn b(&self) -> f64 {
        self.semi_axes.y
    }

    /// Number of boundary samples
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Center in local space
    pub fn center(&self) -> Point2 {
        Point2::from(self.semi_axes)
    }

    fn major(&self) -> f64 {
        self.a().max(self.b())
    }

    /// Distance from the center to each focus
    fn focal_distance(&self) -> f64 {
        let (a, b) = (self.a(), self.b());
        (a * a - b * b).abs().sqrt()
    }

    /// Eccentricity in `[0, 1)`; zero for circles and empty ellipses
    pub fn eccentricity(&self) -> f64 {
        let major = self.major();
        if major <= GEOMETRY_EPSILON {
            0.0
        } else {
            self.focal_distance() / major
        }
    }

    /// The two foci in local space, on the major axis
    pub fn foci(&self) -> [Point2; 2] {
        let c = self.focal_distance();
        let offset = if self.a() > self.b() {
            Vec2::new(c, 0.0)
        } else {
            Vec2::new(0.0, c)
        };
        let center = self.center();
        [center + offset, center - offset]
    }

    /// Boundary point at `angle` radians from the center
    pub fn point_for_angle(&self, angle: f64) -> Point2 {
        let (a, b) = (self.a(), self.b());
        let (sine, cosine) = angle.sin_cos();
        if a <= GEOMETRY_EPSILON || b <= GEOMETRY_EPSILON {
            // Flat ellipse: polar radius is undefined, fall back to the parametric form
            return self.center() + Vec2::new(a * cosine, b * sine);
        }
        let radius = 1.0 / (cosine * cosine / (a * a) + sine * sine / (b * b)).sqrt();
        self.center() + Vec2::new(cosine, sine) * radius
    }

    /// Focal-sum containment test in local space (boundary inclusive)
    pub fn contains(&self, point: &Point2) -> bool {
        let distance: f64 = self
            .foci()
            .iter()
            .map(|focus| nalgebra::distance(focus, point))
            .sum();
        distance <= 2.0 * self.major() + GEOMETRY_EPSILON
    }

    pub(crate) fn resize(&mut self, size: Vec2) {
        self.semi_axes = size / 2.0;
    }

    pub(crate) fn set_sample_count(&mut self, sample_count: usize) -> Result<(), GeometryError> {
        if sample_count < MIN_ELLIPSE_SAMPLES {
            return Err(GeometryError::InvalidSampleCount(sample_count));
        }
        self.sample_count = sample_count;
        Ok(())
    }

    pub(crate) fn sample_points(&self) -> Vec<Point2> {
        (0..self.sample_count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = i as f64 / self.sample_count as f64 * TAU;
                self.point_for_angle(angle)
            })
            .collect()
    }
}

impl Shape {
    /// Ellipse inscribed in `size`, centered on the origin, with the default sample count
    pub fn ellipse(size: Vec2) -> Self {
        let ellipse = Ellipse {
            semi_axes: size / 2.0,
            sample_count: DEFAULT_ELLIPSE_SAMPLES,
        };
        Self::from_parts(Transform::with_size(size), ShapeKind::Ellipse(ellipse))
    }

    /// Ellipse inscribed in `size` with an explicit boundary sample count
    pub fn ellipse_with_samples(size: Vec2, sample_count: usize) -> Result<Self, GeometryError> {
        let ellipse = Ellipse::new(size, sample_count)?;
        Ok(Self::from_parts(Transform::with_size(size), ShapeKind::Ellipse(ellipse)))
    }

    /// Ellipse inscribed in `size`, sampled as configured
    pub fn ellipse_from_config(size: Vec2, config: &GeometryConfig) -> Result<Self, GeometryError> {
        Self::ellipse_with_samples(size, config.ellipse_sample_count)
    }

    /// Ellipse with semi-axes `a` (horizontal) and `b` (vertical) centered on `center`
    pub fn ellipse_at(center: Point2, a: f64, b: f64) -> Self {
        let mut shape = Self::ellipse(Vec2::new(2.0 * a, 2.0 * b));
        shape.set_center(center);
        shape
    }

    /// Circle of the given radius centered on the origin
    pub fn circle(radius: f64) -> Self {
        Self::ellipse(Vec2::new(2.0 * radius, 2.0 * radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ellipse_of(shape: &Shape) -> Ellipse {
        match shape.kind() {
            ShapeKind::Ellipse(ellipse) => *ellipse,
            other => panic!("expected an ellipse, found {}", other.name()),
        }
    }

    #[test]
    fn test_focal_rule_boundary_is_inclusive() {
        let shape = Shape::ellipse_at(Point2::origin(), 5.0, 3.0);
        let ellipse = ellipse_of(&shape);

        assert_relative_eq!(ellipse.eccentricity(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(ellipse.foci()[0], Point2::new(9.0, 3.0));

        // Local space is offset by the semi-axes
        assert!(shape.point_lies_inside(&Point2::new(10.0, 3.0)));
        assert!(!shape.point_lies_inside(&Point2::new(11.0, 3.0)));

        // Relative to the world origin the same points read (5, 0) and (6, 0)
        assert!(shape.contains_world_point(&Point2::new(5.0, 0.0)));
        assert!(!shape.contains_world_point(&Point2::new(6.0, 0.0)));
        assert!(shape.contains_world_point(&Point2::new(0.0, 3.0)));
        assert!(!shape.contains_world_point(&Point2::new(0.0, 3.1)));
    }

    #[test]
    fn test_tall_ellipse_foci_on_vertical_axis() {
        let shape = Shape::ellipse(Vec2::new(6.0, 10.0));
        let ellipse = ellipse_of(&shape);
        let [upper, lower] = ellipse.foci();

        assert_relative_eq!(upper, Point2::new(3.0, 9.0));
        assert_relative_eq!(lower, Point2::new(3.0, 1.0));
        assert!(shape.point_lies_inside(&Point2::new(3.0, 10.0)));
        assert!(!shape.point_lies_inside(&Point2::new(6.0, 10.0)));
    }

    #[test]
    fn test_default_sample_count_and_points_on_boundary() {
        let shape = Shape::ellipse(Vec2::new(10.0, 6.0));
        let ellipse = ellipse_of(&shape);

        assert_eq!(shape.points().len(), DEFAULT_ELLIPSE_SAMPLES);
        assert_relative_eq!(shape.points()[0], Point2::new(10.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(shape.points()[2], Point2::new(5.0, 6.0), epsilon = 1e-12);

        for point in shape.points() {
            let offset = point - ellipse.center();
            let value = (offset.x / 5.0).powi(2) + (offset.y / 3.0).powi(2);
            assert_relative_eq!(value, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_points_regenerate_on_resize_and_sample_change() {
        let mut shape = Shape::circle(1.0);
        shape.set_size(Vec2::new(4.0, 4.0));
        assert_relative_eq!(shape.points()[0], Point2::new(4.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(ellipse_of(&shape).a(), 2.0);

        shape.set_ellipse_samples(16).unwrap();
        assert_eq!(shape.points().len(), 16);

        let err = shape.set_ellipse_samples(2).unwrap_err();
        assert_eq!(err, GeometryError::InvalidSampleCount(2));
        assert_eq!(shape.points().len(), 16);
    }

    #[test]
    fn test_sample_count_from_config() {
        let config = GeometryConfig {
            ellipse_sample_count: 12,
            ..GeometryConfig::default()
        };
        let shape = Shape::ellipse_from_config(Vec2::new(2.0, 2.0), &config).unwrap();
        assert_eq!(shape.points().len(), 12);

        assert!(Shape::ellipse_with_samples(Vec2::new(2.0, 2.0), 0).is_err());
    }

    #[test]
    fn test_flat_ellipse_has_finite_points() {
        let shape = Shape::ellipse(Vec2::new(4.0, 0.0));

        assert!(shape
            .points()
            .iter()
            .all(|point| point.x.is_finite() && point.y.is_finite()));
        assert_relative_eq!(ellipse_of(&shape).eccentricity(), 1.0);
    }
}
