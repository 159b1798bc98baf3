//! Primitive line segment geometry and intersection
//!
//! [`LineSegment`] is a lightweight two-point segment independent of any
//! parent space. Every decision about degenerate input (vertical lines,
//! parallel lines) is made by classifying the segment first with
//! [`LineForm`], so no slope division ever happens on a vertical line.

use crate::foundation::math::{approx_eq, points_approx_eq, Mat3, Point2, Rect, Vec2, GEOMETRY_EPSILON};

/// Classification of the infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineForm {
    /// `x = constant`
    Vertical {
        /// Shared x coordinate
        x: f64,
    },
    /// `y = slope * x + intercept`
    Sloped {
        /// Rise over run
        slope: f64,
        /// Value of y at x = 0
        intercept: f64,
    },
}

/// Segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Start point
    pub first_point: Point2,
    /// End point
    pub second_point: Point2,
}

impl LineSegment {
    /// Creates a new segment
    pub fn new(first_point: Point2, second_point: Point2) -> Self {
        Self {
            first_point,
            second_point,
        }
    }

    /// Edges connecting consecutive points, closed with a `last -> first`
    /// edge when the first and last points differ
    pub fn lines_between_points(points: &[Point2]) -> Vec<Self> {
        let mut lines: Vec<Self> = points
            .windows(2)
            .map(|pair| Self::new(pair[0], pair[1]))
            .collect();
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if !points_approx_eq(first, last) {
                lines.push(Self::new(*last, *first));
            }
        }
        lines
    }

    /// Both end points
    pub fn points(&self) -> [Point2; 2] {
        [self.first_point, self.second_point]
    }

    /// Classify the line through this segment
    pub fn form(&self) -> LineForm {
        if self.is_vertical() {
            LineForm::Vertical { x: self.first_point.x }
        } else {
            let delta = self.second_point - self.first_point;
            let slope = delta.y / delta.x;
            LineForm::Sloped {
                slope,
                intercept: self.first_point.y - slope * self.first_point.x,
            }
        }
    }

    /// True if both x coordinates are equal within tolerance
    pub fn is_vertical(&self) -> bool {
        approx_eq(self.first_point.x, self.second_point.x)
    }

    /// Slope, or `None` for vertical segments
    pub fn slope(&self) -> Option<f64> {
        match self.form() {
            LineForm::Vertical { .. } => None,
            LineForm::Sloped { slope, .. } => Some(slope),
        }
    }

    /// Y intercept, or `None` for vertical segments
    pub fn y_intercept(&self) -> Option<f64> {
        match self.form() {
            LineForm::Vertical { .. } => None,
            LineForm::Sloped { intercept, .. } => Some(intercept),
        }
    }

    /// Unit direction from the first to the second point
    pub fn vector(&self) -> Option<Vec2> {
        (self.second_point - self.first_point).try_normalize(GEOMETRY_EPSILON)
    }

    /// Unit perpendicular `(v.y, -v.x)`; which side it faces is up to the caller
    pub fn normal(&self) -> Option<Vec2> {
        self.vector().map(|vector| Vec2::new(vector.y, -vector.x))
    }

    /// Distance between the end points
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.first_point, &self.second_point)
    }

    /// Axis-aligned bounding box
    pub fn frame(&self) -> Rect {
        Rect::from_corners(&self.first_point, &self.second_point)
    }

    /// The segment with both points mapped through `matrix`
    pub fn transformed(&self, matrix: &Mat3) -> Self {
        Self::new(
            matrix.transform_point(&self.first_point),
            matrix.transform_point(&self.second_point),
        )
    }

    /// Value of y on the infinite line at `x`; `None` for vertical segments
    pub fn y_at_x(&self, x: f64) -> Option<f64> {
        match self.form() {
            LineForm::Vertical { .. } => None,
            LineForm::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    /// Point on the infinite line at `x`; `None` for vertical segments
    pub fn point_at_x(&self, x: f64) -> Option<Point2> {
        self.y_at_x(x).map(|y| Point2::new(x, y))
    }

    /// True if `point` lies strictly above the line.
    ///
    /// For vertical lines "above" means strictly to the right.
    pub fn point_lies_above(&self, point: &Point2) -> bool {
        match self.form() {
            LineForm::Vertical { x } => point.x > x,
            LineForm::Sloped { slope, intercept } => point.y - slope * point.x > intercept,
        }
    }

    /// True if `point` lies on the segment within tolerance
    pub fn point_lies_inside(&self, point: &Point2) -> bool {
        if !self.frame().contains_approx(point) {
            return false;
        }
        let delta = self.second_point - self.first_point;
        let cross = delta.perp(&(point - self.first_point));
        cross.abs() <= GEOMETRY_EPSILON * delta.norm().max(1.0)
    }

    /// Intersection point of two segments, or `None` if they don't touch.
    ///
    /// Parallel segments never intersect, even when collinear and
    /// overlapping, unless both are vertical on the same x.
    pub fn collides_with(&self, other: &Self) -> Option<Point2> {
        match (self.form(), other.form()) {
            (LineForm::Vertical { x: x1 }, LineForm::Vertical { x: x2 }) => {
                self.vertical_overlap(other, x1, x2)
            }
            (LineForm::Vertical { x }, LineForm::Sloped { .. }) => other.crossing_at_vertical(self, x),
            (LineForm::Sloped { .. }, LineForm::Vertical { x }) => self.crossing_at_vertical(other, x),
            (
                LineForm::Sloped { slope: slope1, intercept: intercept1 },
                LineForm::Sloped { slope: slope2, intercept: intercept2 },
            ) => {
                if approx_eq(slope1, slope2) {
                    return None;
                }
                let x = (intercept1 - intercept2) / (slope2 - slope1);
                let point = Point2::new(x, slope1 * x + intercept1);
                (self.frame().contains_approx(&point) && other.frame().contains_approx(&point)).then_some(point)
            }
        }
    }

    /// Midpoint of the shared y-interval of two vertical segments
    fn vertical_overlap(&self, other: &Self, x1: f64, x2: f64) -> Option<Point2> {
        if !approx_eq(x1, x2) {
            return None;
        }
        let (self_min, self_max) = min_max(self.first_point.y, self.second_point.y);
        let (other_min, other_max) = min_max(other.first_point.y, other.second_point.y);
        let lower = self_min.max(other_min);
        let upper = self_max.min(other_max);
        if lower > upper + GEOMETRY_EPSILON {
            return None;
        }
        Some(Point2::new(x1, (lower + upper) / 2.0))
    }

    /// Crossing of this sloped segment with a vertical segment at `x`
    fn crossing_at_vertical(&self, vertical: &Self, x: f64) -> Option<Point2> {
        let point = self.point_at_x(x)?;
        let straddles =
            self.point_lies_above(&vertical.first_point) != self.point_lies_above(&vertical.second_point);
        (straddles && self.frame().contains_approx(&point)).then_some(point)
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
