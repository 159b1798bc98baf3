//! Ray casting with specular reflection
//!
//! A [`Ray`] starts at an origin and extends forever along a unit direction.
//! Casting it against a shape tree composes each node's model matrix (the
//! same extent/no-extent split used by collision detection), maps the node's
//! closed edge list into world space and keeps the closest hit.
//!
//! Hits closer than [`RAY_EPSILON`] in front of the origin are rejected, so a
//! reflected ray never re-hits the surface it just left.

use crate::config::RaycastConfig;
use crate::foundation::math::{
    angle_of, approx_eq, is_between, sign, unit_from_angle, Mat3, Point2, Unit, Vec2, GEOMETRY_EPSILON,
    RAY_EPSILON, REFLECTION_ANGLE_EPSILON,
};
use crate::physics::collision::{GeometryError, LineForm, LineSegment, Shape};

/// Half-line from `origin` along a unit `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point2,
    direction: Unit<Vec2>,
}

impl Ray {
    /// Ray starting at `origin`, heading along `direction` (normalized here)
    pub fn new(origin: Point2, direction: Vec2) -> Result<Self, GeometryError> {
        let Some(direction) = Unit::try_new(direction, GEOMETRY_EPSILON) else {
            log::warn!("Rejecting ray from ({}, {}) with a zero-length direction", origin.x, origin.y);
            return Err(GeometryError::DegenerateDirection);
        };
        Ok(Self { origin, direction })
    }

    /// Ray starting at `from` and passing through `through`
    pub fn through(from: Point2, through: Point2) -> Result<Self, GeometryError> {
        Self::new(from, through - from)
    }

    fn from_unit(origin: Point2, direction: Unit<Vec2>) -> Self {
        Self { origin, direction }
    }

    /// Start point
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Unit direction
    pub fn direction(&self) -> Vec2 {
        self.direction.into_inner()
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction.into_inner() * t
    }

    /// Unit-length segment from the origin along the direction
    pub fn segment(&self) -> LineSegment {
        LineSegment::new(self.origin, self.point_at(1.0))
    }

    /// Closest hit against one shape tree
    pub fn raycast<'a>(&self, shape: &'a Shape) -> Option<RaycastResult<'a>> {
        self.raycast_recursive(shape, &Mat3::identity())
    }

    /// Closest hit among several shape trees
    pub fn raycast_all<'a, I>(&self, shapes: I) -> Option<RaycastResult<'a>>
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        shapes
            .into_iter()
            .filter_map(|shape| self.raycast(shape))
            .min_by(|a, b| a.length.total_cmp(&b.length))
    }

    /// Follow the ray through successive bounces.
    ///
    /// Stops when nothing is hit or after `max_reflections` hits; zero
    /// reflections returns no hits at all.
    pub fn reflecting_raycast<'a, I>(&self, max_reflections: usize, shapes: I) -> Vec<RaycastResult<'a>>
    where
        I: IntoIterator<Item = &'a Shape> + Clone,
    {
        let mut hits = Vec::new();
        let mut ray = *self;
        while hits.len() < max_reflections {
            let Some(hit) = ray.raycast_all(shapes.clone()) else {
                break;
            };
            log::trace!(
                "Ray hit {} at ({}, {})",
                hit.shape.kind().name(),
                hit.collision_point.x,
                hit.collision_point.y
            );
            ray = hit.reflect();
            hits.push(hit);
        }
        log::debug!("Reflecting raycast stopped after {} hits", hits.len());
        hits
    }

    /// [`Ray::reflecting_raycast`] bounded by `config.max_reflections`
    pub fn reflecting_raycast_with_config<'a, I>(&self, config: &RaycastConfig, shapes: I) -> Vec<RaycastResult<'a>>
    where
        I: IntoIterator<Item = &'a Shape> + Clone,
    {
        self.reflecting_raycast(config.max_reflections, shapes)
    }

    /// Reflection chain cut to a total travelled length of `max_length`.
    ///
    /// The segment that crosses the budget is truncated and records no hit.
    /// If the chain ends early because the ray escaped, one more segment is
    /// appended along the escaping direction covering the remaining length.
    /// A chain that used all `max_reflections` gets no extra segment.
    /// A `max_length` that is not positive yields no segments.
    pub fn full_raycast<'a, I>(&self, max_length: f64, max_reflections: usize, shapes: I) -> Vec<FullRaycastResult<'a>>
    where
        I: IntoIterator<Item = &'a Shape> + Clone,
    {
        if max_length.is_nan() || max_length <= 0.0 {
            log::warn!("Full raycast with non-positive length {max_length}");
            return Vec::new();
        }
        let hits = self.reflecting_raycast(max_reflections, shapes);
        let mut remaining = max_length;
        let mut results = Vec::with_capacity(hits.len() + 1);

        for hit in &hits {
            results.push(FullRaycastResult::from(*hit).clamp_length(remaining));
            remaining -= hit.length;
            if remaining <= 0.0 {
                return results;
            }
        }

        if remaining <= 0.0 || hits.len() >= max_reflections {
            return results;
        }

        let escaping = hits.last().map_or(*self, RaycastResult::reflect);
        results.push(FullRaycastResult::unobstructed(escaping, remaining));
        results
    }

    /// [`Ray::full_raycast`] bounded by `config`
    pub fn full_raycast_with_config<'a, I>(&self, config: &RaycastConfig, shapes: I) -> Vec<FullRaycastResult<'a>>
    where
        I: IntoIterator<Item = &'a Shape> + Clone,
    {
        self.full_raycast(config.max_length, config.max_reflections, shapes)
    }

    fn raycast_recursive<'a>(&self, shape: &'a Shape, parent: &Mat3) -> Option<RaycastResult<'a>> {
        let model = parent * shape.transform().model_matrix(true);
        let own = LineSegment::lines_between_points(shape.points())
            .into_iter()
            .filter_map(|edge| self.hit_edge(&edge.transformed(&model)))
            .map(|(point, normal)| self.result(point, normal, shape));

        let child_parent = parent * shape.transform().model_matrix(false);
        let children = shape
            .children()
            .iter()
            .filter_map(|child| self.raycast_recursive(child, &child_parent));

        own.chain(children).min_by(|a, b| a.length.total_cmp(&b.length))
    }

    fn result<'a>(&self, point: Point2, normal: Vec2, shape: &'a Shape) -> RaycastResult<'a> {
        RaycastResult {
            ray: *self,
            collision_point: point,
            length: nalgebra::distance(&self.origin, &point),
            normal,
            shape,
        }
    }

    /// Hit point and incoming-facing normal against one world-space edge
    fn hit_edge(&self, edge: &LineSegment) -> Option<(Point2, Vec2)> {
        let normal = edge.normal()?;
        let direction = self.direction();
        let ahead = |point: &Point2| (point - self.origin).dot(&direction) > RAY_EPSILON;

        match (self.segment().form(), edge.form()) {
            (LineForm::Vertical { x }, LineForm::Vertical { x: edge_x }) => {
                if (x - edge_x).abs() >= RAY_EPSILON {
                    return None;
                }
                self.nearer_end_ahead(edge).map(|point| (point, self.facing(normal)))
            }
            (LineForm::Vertical { x }, LineForm::Sloped { .. }) => {
                if !is_between(x, edge.first_point.x, edge.second_point.x) {
                    return None;
                }
                let point = edge.point_at_x(x)?;
                ((point.y - self.origin.y) / direction.y > RAY_EPSILON).then(|| (point, self.facing(normal)))
            }
            (LineForm::Sloped { slope, intercept }, LineForm::Vertical { x }) => {
                let point = Point2::new(x, slope * x + intercept);
                (is_between(point.y, edge.first_point.y, edge.second_point.y) && ahead(&point))
                    .then(|| (point, self.facing(normal)))
            }
            (
                LineForm::Sloped { slope, intercept },
                LineForm::Sloped {
                    slope: edge_slope,
                    intercept: edge_intercept,
                },
            ) => {
                if approx_eq(slope, edge_slope) {
                    return approx_eq(intercept, edge_intercept)
                        .then(|| self.nearer_end_ahead(edge))
                        .flatten()
                        .map(|point| (point, self.facing(normal)));
                }
                let x = (intercept - edge_intercept) / (edge_slope - slope);
                let point = Point2::new(x, slope * x + intercept);
                (ahead(&point) && edge.frame().contains_approx(&point)).then(|| (point, self.facing(normal)))
            }
        }
    }

    /// Closer end point of an edge lying on the ray's line, if one is in front
    fn nearer_end_ahead(&self, edge: &LineSegment) -> Option<Point2> {
        let direction = self.direction();
        let distance = |point: &Point2| (point - self.origin).dot(&direction);
        [edge.first_point, edge.second_point]
            .into_iter()
            .filter(|point| distance(point) > RAY_EPSILON)
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
    }

    /// Orient `normal` against the ray's direction
    fn facing(&self, normal: Vec2) -> Vec2 {
        if normal.dot(&self.direction()) > 0.0 {
            -normal
        } else {
            normal
        }
    }
}

/// Closest hit of a ray against a shape
#[derive(Debug, Clone, Copy)]
pub struct RaycastResult<'a> {
    /// The ray that was cast
    pub ray: Ray,
    /// World-space hit point
    pub collision_point: Point2,
    /// Distance from the ray origin to the hit point
    pub length: f64,
    /// Unit surface normal facing the incoming ray
    pub normal: Vec2,
    /// The node whose edge was hit
    pub shape: &'a Shape,
}

impl RaycastResult<'_> {
    /// Outgoing ray mirrored around the surface normal, starting at the hit point.
    ///
    /// The angle between the reversed incoming direction and the normal is
    /// kept on the other side of the normal.
    pub fn reflect(&self) -> Ray {
        let reversed = -self.ray.direction();
        let angle_to_normal = reversed.dot(&self.normal).clamp(-1.0, 1.0).acos().abs();
        let normal_angle = angle_of(&self.normal);
        let delta = normal_angle - angle_of(&reversed);

        // A delta that disagrees with the true angle wrapped through +-PI
        let direction = if (delta.abs() - angle_to_normal).abs() < REFLECTION_ANGLE_EPSILON {
            sign(delta)
        } else {
            -sign(delta)
        };

        Ray::from_unit(
            self.collision_point,
            unit_from_angle(normal_angle + direction * angle_to_normal),
        )
    }
}

/// One leg of a length-bounded reflection chain
///
/// `normal` and `shape` are `None` for a leg that ends before reaching any
/// surface.
#[derive(Debug, Clone, Copy)]
pub struct FullRaycastResult<'a> {
    /// The ray this leg travels along
    pub ray: Ray,
    /// End point of the leg
    pub collision_point: Point2,
    /// Length of the leg
    pub length: f64,
    /// Surface normal at the end point, if a surface was reached
    pub normal: Option<Vec2>,
    /// The node hit, if a surface was reached
    pub shape: Option<&'a Shape>,
}

impl<'a> FullRaycastResult<'a> {
    fn unobstructed(ray: Ray, length: f64) -> Self {
        Self {
            ray,
            collision_point: ray.point_at(length),
            length,
            normal: None,
            shape: None,
        }
    }

    /// Truncate the leg to `max_length`, dropping the hit if it is cut short
    #[must_use]
    pub fn clamp_length(self, max_length: f64) -> Self {
        if self.length <= max_length {
            self
        } else {
            Self::unobstructed(self.ray, max_length)
        }
    }

    /// True if this leg ended on a shape
    pub fn is_hit(&self) -> bool {
        self.shape.is_some()
    }
}

impl<'a> From<RaycastResult<'a>> for FullRaycastResult<'a> {
    fn from(result: RaycastResult<'a>) -> Self {
        Self {
            ray: result.ray,
            collision_point: result.collision_point,
            length: result.length,
            normal: Some(result.normal),
            shape: Some(result.shape),
        }
    }
}
