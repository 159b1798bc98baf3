//! # Collision Shapes
//!
//! Composable 2D collision geometry for games.
//!
//! ## Features
//!
//! - **Shape Trees**: Rectangles, triangles, ellipses, line segments and groups,
//!   each placed by its own transform relative to its parent
//! - **Hierarchical Collision**: Overlap tests between two whole trees, reporting
//!   the first colliding pair and a contact point
//! - **Reflecting Raycasts**: Closest-hit rays, multi-bounce chains and
//!   length-bounded chains
//! - **Collision World**: Registered shapes with hit/hurt filtering and
//!   started/ended contact tracking
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_shapes::prelude::*;
//!
//! let wall = Shape::segment(Point2::new(5.0, -1.0), Point2::new(5.0, 1.0));
//! let crate_box = Shape::rectangle_at(Point2::new(5.0, 0.0), Vec2::new(2.0, 2.0));
//! assert!(wall.intersects(&crate_box));
//!
//! let ray = Ray::new(Point2::origin(), Vec2::new(1.0, 0.0))?;
//! let hit = ray.raycast(&wall).expect("ray points at the wall");
//! assert!((hit.length - 5.0).abs() < 1e-9);
//! # Ok::<(), GeometryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::many_single_char_names)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, GeometryConfig, RaycastConfig},
        foundation::{
            math::{Mat3, Point2, Rect, Vec2},
            transform::Transform,
        },
        physics::{
            BoxType, CollisionResult, CollisionWorld, Contact, ContactPair, FullRaycastResult, GeometryError,
            LineSegment, Ray, RaycastResult, Shape, ShapeHandle, ShapeKind,
        },
    };
}
