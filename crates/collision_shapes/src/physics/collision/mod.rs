//! Hierarchical 2D collision detection
//!
//! Shapes are stored in MODEL SPACE and composed into a common frame only
//! while a test runs: each recursive step carries the accumulated parent
//! matrices of both trees on the call stack.
//!
//! # Module Organization
//!
//! - [`primitives`] - Line segment geometry and pairwise intersection
//! - [`shape`] - The shape node and its variant enum
//! - [`shapes`] - Concrete variants (rectangle, triangle, ellipse, segment, group)
//! - [`detection`] - Recursive shape-vs-shape test and [`CollisionResult`]
//!
//! # Key Types
//!
//! - [`Shape`] - One node of a shape tree
//! - [`LineSegment`] - Two-point primitive used for edges
//! - [`CollisionResult`] - The first colliding pair found and the contact point

pub mod primitives;
pub mod shape;
pub mod shapes;
pub mod detection;
mod error;

// Re-export commonly used types
pub use detection::CollisionResult;
pub use error::GeometryError;
pub use primitives::{LineForm, LineSegment};
pub use shape::{Shape, ShapeKind};
pub use shapes::{Ellipse, Group, Triangle, DEFAULT_ELLIPSE_SAMPLES};
