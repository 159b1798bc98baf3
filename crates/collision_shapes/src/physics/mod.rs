//! Physics module for collision detection and ray casting
//!
//! Provides composable 2D shape trees, a hierarchical overlap test between
//! two trees, reflecting raycasts, and a small world that tracks contacts
//! between registered shapes.

pub mod box_type;
pub mod collision;
pub mod collision_world;
pub mod raycast;

#[cfg(test)]
mod tests;

pub use box_type::BoxType;
pub use collision::{CollisionResult, GeometryError, LineSegment, Shape, ShapeKind};
pub use collision_world::{CollisionWorld, Contact, ContactPair, ShapeHandle};
pub use raycast::{FullRaycastResult, Ray, RaycastResult};
