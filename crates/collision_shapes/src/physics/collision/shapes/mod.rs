//! Concrete shape variants
//!
//! Each variant module holds the variant's geometry and the [`Shape`]
//! constructors that build it.
//!
//! [`Shape`]: super::Shape

pub mod rectangle;
pub mod triangle;
pub mod ellipse;
pub mod segment;
pub mod group;

pub use ellipse::{Ellipse, DEFAULT_ELLIPSE_SAMPLES};
pub use group::Group;
pub use triangle::Triangle;
