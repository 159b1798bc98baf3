//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and tolerances
//! - Affine placement of shapes
//! - Logging utilities

pub mod math;
pub mod transform;
pub mod logging;
