//! # Utilities Module
//!
//! Geometry and frame timing helpers shared by the game systems.

pub mod math;
pub mod timing;

pub use math::*;
pub use timing::*;
