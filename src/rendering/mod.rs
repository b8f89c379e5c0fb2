//! # Rendering Module
//!
//! 2D drawing with macroquad: the scrolling map view and the dialog and
//! battle overlays.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
