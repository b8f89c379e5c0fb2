//! # Camera
//!
//! Viewport offset that follows the player without showing past the map edge.

use crate::Rect;
use serde::{Deserialize, Serialize};

/// Top-left corner of the visible window, in map pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    /// Viewport size in pixels
    pub view_width: i32,
    pub view_height: i32,
}

impl Camera {
    pub fn new(view_width: i32, view_height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            view_width,
            view_height,
        }
    }

    /// Centers the view on `target`, clamped so it never extends past the
    /// map's right/bottom edge nor starts before the origin.
    ///
    /// A map smaller than the viewport pins the camera at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::{Camera, Rect};
    ///
    /// let mut camera = Camera::new(800, 600);
    /// camera.follow(&Rect::new(86, 86, 28, 28), 1600, 1280);
    /// assert_eq!((camera.x, camera.y), (0, 0));
    /// ```
    pub fn follow(&mut self, target: &Rect, map_width: i32, map_height: i32) {
        self.x = Self::clamp_axis(target.center_x() - self.view_width / 2, map_width - self.view_width);
        self.y =
            Self::clamp_axis(target.center_y() - self.view_height / 2, map_height - self.view_height);
    }

    fn clamp_axis(desired: i32, max: i32) -> i32 {
        desired.min(max).max(0)
    }

    /// The visible area in map pixels.
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.view_width, self.view_height)
    }

    /// Converts a map-space rectangle to screen space.
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translate(-self.x, -self.y)
    }
}
