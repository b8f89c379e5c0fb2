//! # Game Mathematics
//!
//! Integer pixel rectangles used for bounding boxes, collision, and panels.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates.
///
/// The right and bottom edges are exclusive, so two rectangles that merely
/// touch do not intersect.
///
/// # Examples
///
/// ```
/// use wanderer::Rect;
///
/// let a = Rect::new(0, 0, 32, 32);
/// let b = Rect::new(32, 0, 32, 32);
/// assert!(!a.intersects(&b)); // Touching edges only
/// assert!(a.inflate(2, 2).intersects(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of the given size centered on a point.
    ///
    /// Odd sizes round the top-left corner down, matching integer centering.
    pub fn centered_at(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Moves the rectangle so its right edge sits at `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Moves the rectangle so its left edge sits at `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the rectangle so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Moves the rectangle so its top edge sits at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Returns a copy shifted by the given offset.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Returns a copy grown by `dw` horizontally and `dh` vertically in total,
    /// keeping the center in place. Half the growth goes to each side.
    pub fn inflate(&self, dw: i32, dh: i32) -> Self {
        Self::new(self.x - dw / 2, self.y - dh / 2, self.w + dw, self.h + dh)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Self {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Strict overlap test. Empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The overlapping area, or `None` when the rectangles do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// Shifts the rectangle the minimum amount needed to fit inside `bounds`.
    ///
    /// A rectangle larger than `bounds` is aligned to its top-left corner.
    pub fn clamp_within(&self, bounds: &Rect) -> Self {
        let mut clamped = *self;
        if clamped.right() > bounds.right() {
            clamped.set_right(bounds.right());
        }
        if clamped.bottom() > bounds.bottom() {
            clamped.set_bottom(bounds.bottom());
        }
        if clamped.left() < bounds.left() {
            clamped.set_left(bounds.left());
        }
        if clamped.top() < bounds.top() {
            clamped.set_top(bounds.top());
        }
        clamped
    }
}
