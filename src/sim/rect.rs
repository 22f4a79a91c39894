//! Integer axis-aligned rectangles
//!
//! Screen-style coordinates: +x right, +y down. `bottom` and `right` are
//! exclusive edges (`y + h`, `x + w`).

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Move horizontally so the left edge sits at `v`
    #[inline]
    pub fn set_left(&mut self, v: i32) {
        self.x = v;
    }

    /// Move horizontally so the right edge sits at `v`
    #[inline]
    pub fn set_right(&mut self, v: i32) {
        self.x = v - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, v: i32) {
        self.y = v;
    }

    #[inline]
    pub fn set_bottom(&mut self, v: i32) {
        self.y = v - self.h;
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn set_top_left(&mut self, pos: IVec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Center point (integer division, like pixel rects)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Strict overlap test. Touching edges do not count.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Copy translated by `offset`
    pub fn translated(&self, offset: IVec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}
