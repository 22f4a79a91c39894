//! Camera that follows the actor

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A viewport into world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub width: i32,
    pub height: i32,
    /// World position of the viewport's top-left corner
    pub offset: IVec2,
}

impl Camera {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            offset: IVec2::ZERO,
        }
    }

    /// Center the viewport on a world point
    pub fn set_center(&mut self, center: IVec2) {
        self.offset = center - IVec2::new(self.width / 2, self.height / 2);
    }

    /// Convert a world rect to screen space
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.translated(-self.offset)
    }

    /// Viewport in world space
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view_rect().intersects(rect)
    }
}
