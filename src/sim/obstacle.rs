//! Level obstacles: static blocks, one-way ledges and moving platforms

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::WAYPOINT_EPSILON;

/// Waypoint cycle for a moving platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPath {
    pub waypoints: Vec<Vec2>,
    /// Travel speed (pixels/s)
    pub speed: f32,
    /// Index of the waypoint currently travelled toward
    pub target: usize,
    /// Sub-pixel top-left position
    pub pos: Vec2,
}

impl MovingPath {
    /// Start at the first waypoint heading for the second
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> Self {
        let pos = waypoints.first().copied().unwrap_or(Vec2::ZERO);
        Self {
            waypoints,
            speed,
            target: 1,
            pos,
        }
    }

    fn next_target(&mut self) {
        self.target = (self.target + 1) % self.waypoints.len();
    }

    /// Advance along the path by `speed * dt`, never overshooting a waypoint.
    /// Paths with fewer than two waypoints stay put.
    pub fn advance(&mut self, dt: f32) {
        if self.waypoints.len() < 2 {
            return;
        }
        // Out-of-range target can only come from hand-edited data
        if self.target >= self.waypoints.len() {
            self.target = 0;
        }

        let target_pos = self.waypoints[self.target];
        let to_target = target_pos - self.pos;
        let dist = to_target.length();
        if dist < WAYPOINT_EPSILON {
            self.next_target();
            return;
        }

        let step = self.speed * dt;
        if step >= dist {
            self.pos = target_pos;
            self.next_target();
        } else {
            self.pos += to_target / dist * step;
        }
    }
}

/// Obstacle behaviour, dispatched in the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Blocks from every side
    Static,
    /// Blocks only downward landings from above
    OneWay,
    /// Blocks from every side and follows a waypoint cycle
    Moving(MovingPath),
}

/// A rectangle the actor can collide with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Non-solid obstacles never take part in collision
    pub solid: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(id: u32, rect: Rect, kind: ObstacleKind) -> Self {
        let mut obstacle = Self {
            id,
            rect,
            solid: true,
            kind,
        };
        obstacle.sync_rect();
        obstacle
    }

    pub fn is_one_way(&self) -> bool {
        matches!(self.kind, ObstacleKind::OneWay)
    }

    /// Advance any motion this obstacle has
    pub fn update(&mut self, dt: f32) {
        if let ObstacleKind::Moving(path) = &mut self.kind {
            path.advance(dt);
            self.sync_rect();
        }
    }

    /// Snap the rect's top-left to the truncated path position
    fn sync_rect(&mut self) {
        if let ObstacleKind::Moving(path) = &self.kind {
            self.rect
                .set_top_left(IVec2::new(path.pos.x as i32, path.pos.y as i32));
        }
    }
}
