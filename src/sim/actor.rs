//! The controllable actor and its velocity integration
//!
//! Each frame converts player intent plus elapsed time into an updated
//! velocity and a provisional whole-pixel position. Collision correction
//! happens afterwards in `collision::resolve`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::ActorTuning;

/// Which kind of jump fired this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Launched from the ground, air-jump budget untouched
    Ground,
    /// Spent one of the remaining air jumps
    Air,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub rect: Rect,
    /// Velocity in pixels/s (+y is down)
    pub vel: Vec2,
    /// Resting on a solid surface after the last vertical pass
    pub on_ground: bool,
    /// Air jumps left before the next landing
    pub jumps_remaining: u32,
    pub tuning: ActorTuning,
}

impl Actor {
    pub fn new(pos: IVec2, tuning: ActorTuning) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, ACTOR_WIDTH, ACTOR_HEIGHT),
            vel: Vec2::ZERO,
            on_ground: false,
            jumps_remaining: AIR_JUMPS,
            tuning,
        }
    }

    /// Horizontal speed the actor is steering toward
    pub fn desired_vx(&self, left: bool, right: bool) -> f32 {
        match (left, right) {
            (true, false) => -self.tuning.max_speed,
            (false, true) => self.tuning.max_speed,
            _ => 0.0,
        }
    }

    /// Integrate one frame of input.
    ///
    /// `jump_pressed` is the edge (pressed this frame), `jump_held` the level.
    /// Returns the jump that fired, if any. `dt` must be positive.
    pub fn apply_input(
        &mut self,
        left: bool,
        right: bool,
        jump_pressed: bool,
        jump_held: bool,
        dt: f32,
    ) -> Option<JumpKind> {
        debug_assert!(dt > 0.0, "dt must be positive, got {dt}");
        let t = &self.tuning;

        // Accelerate toward the desired speed without overshooting it
        let desired = self.desired_vx(left, right);
        let max_delta = t.accel * dt;
        self.vel.x += (desired - self.vel.x).clamp(-max_delta, max_delta);

        // Gravity, capped on the way down only
        self.vel.y = (self.vel.y + t.gravity * dt).min(t.terminal_velocity);

        let mut jumped = None;
        if jump_pressed && (self.on_ground || self.jumps_remaining > 0) {
            self.vel.y = -t.jump_speed;
            if self.on_ground {
                jumped = Some(JumpKind::Ground);
            } else {
                self.jumps_remaining -= 1;
                jumped = Some(JumpKind::Air);
            }
            self.on_ground = false;
        }

        // Releasing jump early cuts the ascent short
        if !jump_held && self.vel.y < 0.0 {
            self.vel.y += t.gravity * t.jump_cut_factor * dt;
        }

        // Sub-pixel remainder is dropped every frame. The x step truncates
        // so left and right lose the same fraction; y floors so resting
        // contact at negative y does not creep into the surface below.
        self.rect.x += (self.vel.x * dt) as i32;
        self.rect.y = (self.rect.y as f32 + self.vel.y * dt).floor() as i32;

        jumped
    }

    /// Put the actor back at `pos` at rest
    pub fn reset_to(&mut self, pos: IVec2) {
        self.rect.set_top_left(pos);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jumps_remaining = AIR_JUMPS;
    }
}
