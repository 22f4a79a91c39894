//! Game state and gameplay entities
//!
//! Everything a frame mutates lives in `GameState`, threaded explicitly
//! through `tick`. No ambient globals.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, JumpKind};
use super::camera::Camera;
use super::obstacle::Obstacle;
use super::rect::Rect;

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Rect,
    pub value: u32,
}

/// An enemy patrolling horizontally between two x bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Patrol bounds on `rect.x` (either order)
    pub patrol: (i32, i32),
    pub speed: f32,
    /// Current horizontal velocity (pixels/s)
    pub vx: f32,
}

impl Enemy {
    pub fn new(id: u32, rect: Rect, patrol: (i32, i32), speed: f32) -> Self {
        Self {
            id,
            rect,
            patrol,
            speed,
            vx: speed,
        }
    }

    /// Walk and bounce off the patrol bounds
    pub fn update(&mut self, dt: f32) {
        let lo = self.patrol.0.min(self.patrol.1);
        let hi = self.patrol.0.max(self.patrol.1);

        self.rect.x += (self.vx * dt) as i32;
        if self.rect.x < lo {
            self.rect.x = lo;
            self.vx = self.speed.abs();
        } else if self.rect.x > hi {
            self.rect.x = hi;
            self.vx = -self.speed.abs();
        }
    }
}

/// Something the frame produced that the caller may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped(JumpKind),
    Landed,
    /// Stopped by a wall this frame
    Blocked,
    /// Hit a ceiling while rising
    Bonked,
    CoinCollected { id: u32, value: u32 },
    EnemyContact { id: u32 },
    Respawned,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub actor: Actor,
    /// Obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    /// Remaining coins (sorted by id for determinism)
    pub coins: Vec<Coin>,
    /// Enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    /// Where the actor reappears after enemy contact
    pub spawn: IVec2,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Coin ids collected this frame, removed once the pickup pass is done
    #[serde(skip)]
    pending_removal: Vec<u32>,
    /// Was the actor grounded at the end of the previous frame
    #[serde(default)]
    was_grounded: bool,
    next_id: u32,
}

impl GameState {
    /// Create a state with the actor at `spawn` and nothing else in the world
    pub fn new(actor: Actor, camera: Camera) -> Self {
        let spawn = actor.rect.top_left();
        let mut state = Self {
            actor,
            obstacles: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            camera,
            spawn,
            score: 0,
            time_ticks: 0,
            pending_removal: Vec::new(),
            was_grounded: false,
            next_id: 1,
        };
        state.follow_actor();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a coin for removal at the end of the current pass
    pub fn mark_coin_collected(&mut self, id: u32) {
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
    }

    /// Drop every queued coin from the container
    pub fn compact_coins(&mut self) {
        if self.pending_removal.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_removal);
        self.coins.retain(|c| !pending.contains(&c.id));
    }

    /// Put the actor back at the spawn point
    pub fn respawn(&mut self) {
        self.actor.reset_to(self.spawn);
        self.was_grounded = false;
        log::debug!("actor respawned at ({}, {})", self.spawn.x, self.spawn.y);
    }

    pub fn follow_actor(&mut self) {
        self.camera.set_center(self.actor.rect.center());
    }

    /// Record the grounded flag and report whether this frame was a fresh landing
    pub(crate) fn note_grounded(&mut self, grounded: bool) -> bool {
        let landed = grounded && !self.was_grounded;
        self.was_grounded = grounded;
        landed
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.coins.sort_by_key(|c| c.id);
        self.enemies.sort_by_key(|e| e.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::ActorTuning;

    fn state() -> GameState {
        let actor = Actor::new(IVec2::new(100, -50), ActorTuning::default());
        GameState::new(actor, Camera::new(VIEW_WIDTH, VIEW_HEIGHT))
    }

    #[test]
    fn test_enemy_patrol_bounces() {
        let mut e = Enemy::new(1, Rect::new(100, 0, 32, 32), (0, 110), 60.0);
        e.update(0.5); // +30 px, past the right bound
        assert_eq!(e.rect.x, 110);
        assert_eq!(e.vx, -60.0);
        e.update(1.0);
        assert_eq!(e.rect.x, 50);
        e.update(1.0); // past the left bound
        assert_eq!(e.rect.x, 0);
        assert_eq!(e.vx, 60.0);
    }

    #[test]
    fn test_enemy_patrol_bounds_order_insensitive() {
        // Bounds given high-to-low, as in the demo level
        let mut e = Enemy::new(1, Rect::new(704, 0, 32, 32), (704, 0), 60.0);
        e.update(1.0);
        assert_eq!(e.rect.x, 704);
        assert!(e.vx < 0.0);
    }

    #[test]
    fn test_removal_queue_compacts_after_pass() {
        let mut s = state();
        for x in [0, 50, 100] {
            let id = s.next_entity_id();
            s.coins.push(Coin {
                id,
                rect: Rect::new(x, 0, 16, 16),
                value: 1,
            });
        }
        s.mark_coin_collected(1);
        s.mark_coin_collected(3);
        s.mark_coin_collected(3);
        assert_eq!(s.coins.len(), 3);
        s.compact_coins();
        let ids: Vec<u32> = s.coins.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(s.pending_removal.is_empty());
    }

    #[test]
    fn test_respawn_resets_motion() {
        let mut s = state();
        s.actor.rect.set_top_left(IVec2::new(900, 40));
        s.actor.vel = glam::Vec2::new(20.0, 300.0);
        s.actor.jumps_remaining = 0;
        s.respawn();
        assert_eq!(s.actor.rect.top_left(), IVec2::new(100, -50));
        assert_eq!(s.actor.vel, glam::Vec2::ZERO);
        assert_eq!(s.actor.jumps_remaining, AIR_JUMPS);
    }

    #[test]
    fn test_camera_follows_on_creation() {
        let s = state();
        assert_eq!(s.camera.offset, s.actor.rect.center() - IVec2::new(400, 300));
    }
}
