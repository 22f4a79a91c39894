//! Hopper - A side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, collisions, game state)
//! - `level`: Level definitions (JSON + built-in demo level)
//! - `tuning`: Data-driven actor movement constants

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::LevelDef;
pub use tuning::{ActorTuning, ConfigError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the runner will feed the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default tile / sprite size in pixels
    pub const TILE: i32 = 32;

    /// Gravity acceleration (pixels/s², +y is down)
    pub const GRAVITY: f32 = 100.0;
    /// Maximum fall speed (pixels/s)
    pub const TERMINAL_VELOCITY: f32 = 800.0;

    /// Actor defaults
    pub const ACTOR_MAX_SPEED: f32 = 20.0;
    pub const ACTOR_ACCEL: f32 = 100.0;
    pub const ACTOR_JUMP_SPEED: f32 = 20.0;
    /// Fraction of gravity added while ascending with jump released
    pub const JUMP_CUT_FACTOR: f32 = 0.4;
    /// Air jumps granted on landing
    pub const AIR_JUMPS: u32 = 1;

    /// Actor size (one tile wide, two tall)
    pub const ACTOR_WIDTH: i32 = TILE;
    pub const ACTOR_HEIGHT: i32 = TILE * 2;

    /// Viewport defaults
    pub const VIEW_WIDTH: i32 = 800;
    pub const VIEW_HEIGHT: i32 = 600;

    /// Moving platform default speed (pixels/s)
    pub const PLATFORM_SPEED: f32 = 100.0;
    /// Enemy default patrol speed (pixels/s)
    pub const ENEMY_SPEED: f32 = 60.0;

    /// Distance under which a moving platform counts as having reached its waypoint
    pub const WAYPOINT_EPSILON: f32 = 1e-6;
}
