//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod actor;
pub mod camera;
pub mod collision;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::{Actor, JumpKind};
pub use camera::Camera;
pub use collision::{Contacts, resolve};
pub use obstacle::{MovingPath, Obstacle, ObstacleKind};
pub use rect::Rect;
pub use state::{Coin, Enemy, GameEvent, GameState};
pub use tick::{TickInput, tick};
