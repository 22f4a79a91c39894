//! Axis-separated AABB collision resolution
//!
//! The actor is pushed out of obstacles one axis at a time: horizontal
//! first, then vertical. Resolving the axes separately avoids diagonal
//! tunneling and makes corner hits unambiguous.
//!
//! Multiple overlaps within one pass are corrected sequentially in slice
//! order. Each obstacle is re-tested against the rect as already corrected
//! by the obstacles before it.
//!
//! There is no swept test. A wall only stops the actor if the two overlap
//! after the move, so a frame step of at least actor width plus wall width
//! carries the actor clean through.

use super::actor::Actor;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::AIR_JUMPS;

/// What the resolver touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Stopped by a wall during the horizontal pass
    pub blocked_x: bool,
    /// Landed on top of a surface
    pub landed: bool,
    /// Hit a ceiling while rising
    pub bonked: bool,
}

/// Correct the actor's rect and velocity against `obstacles`.
///
/// Re-applies the velocity-derived displacement (truncated to whole pixels)
/// on each axis, then snaps the actor out of every solid obstacle it
/// overlaps. Updates `on_ground` and restores the air-jump budget on landing.
pub fn resolve(actor: &mut Actor, obstacles: &[Obstacle]) -> Contacts {
    let mut contacts = Contacts::default();

    // --- Horizontal pass ---
    actor.rect.x += actor.vel.x as i32;
    for obstacle in obstacles {
        if !obstacle.solid || !actor.rect.intersects(&obstacle.rect) {
            continue;
        }
        match obstacle.kind {
            // One-way ledges only matter vertically
            ObstacleKind::OneWay => continue,
            ObstacleKind::Static | ObstacleKind::Moving(_) => {}
        }

        let vx = actor.vel.x;
        if vx > 0.0 && actor.rect.right() > obstacle.rect.left() {
            actor.rect.set_right(obstacle.rect.left());
            actor.vel.x = 0.0;
            contacts.blocked_x = true;
        } else if vx < 0.0 && actor.rect.left() < obstacle.rect.right() {
            actor.rect.set_left(obstacle.rect.right());
            actor.vel.x = 0.0;
            contacts.blocked_x = true;
        }
    }

    // --- Vertical pass ---
    actor.rect.y += actor.vel.y as i32;
    actor.on_ground = false;
    for obstacle in obstacles {
        if !obstacle.solid || !actor.rect.intersects(&obstacle.rect) {
            continue;
        }

        let vy = actor.vel.y;
        let top = obstacle.rect.top();
        let bottom = obstacle.rect.bottom();

        match obstacle.kind {
            ObstacleKind::OneWay => {
                // Only a downward approach from above lands
                let bottom_before = actor.rect.bottom() as f32 - vy;
                if vy <= 0.0 || bottom_before > top as f32 {
                    continue;
                }
            }
            ObstacleKind::Static | ObstacleKind::Moving(_) => {}
        }

        if vy > 0.0 && actor.rect.bottom() > top && actor.rect.top() < top {
            actor.rect.set_bottom(top);
            actor.vel.y = 0.0;
            actor.on_ground = true;
            actor.jumps_remaining = AIR_JUMPS;
            contacts.landed = true;
            log::trace!("landed on obstacle {} at y={}", obstacle.id, top);
        } else if vy < 0.0 && actor.rect.top() < bottom && actor.rect.bottom() > bottom {
            actor.rect.set_top(bottom);
            actor.vel.y = 0.0;
            contacts.bonked = true;
            log::trace!("bonked obstacle {} at y={}", obstacle.id, bottom);
        }
    }

    contacts
}
