//! Per-frame simulation step
//!
//! Order within a frame:
//! 1. actor integrates input (velocity + provisional position)
//! 2. moving platforms and enemies advance
//! 3. collision resolution, horizontal then vertical (wall, ceiling and
//!    landing contacts become events)
//! 4. coin pickup (queued, compacted after the pass)
//! 5. enemy contact resets the actor
//! 6. camera recenters

use super::collision::resolve;
use super::state::{GameEvent, GameState};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump went down this frame (edge)
    pub jump_pressed: bool,
    /// Jump is currently down (level)
    pub jump_held: bool,
}

impl TickInput {
    /// Build from the jump button's level plus its level last frame
    pub fn from_buttons(left: bool, right: bool, jump: bool, jump_was_down: bool) -> Self {
        Self {
            left,
            right,
            jump_pressed: jump && !jump_was_down,
            jump_held: jump,
        }
    }
}

/// Advance the game state by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    if let Some(kind) = state.actor.apply_input(
        input.left,
        input.right,
        input.jump_pressed,
        input.jump_held,
        dt,
    ) {
        events.push(GameEvent::Jumped(kind));
    }

    for obstacle in &mut state.obstacles {
        obstacle.update(dt);
    }
    for enemy in &mut state.enemies {
        enemy.update(dt);
    }

    let contacts = resolve(&mut state.actor, &state.obstacles);
    if contacts.blocked_x {
        events.push(GameEvent::Blocked);
    }
    if contacts.bonked {
        events.push(GameEvent::Bonked);
    }
    if state.note_grounded(contacts.landed) {
        log::debug!("landed at tick {}", state.time_ticks);
        events.push(GameEvent::Landed);
    }

    // Coin pickup: mark during the pass, compact afterwards
    let actor_rect = state.actor.rect;
    let collected: Vec<(u32, u32)> = state
        .coins
        .iter()
        .filter(|c| c.rect.intersects(&actor_rect))
        .map(|c| (c.id, c.value))
        .collect();
    for (id, value) in collected {
        state.mark_coin_collected(id);
        state.score += u64::from(value);
        log::debug!("coin {} collected (+{}), score {}", id, value, state.score);
        events.push(GameEvent::CoinCollected { id, value });
    }
    state.compact_coins();

    let hit = state
        .enemies
        .iter()
        .find(|e| e.rect.intersects(&actor_rect))
        .map(|e| e.id);
    if let Some(id) = hit {
        events.push(GameEvent::EnemyContact { id });
        state.respawn();
        events.push(GameEvent::Respawned);
    }

    state.follow_actor();
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Actor, Camera, Coin, Enemy, JumpKind, Obstacle, ObstacleKind, Rect};
    use crate::tuning::ActorTuning;
    use glam::IVec2;

    /// Actor standing-height above a wide ground slab whose top is y=0
    fn grounded_state() -> GameState {
        let actor = Actor::new(IVec2::new(100, -ACTOR_HEIGHT), ActorTuning::default());
        let mut state = GameState::new(actor, Camera::new(VIEW_WIDTH, VIEW_HEIGHT));
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            Rect::new(-1000, 0, 4000, TILE * 2),
            ObstacleKind::Static,
        ));
        state
    }

    fn settle(state: &mut GameState) {
        for _ in 0..5 {
            tick(state, &TickInput::default(), SIM_DT);
        }
    }

    #[test]
    fn test_from_buttons_edge() {
        let first = TickInput::from_buttons(false, true, true, false);
        assert!(first.jump_pressed && first.jump_held);
        let still = TickInput::from_buttons(false, true, true, true);
        assert!(!still.jump_pressed && still.jump_held);
    }

    #[test]
    fn test_standing_actor_stays_grounded() {
        let mut state = grounded_state();
        settle(&mut state);
        assert!(state.actor.on_ground);
        assert_eq!(state.actor.rect.bottom(), 0);
        assert_eq!(state.actor.jumps_remaining, 1);
    }

    #[test]
    fn test_jump_then_land() {
        let mut state = grounded_state();
        settle(&mut state);

        let press = TickInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let events = tick(&mut state, &press, SIM_DT);
        assert!(events.contains(&GameEvent::Jumped(JumpKind::Ground)));
        assert!(!state.actor.on_ground);
        assert!(state.actor.rect.bottom() < 0);

        let hold = TickInput {
            jump_held: true,
            ..Default::default()
        };
        let mut landed = false;
        for _ in 0..600 {
            let events = tick(&mut state, &hold, SIM_DT);
            if events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(state.actor.rect.bottom(), 0);
        assert_eq!(state.actor.jumps_remaining, 1);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut state = grounded_state();
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            rect: Rect::new(110, -40, 16, 16),
            value: 5,
        });

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.contains(&GameEvent::CoinCollected { id, value: 5 }));
        assert_eq!(state.score, 5);
        assert!(state.coins.is_empty());

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CoinCollected { .. })));
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_enemy_contact_respawns() {
        let mut state = grounded_state();
        state.spawn = IVec2::new(0, -200);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, Rect::new(100, -TILE, TILE, TILE), (100, 100), 0.0));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.contains(&GameEvent::EnemyContact { id }));
        assert!(events.contains(&GameEvent::Respawned));
        assert_eq!(state.actor.rect.top_left(), IVec2::new(0, -200));
        assert_eq!(state.actor.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn test_camera_tracks_actor() {
        let mut state = grounded_state();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &right, SIM_DT);
        }
        assert!(state.actor.rect.x > 100);
        assert_eq!(
            state.camera.offset,
            state.actor.rect.center() - IVec2::new(VIEW_WIDTH / 2, VIEW_HEIGHT / 2)
        );
    }

    #[test]
    fn test_wall_and_ceiling_contacts_reported() {
        let mut state = grounded_state();
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, Rect::new(200, -200, TILE, 200), ObstacleKind::Static));
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..120 {
            events.extend(tick(&mut state, &right, SIM_DT));
        }
        assert!(events.contains(&GameEvent::Blocked));
        assert!(!events.contains(&GameEvent::Bonked));

        // Low ceiling 16 px above the head: the jump bonks on its first frame
        let mut state = grounded_state();
        settle(&mut state);
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, Rect::new(-1000, -100, 4000, 20), ObstacleKind::Static));
        let press = TickInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let events = tick(&mut state, &press, SIM_DT);
        assert!(events.contains(&GameEvent::Bonked));
        assert_eq!(state.actor.rect.top(), -80);
        assert_eq!(state.actor.vel.y, 0.0);
    }

    #[test]
    fn test_restored_state_does_not_land_again() {
        let mut state = grounded_state();
        settle(&mut state);
        assert!(state.actor.on_ground);

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        let events = tick(&mut restored, &TickInput::default(), SIM_DT);
        assert!(!events.contains(&GameEvent::Landed));
        assert!(restored.actor.on_ground);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = grounded_state();
        let mut state2 = grounded_state();

        let inputs = [
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
        ];

        for input in inputs.iter().cycle().take(200) {
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.actor.rect, state2.actor.rect);
        assert_eq!(state1.actor.vel, state2.actor.vel);
    }
}
