//! Hopper headless runner
//!
//! Loads a level (built-in demo or JSON), drives the simulation with a
//! fixed-timestep accumulator and either a scripted autopilot or seeded
//! random input, and logs what happens.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use hopper::consts::*;
use hopper::sim::{GameEvent, GameState, JumpKind, TickInput, tick};
use hopper::{ActorTuning, LevelDef};

#[derive(Debug, Parser)]
#[command(name = "hopper", about = "Run the platformer simulation headless")]
struct Args {
    /// Level JSON file (defaults to the built-in demo course)
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,

    /// Actor tuning JSON file
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Number of rendered frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Wall-clock seconds per rendered frame fed to the accumulator
    #[arg(long, default_value_t = SIM_DT)]
    frame_dt: f32,

    /// Drive the actor with seeded random input instead of the autopilot
    #[arg(long)]
    seed: Option<u64>,
}

/// Held buttons for one rendered frame
#[derive(Debug, Clone, Copy, Default)]
struct Buttons {
    left: bool,
    right: bool,
    jump: bool,
}

/// Where input comes from
enum Pilot {
    /// Run right, hop when stopped by a wall
    Auto { hop_frames: u32 },
    /// Seeded random button mashing, re-rolled every few frames
    Random { rng: Pcg32, held: Buttons, hold_frames: u32 },
}

impl Pilot {
    /// `blocked` is whether the last simulated frame ran into a wall
    fn buttons(&mut self, state: &GameState, blocked: bool) -> Buttons {
        match self {
            Pilot::Auto { hop_frames } => {
                if *hop_frames == 0 && state.actor.on_ground && blocked {
                    *hop_frames = 20;
                }
                let jump = *hop_frames > 0;
                *hop_frames = hop_frames.saturating_sub(1);
                Buttons {
                    left: false,
                    right: true,
                    jump,
                }
            }
            Pilot::Random {
                rng,
                held,
                hold_frames,
            } => {
                if *hold_frames == 0 {
                    *held = Buttons {
                        left: rng.random_bool(0.3),
                        right: rng.random_bool(0.6),
                        jump: rng.random_bool(0.25),
                    };
                    *hold_frames = rng.random_range(5..30);
                }
                *hold_frames -= 1;
                *held
            }
        }
    }
}

/// Owns the state and threads it through the fixed-step loop
struct Runner {
    state: GameState,
    accumulator: f32,
    /// Input fed to the next tick; the press edge stays set until a tick consumes it
    input: TickInput,
    jump_was_down: bool,
    /// Last simulated frame hit a wall
    blocked: bool,
    jumps: u32,
    respawns: u32,
}

impl Runner {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            jump_was_down: false,
            blocked: false,
            jumps: 0,
            respawns: 0,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, frame_dt: f32, buttons: Buttons) {
        let dt = frame_dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let edge =
            TickInput::from_buttons(buttons.left, buttons.right, buttons.jump, self.jump_was_down);
        self.jump_was_down = buttons.jump;
        self.input.left = edge.left;
        self.input.right = edge.right;
        self.input.jump_held = edge.jump_held;
        self.input.jump_pressed |= edge.jump_pressed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if substeps == 0 {
                self.blocked = false;
            }
            let input = self.input;
            let events = tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump_pressed = false;

            for event in events {
                self.record(event);
            }
        }
    }

    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Jumped(kind) => {
                self.jumps += 1;
                if kind == JumpKind::Air {
                    log::debug!("air jump at tick {}", self.state.time_ticks);
                }
            }
            GameEvent::Landed | GameEvent::Bonked => {}
            GameEvent::Blocked => self.blocked = true,
            GameEvent::CoinCollected { id, value } => {
                log::info!("Coin {} collected (+{}), score {}", id, value, self.state.score);
            }
            GameEvent::EnemyContact { id } => {
                log::info!("Hit enemy {} at tick {}", id, self.state.time_ticks);
            }
            GameEvent::Respawned => self.respawns += 1,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Hopper starting...");

    let level = match &args.level {
        Some(path) => LevelDef::load(path)
            .with_context(|| format!("failed to load level {}", path.display()))?,
        None => LevelDef::demo(),
    };
    let tuning = match &args.tuning {
        Some(path) => ActorTuning::load(path)
            .with_context(|| format!("failed to load tuning {}", path.display()))?,
        None => ActorTuning::default(),
    };
    if !(args.frame_dt.is_finite() && args.frame_dt > 0.0) {
        anyhow::bail!("--frame-dt must be positive, got {}", args.frame_dt);
    }

    let mut pilot = match args.seed {
        Some(seed) => {
            log::info!("Random input with seed: {}", seed);
            Pilot::Random {
                rng: Pcg32::seed_from_u64(seed),
                held: Buttons::default(),
                hold_frames: 0,
            }
        }
        None => Pilot::Auto { hop_frames: 0 },
    };

    let mut runner = Runner::new(level.build(tuning));
    for _ in 0..args.frames {
        let buttons = pilot.buttons(&runner.state, runner.blocked);
        runner.update(args.frame_dt, buttons);
    }

    let state = &runner.state;
    let pos = state.actor.rect.top_left();
    println!("ticks:    {}", state.time_ticks);
    println!("position: ({}, {})", pos.x, pos.y);
    println!("grounded: {}", state.actor.on_ground);
    println!("score:    {} ({} coins left)", state.score, state.coins.len());
    println!("jumps:    {}", runner.jumps);
    println!("respawns: {}", runner.respawns);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use hopper::sim::{Actor, Camera, Obstacle, ObstacleKind, Rect};

    /// Actor resting on a wide ground slab whose top is y=0
    fn grounded_runner() -> Runner {
        let actor = Actor::new(IVec2::new(100, -ACTOR_HEIGHT), ActorTuning::default());
        let mut state = GameState::new(actor, Camera::new(VIEW_WIDTH, VIEW_HEIGHT));
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            Rect::new(-1000, 0, 4000, TILE * 2),
            ObstacleKind::Static,
        ));
        let mut runner = Runner::new(state);
        for _ in 0..5 {
            runner.update(SIM_DT, Buttons::default());
        }
        assert!(runner.state.actor.on_ground);
        runner
    }

    fn jump() -> Buttons {
        Buttons {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_press_survives_frame_without_tick() {
        let mut runner = grounded_runner();
        let ticks = runner.state.time_ticks;

        // 10 ms is shorter than one simulation step: nothing runs yet
        runner.update(0.01, jump());
        assert_eq!(runner.state.time_ticks, ticks);
        assert_eq!(runner.jumps, 0);

        // Button still held, so no new edge; the pending press fires now
        runner.update(0.01, jump());
        assert_eq!(runner.state.time_ticks, ticks + 1);
        assert_eq!(runner.jumps, 1);
        assert!(!runner.state.actor.on_ground);
    }

    #[test]
    fn test_press_fires_once_across_substeps() {
        let mut runner = grounded_runner();
        let ticks = runner.state.time_ticks;

        // Three substeps in one frame: the edge is consumed by the first
        runner.update(3.5 * SIM_DT, jump());
        assert_eq!(runner.state.time_ticks, ticks + 3);
        assert_eq!(runner.jumps, 1);
        assert_eq!(runner.state.actor.jumps_remaining, 1);
    }

    #[test]
    fn test_autopilot_hops_only_when_blocked() {
        let mut runner = grounded_runner();
        let mut pilot = Pilot::Auto { hop_frames: 0 };
        assert!(!pilot.buttons(&runner.state, runner.blocked).jump);

        let id = runner.state.next_entity_id();
        runner
            .state
            .obstacles
            .push(Obstacle::new(id, Rect::new(200, -200, 32, 200), ObstacleKind::Static));
        let walk = Buttons {
            right: true,
            ..Default::default()
        };
        for _ in 0..120 {
            runner.update(SIM_DT, walk);
        }
        assert!(runner.blocked);
        assert!(pilot.buttons(&runner.state, runner.blocked).jump);
    }
}
