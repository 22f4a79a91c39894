//! Level definitions
//!
//! A level is plain data: obstacles, coins, enemies and a spawn point. It
//! can come from JSON or from the built-in demo layout, and is turned into
//! a fresh `GameState` by `LevelDef::build`.

use std::path::Path;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Actor, Camera, Coin, Enemy, GameState, MovingPath, Obstacle, ObstacleKind, Rect};
use crate::tuning::{ActorTuning, ConfigError};

fn default_true() -> bool {
    true
}

fn default_platform_speed() -> f32 {
    PLATFORM_SPEED
}

fn default_enemy_speed() -> f32 {
    ENEMY_SPEED
}

fn default_coin_value() -> u32 {
    1
}

fn default_viewport() -> (i32, i32) {
    (VIEW_WIDTH, VIEW_HEIGHT)
}

/// Obstacle behaviour as written in level files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObstacleDefKind {
    Static,
    OneWay,
    Moving {
        path: Vec<Vec2>,
        #[serde(default = "default_platform_speed")]
        speed: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDef {
    pub rect: Rect,
    #[serde(flatten)]
    pub kind: ObstacleDefKind,
    #[serde(default = "default_true")]
    pub solid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDef {
    pub rect: Rect,
    #[serde(default = "default_coin_value")]
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub rect: Rect,
    pub patrol: (i32, i32),
    #[serde(default = "default_enemy_speed")]
    pub speed: f32,
}

/// A complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub spawn: IVec2,
    #[serde(default = "default_viewport")]
    pub viewport: (i32, i32),
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    #[serde(default)]
    pub coins: Vec<CoinDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
}

impl LevelDef {
    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let level = Self::from_json(&contents)?;
        log::info!("Loaded level from {}", path.display());
        Ok(level)
    }

    /// Reject empty rects and nonsensical speeds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (vw, vh) = self.viewport;
        if vw <= 0 || vh <= 0 {
            return Err(ConfigError::Invalid {
                field: "viewport",
                reason: format!("must be positive, got {vw}x{vh}"),
            });
        }

        let rects = self
            .obstacles
            .iter()
            .map(|o| (&o.rect, "obstacles"))
            .chain(self.coins.iter().map(|c| (&c.rect, "coins")))
            .chain(self.enemies.iter().map(|e| (&e.rect, "enemies")));
        for (rect, field) in rects {
            if rect.w <= 0 || rect.h <= 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("rect at ({}, {}) has size {}x{}", rect.x, rect.y, rect.w, rect.h),
                });
            }
        }

        for obstacle in &self.obstacles {
            if let ObstacleDefKind::Moving { speed, .. } = obstacle.kind {
                if !speed.is_finite() || speed < 0.0 {
                    return Err(ConfigError::Invalid {
                        field: "obstacles",
                        reason: format!("moving platform speed must be >= 0, got {speed}"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Instantiate a fresh game state. Entity ids follow declaration order.
    pub fn build(&self, tuning: ActorTuning) -> GameState {
        let actor = Actor::new(self.spawn, tuning);
        let camera = Camera::new(self.viewport.0, self.viewport.1);
        let mut state = GameState::new(actor, camera);

        for def in &self.obstacles {
            let kind = match &def.kind {
                ObstacleDefKind::Static => ObstacleKind::Static,
                ObstacleDefKind::OneWay => ObstacleKind::OneWay,
                ObstacleDefKind::Moving { path, speed } => {
                    ObstacleKind::Moving(MovingPath::new(path.clone(), *speed))
                }
            };
            let id = state.next_entity_id();
            let mut obstacle = Obstacle::new(id, def.rect, kind);
            obstacle.solid = def.solid;
            state.obstacles.push(obstacle);
        }

        for def in &self.coins {
            let id = state.next_entity_id();
            state.coins.push(Coin {
                id,
                rect: def.rect,
                value: def.value,
            });
        }

        for def in &self.enemies {
            let id = state.next_entity_id();
            state.enemies.push(Enemy::new(id, def.rect, def.patrol, def.speed));
        }

        state.normalize_order();
        log::info!(
            "Level built: {} obstacles, {} coins, {} enemies, spawn ({}, {})",
            state.obstacles.len(),
            state.coins.len(),
            state.enemies.len(),
            self.spawn.x,
            self.spawn.y
        );
        state
    }

    /// The demo course: ground runs with gaps, a brick row, pipes, a flag
    /// pole, a one-way ledge, a moving bridge over the second gap, two coins
    /// and four goombas.
    pub fn demo() -> Self {
        const T: i32 = TILE;

        let solid = |x: i32, y: i32, w: i32, h: i32| ObstacleDef {
            rect: Rect::new(x, y, w, h),
            kind: ObstacleDefKind::Static,
            solid: true,
        };

        let mut obstacles = vec![
            // Ground
            solid(0, 0, T * 69, T * 2),
            solid(T * 71, 0, T * 15, T * 2),
            solid(T * 89, 0, T * 64, T * 2),
            solid(T * 153, 0, T * 69, T * 2),
            // Block and brick row
            solid(T * 16, T * -4, T, T),
            solid(T * 20, T * -4, T, T),
            solid(T * 21, T * -4, T, T),
            solid(T * 22, T * -4, T, T),
            solid(T * 23, T * -4, T, T),
            solid(T * 24, T * -4, T, T),
            solid(T * 22, T * -8, T, T),
            // Pipes
            solid(T * 28, T * -2, T * 2, T * 2),
            solid(T * 38, T * -3, T * 2, T * 3),
            solid(T * 46, T * -4, T * 2, T * 4),
            solid(T * 57, T * -4, T * 2, T * 4),
            // Flag pole
            solid(T * 64, T * -11, T * 2, T * 11),
        ];
        obstacles.push(ObstacleDef {
            rect: Rect::new(500, -150, 200, 20),
            kind: ObstacleDefKind::OneWay,
            solid: true,
        });
        obstacles.push(ObstacleDef {
            rect: Rect::new(T * 84, T * -3, T * 3, T / 2),
            kind: ObstacleDefKind::Moving {
                path: vec![
                    Vec2::new((T * 84) as f32, (T * -3) as f32),
                    Vec2::new((T * 90) as f32, (T * -3) as f32),
                ],
                speed: PLATFORM_SPEED,
            },
            solid: true,
        });

        let coin = |x: i32, y: i32| CoinDef {
            rect: Rect::new(x, y, T, T),
            value: 1,
        };

        let goomba = |x: i32, patrol: (i32, i32)| EnemyDef {
            rect: Rect::new(x, -T, T, T),
            patrol,
            speed: ENEMY_SPEED,
        };

        Self {
            spawn: IVec2::new(100, -100),
            viewport: (VIEW_WIDTH, VIEW_HEIGHT),
            obstacles,
            coins: vec![coin(250, -T), coin(520, -T)],
            enemies: vec![
                goomba(T * 22, (T * 22, 0)),
                goomba(T * 40, (T * 40, T * 45)),
                goomba(T * 51, (T * 48, T * 56)),
                goomba(T * 52 + T / 2, (T * 48, T * 56)),
            ],
        }
    }
}
