//! Level placement data.
//!
//! A level is plain data: where the actor spawns, the static platforms, the
//! enemies and the interactive objects. [`LevelData`] is loaded from JSON
//! and turned into entities by [`Game::load_level`](crate::game::Game::load_level).
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "name": "rooftops",
//!   "spawn": [64.0, 452.0],
//!   "platforms": [{ "pos": [0.0, 500.0], "size": [1600.0, 50.0], "kind": "ground" }],
//!   "tiles": {
//!     "offset": [0.0, 200.0],
//!     "cell_size": [32.0, 32.0],
//!     "rows": ["..BB..", "MMMMMM"],
//!     "legend": { "B": "brick", "M": "metal" }
//!   },
//!   "enemies": [
//!     { "pos": [400.0, 468.0], "behavior": { "type": "patrol", "min_x": 300.0, "max_x": 600.0 } },
//!     { "pos": [900.0, 300.0], "bounce_only": true,
//!       "behavior": { "type": "flying", "axis": "vertical", "min": 250.0, "max": 400.0 } }
//!   ],
//!   "checkpoints": [{ "pos": [800.0, 436.0], "size": [24.0, 64.0] }],
//!   "pickups": [{ "pos": [500.0, 400.0], "size": [16.0, 16.0], "kind": { "heart": 1 } }],
//!   "goal": { "pos": [1500.0, 420.0], "size": [40.0, 80.0] },
//!   "next_level": "levels/level2.json"
//! }
//! ```
//!
//! Every list is optional. Enemy `stats` default to [`EnemyStats::default`].

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::aabb::Aabb;
use crate::components::enemy::{Behavior, Direction, EnemyStats, PatrolAxis, ShootingParams};
use crate::components::pickup::PickupKind;
use crate::components::platform::PlatformKind;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RectSpawn {
    pub pos: Vec2,
    pub size: Vec2,
}

impl RectSpawn {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlatformSpawn {
    pub pos: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub kind: PlatformKind,
}

/// ASCII block of same-sized platform tiles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TileLayout {
    pub offset: Vec2,
    pub cell_size: Vec2,
    pub rows: Vec<String>,
    pub legend: FxHashMap<char, PlatformKind>,
}

impl TileLayout {
    /// Iterate over all solid cells as platforms. Unknown characters are empty.
    pub fn iter_cells(&self) -> impl Iterator<Item = PlatformSpawn> + '_ {
        self.rows.iter().enumerate().flat_map(move |(row, line)| {
            line.chars().enumerate().filter_map(move |(col, ch)| {
                self.legend.get(&ch).map(|kind| PlatformSpawn {
                    pos: self.offset + Vec2::new(col as f32, row as f32) * self.cell_size,
                    size: self.cell_size,
                    kind: *kind,
                })
            })
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviorSpawn {
    Patrol {
        min_x: f32,
        max_x: f32,
    },
    Flying {
        axis: PatrolAxis,
        min: f32,
        max: f32,
    },
    Stationary,
    FlameEmitter {
        #[serde(default)]
        direction: Direction,
        active_duration: f32,
        inactive_duration: f32,
        shot_interval: f32,
    },
    Rotating {
        pivot: Vec2,
        arm_length: f32,
        angular_speed: f32,
    },
}

impl BehaviorSpawn {
    pub fn build(&self) -> Behavior {
        match *self {
            BehaviorSpawn::Patrol { min_x, max_x } => Behavior::patrol(min_x, max_x),
            BehaviorSpawn::Flying { axis, min, max } => Behavior::flying(axis, min, max),
            BehaviorSpawn::Stationary => Behavior::Stationary,
            BehaviorSpawn::FlameEmitter {
                direction,
                active_duration,
                inactive_duration,
                shot_interval,
            } => Behavior::flame_emitter(direction, active_duration, inactive_duration, shot_interval),
            BehaviorSpawn::Rotating {
                pivot,
                arm_length,
                angular_speed,
            } => Behavior::rotating(pivot, arm_length, angular_speed),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    pub pos: Vec2,
    #[serde(default)]
    pub stats: EnemyStats,
    pub behavior: BehaviorSpawn,
    /// Stomping this enemy bounces the actor without killing it.
    #[serde(default)]
    pub bounce_only: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PickupSpawn {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PickupKind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub spawn: Vec2,
    #[serde(default)]
    pub platforms: Vec<PlatformSpawn>,
    #[serde(default)]
    pub tiles: Option<TileLayout>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub checkpoints: Vec<RectSpawn>,
    #[serde(default)]
    pub pickups: Vec<PickupSpawn>,
    #[serde(default)]
    pub terminals: Vec<RectSpawn>,
    #[serde(default)]
    pub goal: Option<RectSpawn>,
    #[serde(default)]
    pub next_level: Option<String>,
}

impl LevelData {
    /// Loads level data from a JSON file at the specified path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json(&file_content)
    }

    pub fn from_json(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let level: LevelData = serde_json::from_str(text)?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Explicit platforms followed by the expanded tile layout.
    pub fn all_platforms(&self) -> Vec<PlatformSpawn> {
        let mut platforms = self.platforms.clone();
        if let Some(tiles) = &self.tiles {
            platforms.extend(tiles.iter_cells());
        }
        platforms
    }

    /// Built-in level used when no level file is supplied.
    pub fn demo() -> Self {
        let ground = 500.0;
        let mut legend = FxHashMap::default();
        legend.insert('B', PlatformKind::Brick);
        legend.insert('M', PlatformKind::Metal);

        let shooter = EnemyStats {
            color: [240, 160, 40, 255],
            shooting: Some(ShootingParams {
                interval: 1.5,
                projectile_speed: 260.0,
                range: 320.0,
                damage: 1,
            }),
            ..EnemyStats::default()
        };
        let spikes = EnemyStats {
            size: Vec2::new(64.0, 16.0),
            color: [160, 160, 160, 255],
            ..EnemyStats::default()
        };

        LevelData {
            name: "demo".to_string(),
            spawn: Vec2::new(64.0, ground - 48.0),
            platforms: vec![
                PlatformSpawn {
                    pos: Vec2::new(0.0, ground),
                    size: Vec2::new(1000.0, 50.0),
                    kind: PlatformKind::Ground,
                },
                PlatformSpawn {
                    pos: Vec2::new(1100.0, ground),
                    size: Vec2::new(600.0, 50.0),
                    kind: PlatformKind::Ground,
                },
                PlatformSpawn {
                    pos: Vec2::new(950.0, 380.0),
                    size: Vec2::new(200.0, 20.0),
                    kind: PlatformKind::Floating,
                },
            ],
            tiles: Some(TileLayout {
                offset: Vec2::new(300.0, 340.0),
                cell_size: Vec2::new(32.0, 32.0),
                rows: vec!["BBB...MMM".to_string()],
                legend,
            }),
            enemies: vec![
                EnemySpawn {
                    pos: Vec2::new(450.0, ground - 32.0),
                    stats: EnemyStats::default(),
                    behavior: BehaviorSpawn::Patrol {
                        min_x: 420.0,
                        max_x: 640.0,
                    },
                    bounce_only: false,
                },
                EnemySpawn {
                    pos: Vec2::new(1040.0, 250.0),
                    stats: EnemyStats::default(),
                    behavior: BehaviorSpawn::Flying {
                        axis: PatrolAxis::Vertical,
                        min: 200.0,
                        max: 320.0,
                    },
                    bounce_only: true,
                },
                EnemySpawn {
                    pos: Vec2::new(720.0, ground - 16.0),
                    stats: spikes,
                    behavior: BehaviorSpawn::Stationary,
                    bounce_only: false,
                },
                EnemySpawn {
                    pos: Vec2::new(1250.0, ground - 32.0),
                    stats: EnemyStats::default(),
                    behavior: BehaviorSpawn::FlameEmitter {
                        direction: Direction::Up,
                        active_duration: 1.5,
                        inactive_duration: 2.0,
                        shot_interval: 0.2,
                    },
                    bounce_only: false,
                },
                EnemySpawn {
                    pos: Vec2::ZERO,
                    stats: EnemyStats::default(),
                    behavior: BehaviorSpawn::Rotating {
                        pivot: Vec2::new(1400.0, 300.0),
                        arm_length: 96.0,
                        angular_speed: 120.0,
                    },
                    bounce_only: false,
                },
                EnemySpawn {
                    pos: Vec2::new(1550.0, ground - 32.0),
                    stats: shooter,
                    behavior: BehaviorSpawn::Stationary,
                    bounce_only: false,
                },
            ],
            checkpoints: vec![RectSpawn::new(
                Vec2::new(860.0, ground - 64.0),
                Vec2::new(24.0, 64.0),
            )],
            pickups: vec![
                PickupSpawn {
                    pos: Vec2::new(360.0, 300.0),
                    size: Vec2::new(16.0, 16.0),
                    kind: PickupKind::Heart(1),
                },
                PickupSpawn {
                    pos: Vec2::new(1020.0, 340.0),
                    size: Vec2::new(16.0, 16.0),
                    kind: PickupKind::Coin(10),
                },
            ],
            terminals: vec![RectSpawn::new(
                Vec2::new(1180.0, ground - 48.0),
                Vec2::new(32.0, 48.0),
            )],
            goal: Some(RectSpawn::new(
                Vec2::new(1640.0, ground - 80.0),
                Vec2::new(40.0, 80.0),
            )),
            next_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_level() {
        let level = LevelData::from_json(r#"{ "name": "empty", "spawn": [10.0, 20.0] }"#).unwrap();
        assert_eq!(level.name, "empty");
        assert_eq!(level.spawn, Vec2::new(10.0, 20.0));
        assert!(level.platforms.is_empty());
        assert!(level.goal.is_none());
    }

    #[test]
    fn test_parse_tagged_behaviors() {
        let json = r#"{
            "name": "t",
            "spawn": [0.0, 0.0],
            "enemies": [
                { "pos": [1.0, 2.0], "behavior": { "type": "patrol", "min_x": 0.0, "max_x": 50.0 } },
                { "pos": [3.0, 4.0], "bounce_only": true,
                  "behavior": { "type": "flying", "axis": "vertical", "min": 5.0, "max": 9.0 } },
                { "pos": [0.0, 0.0], "stats": { "max_hp": 3 }, "behavior": { "type": "stationary" } },
                { "pos": [0.0, 0.0], "behavior": { "type": "flame_emitter", "direction": "left",
                  "active_duration": 1.0, "inactive_duration": 2.0, "shot_interval": 0.5 } }
            ],
            "pickups": [{ "pos": [0.0, 0.0], "size": [8.0, 8.0], "kind": { "coin": 5 } }]
        }"#;
        let level = LevelData::from_json(json).unwrap();
        assert_eq!(level.enemies.len(), 4);
        assert!(level.enemies[1].bounce_only);
        assert_eq!(level.enemies[2].stats.max_hp, 3);
        assert_eq!(level.enemies[2].stats.speed, EnemyStats::default().speed);
        assert!(matches!(
            level.enemies[3].behavior.build(),
            Behavior::FlameEmitter { direction: Direction::Left, .. }
        ));
        assert_eq!(level.pickups[0].kind, PickupKind::Coin(5));
    }

    #[test]
    fn test_tiles_expand_into_platforms() {
        let mut legend = FxHashMap::default();
        legend.insert('#', PlatformKind::Brick);
        let tiles = TileLayout {
            offset: Vec2::new(100.0, 50.0),
            cell_size: Vec2::new(10.0, 20.0),
            rows: vec!["#.#".to_string(), ".#.".to_string()],
            legend,
        };
        let cells: Vec<_> = tiles.iter_cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1].pos, Vec2::new(120.0, 50.0));
        assert_eq!(cells[2].pos, Vec2::new(110.0, 70.0));
        assert_eq!(cells[2].kind, PlatformKind::Brick);
    }

    #[test]
    fn test_demo_round_trips_through_json() {
        let demo = LevelData::demo();
        let json = demo.to_json().unwrap();
        let back = LevelData::from_json(&json).unwrap();
        assert_eq!(back, demo);
        assert!(demo.all_platforms().len() > demo.platforms.len());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(LevelData::load_from_file("/nonexistent/level.json").is_err());
    }
}
