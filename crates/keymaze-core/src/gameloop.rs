//! Simulation root: owns the grid and every entity, orchestrates one
//! `update` tick, and exposes the read surface a presentation layer
//! consumes.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::action::{scan_features, try_player_step};
use crate::consts::{
    ENEMY_MOVE_DURATION, ENTRANCE_X, ENTRANCE_Y, FLOOR, MAX_HEALTH, MAX_KEYS, MIN_MAZE_DIM,
    PLAYER_MOVE_DURATION, REGEN_AMOUNT, REGEN_INTERVAL,
};
use crate::dungeon::{maze, place_keys_and_doors, reachable_cells};
use crate::dungeon::{Door, Feature, Grid, Key, KeyId, Position};
use crate::errors::ConfigError;
use crate::monster::{self, Enemy};
use crate::player::Player;
use crate::rng::GameRng;

/// Placed features looked up by cell coordinate.
pub(crate) type FeatureMap = HashMap<(i32, i32), Feature>;

/// Serde helper for `FeatureMap` — JSON requires string keys.
/// Serializes each cell as `"x:y"`.
mod feature_map_serde {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;

    pub fn serialize<S>(map: &FeatureMap, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut ser_map = serializer.serialize_map(Some(map.len()))?;
        for ((x, y), feature) in map {
            ser_map.serialize_entry(&format!("{x}:{y}"), feature)?;
        }
        ser_map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<FeatureMap, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct FeatureMapVisitor;

        impl<'de> Visitor<'de> for FeatureMapVisitor {
            type Value = FeatureMap;

            fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str("a map with \"x:y\" string keys")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut map = FeatureMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Feature>()? {
                    let mut parts = key.splitn(2, ':');
                    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
                        return Err(de::Error::custom(format!("invalid cell key: {key}")));
                    };
                    let x: i32 = x.parse().map_err(de::Error::custom)?;
                    let y: i32 = y.parse().map_err(de::Error::custom)?;
                    map.insert((x, y), value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FeatureMapVisitor)
    }
}

/// Terminal and non-terminal simulation states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SimStatus {
    #[default]
    Running,
    Won,
    Lost,
}

/// Things that happened during recent ticks, drained by the caller.
/// `Won` and `Lost` fire at most once per level instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Won,
    Lost,
    KeyCollected { id: KeyId },
    DoorUnlocked { id: KeyId },
    PlayerDamaged { damage: i32, health: i32 },
}

/// Construction-time configuration for a generated level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub key_count: u8,
    pub branch_count: u32,
    pub enemy_count: u32,
    pub enemy_damage: i32,
    /// Explicit seed for reproducible levels; OS entropy otherwise.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            key_count: 3,
            branch_count: 15,
            enemy_count: 2,
            enemy_damage: 10,
            seed: None,
        }
    }
}

impl SimConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_MAZE_DIM || self.height < MIN_MAZE_DIM {
            return Err(ConfigError::DimensionsTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(ConfigError::EvenDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.key_count > MAX_KEYS {
            return Err(ConfigError::TooManyKeys {
                requested: self.key_count,
            });
        }
        if self.enemy_damage < 0 {
            return Err(ConfigError::NegativeDamage {
                damage: self.enemy_damage,
            });
        }
        Ok(())
    }
}

/// One level instance: the grid, the player, the enemy population, and
/// the tick loop driving them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    #[serde(with = "feature_map_serde")]
    features: FeatureMap,
    finish: Option<Position>,
    clock: f32,
    status: SimStatus,
    #[serde(skip)]
    events: Vec<GameEvent>,
    rng: GameRng,
}

impl Simulation {
    /// Generate a maze level from `config`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };

        let mut grid = Grid::filled(config.width, config.height, crate::consts::WALL);
        let path = maze::carve_maze(&mut grid, &mut rng);
        maze::add_branches(&mut grid, &path, config.branch_count, &mut rng);
        maze::open_endpoints(&mut grid);
        let (keys, doors) = place_keys_and_doors(&mut grid, config.key_count, &mut rng);

        let finish = Some(Position::new(config.width - 2, config.height - 2));
        let mut features = FeatureMap::default();
        for key in keys {
            features.insert((key.pos.x, key.pos.y), Feature::Key(key));
        }
        for door in doors {
            features.insert((door.pos.x, door.pos.y), Feature::Door(door));
        }

        Self::assemble(grid, features, finish, config.enemy_count, config.enemy_damage, rng)
    }

    /// Build a level around an externally supplied grid (scripted and
    /// tutorial levels), bypassing generation entirely. The finish cell
    /// is whatever `3` the grid contains, if any.
    pub fn from_grid(
        rows: &[Vec<u8>],
        enemy_count: u32,
        enemy_damage: i32,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if enemy_damage < 0 {
            return Err(ConfigError::NegativeDamage {
                damage: enemy_damage,
            });
        }
        let grid = Grid::from_rows(rows)?;
        let features = scan_features(&grid);
        let finish = grid
            .positions()
            .find(|&p| grid.get(p) == crate::consts::FINISH);
        let rng = match seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::assemble(grid, features, finish, enemy_count, enemy_damage, rng)
    }

    fn assemble(
        grid: Grid,
        features: FeatureMap,
        finish: Option<Position>,
        enemy_count: u32,
        enemy_damage: i32,
        mut rng: GameRng,
    ) -> Result<Self, ConfigError> {
        let entrance = Position::new(ENTRANCE_X, ENTRANCE_Y);
        if !grid.is_walkable(entrance) {
            return Err(ConfigError::BlockedEntrance);
        }

        // Enemies start on random reachable floor cells, never the
        // entrance the player spawns on.
        let mut spawn_cells: Vec<Position> = reachable_cells(&grid, entrance)
            .into_iter()
            .filter(|&p| grid.get(p) == FLOOR && p != entrance)
            .collect();
        rng.shuffle(&mut spawn_cells);

        let mut enemies = Vec::with_capacity(enemy_count as usize);
        if !spawn_cells.is_empty() {
            for i in 0..enemy_count as usize {
                let pos = spawn_cells[i % spawn_cells.len()];
                enemies.push(Enemy::spawn(pos, enemy_damage));
            }
        }

        Ok(Self {
            grid,
            player: Player::spawn(entrance),
            enemies,
            features,
            finish,
            clock: 0.0,
            status: SimStatus::Running,
            events: Vec::new(),
            rng,
        })
    }

    /// Advance the whole simulation by `dt` seconds: motion, win/lose
    /// checks, regeneration, and every enemy's turn. Terminal levels
    /// are frozen.
    pub fn update(&mut self, dt: f32) {
        if self.status != SimStatus::Running {
            return;
        }
        self.clock += dt;

        if let Some(dest) = self.player.motion.advance(dt, PLAYER_MOVE_DURATION) {
            self.player.pos = dest;
        }

        if self.finish == Some(self.player.pos) {
            self.status = SimStatus::Won;
            self.events.push(GameEvent::Won);
            return;
        }

        if self.clock >= self.player.next_regen_at {
            if self.player.health < MAX_HEALTH {
                self.player.health = (self.player.health + REGEN_AMOUNT).min(MAX_HEALTH);
            }
            self.player.next_regen_at = self.clock + REGEN_INTERVAL;
        }

        for enemy in self.enemies.iter_mut() {
            if let Some(dest) = enemy.motion.advance(dt, ENEMY_MOVE_DURATION) {
                enemy.pos = dest;
            }
            monster::take_turn(
                enemy,
                &self.grid,
                &mut self.player,
                self.clock,
                &mut self.rng,
                &mut self.events,
            );
        }

        if self.player.health <= 0 {
            self.player.health = 0;
            self.status = SimStatus::Lost;
            self.events.push(GameEvent::Lost);
        }
    }

    /// Feed a player move intent into the current tick. See the
    /// interaction rules for pickups, doors and diagonal degradation.
    pub fn move_player(&mut self, dx: i32, dy: i32) {
        if self.status != SimStatus::Running {
            return;
        }
        try_player_step(
            &mut self.player,
            &mut self.grid,
            &mut self.features,
            dx,
            dy,
            &mut self.events,
        );
    }

    /// Take everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn status(&self) -> SimStatus {
        self.status
    }

    /// Seconds of simulated time so far.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn finish(&self) -> Option<Position> {
        self.finish
    }

    /// Seed this level was built from.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Keys still waiting on the floor.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.features.values().filter_map(|f| match f {
            Feature::Key(key) => Some(key),
            Feature::Door(_) => None,
        })
    }

    /// Doors still locked.
    pub fn doors(&self) -> impl Iterator<Item = &Door> + '_ {
        self.features.values().filter_map(|f| match f {
            Feature::Door(door) => Some(door),
            Feature::Key(_) => None,
        })
    }
}
