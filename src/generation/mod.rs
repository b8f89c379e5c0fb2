//! # Generation Module
//!
//! Procedural content generation for the map, monsters, and NPCs.
//!
//! Every generator draws from a single seeded [`StdRng`], so the same
//! [`GenerationConfig`] always produces the same world.

pub mod encounters;
pub mod map;

pub use encounters::*;
pub use map::*;

use crate::config::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_MONSTER_COUNT, DEFAULT_WALL_PROBABILITY,
    MAX_MAP_DIMENSION, MAX_TILE_SIZE, MONSTER_SIZE, NPC_SIZE, TILE_SIZE,
};
use crate::{Position, WandererError, WandererResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Inclusive integer range used for rolled stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn to_range(self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A fixed NPC: which cell it stands on and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcPlacement {
    /// Grid cell the NPC is centered on
    pub cell: Position,
    /// Dialog text; `\n` separates lines
    pub message: String,
}

impl NpcPlacement {
    pub fn new(x: i32, y: i32, message: impl Into<String>) -> Self {
        Self {
            cell: Position::new(x, y),
            message: message.into(),
        }
    }
}

/// Configuration for procedural generation.
///
/// Controls the map size and wall density, how many monsters are placed and
/// where, and the fixed NPC roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation; drawn fresh when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Map width in cells
    pub width: u32,
    /// Map height in cells
    pub height: u32,
    /// Cell edge length in pixels
    pub tile_size: i32,
    /// Probability that a cell is a wall (0.0 to 1.0)
    pub wall_probability: f64,
    /// How many monsters to place
    pub monster_count: u32,
    /// Inclusive cell range monsters may spawn in (top-left corner)
    pub monster_spawn_min: Position,
    /// Inclusive cell range monsters may spawn in (bottom-right corner)
    pub monster_spawn_max: Position,
    /// Candidate cells to try before giving up on the monster target
    pub max_spawn_attempts: u32,
    pub monster_hp: StatRange,
    pub monster_atk: StatRange,
    pub monster_size: i32,
    pub npc_size: i32,
    /// Fixed NPC roster
    pub npcs: Vec<NpcPlacement>,
}

impl GenerationConfig {
    /// Creates the default configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, Some(12345));
    /// assert_eq!((config.width, config.height), (50, 40));
    /// assert_eq!(config.npcs.len(), 2);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            tile_size: TILE_SIZE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            monster_count: DEFAULT_MONSTER_COUNT,
            monster_spawn_min: Position::new(5, 5),
            monster_spawn_max: Position::new(40, 30),
            max_spawn_attempts: 200,
            monster_hp: StatRange::new(20, 40),
            monster_atk: StatRange::new(3, 7),
            monster_size: MONSTER_SIZE,
            npc_size: NPC_SIZE,
            npcs: vec![
                NpcPlacement::new(10, 10, "Hello traveler!\nWelcome to our village."),
                NpcPlacement::new(20, 5, "Beware of monsters\nin the forest."),
            ],
        }
    }

    /// Creates a small, open configuration for testing.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 20,
            height: 15,
            wall_probability: 0.0,
            monster_count: 2,
            monster_spawn_min: Position::new(10, 8),
            monster_spawn_max: Position::new(18, 13),
            npcs: vec![NpcPlacement::new(5, 5, "Testing, testing.")],
            ..Self::new(seed)
        }
    }

    /// Returns the seed, drawing and storing a random one if none is set.
    pub fn resolve_seed(&mut self) -> u64 {
        *self.seed.get_or_insert_with(rand::random)
    }

    /// Checks the map size and tile size alone.
    pub fn validate_dimensions(&self) -> WandererResult<()> {
        if !(1..=MAX_MAP_DIMENSION).contains(&self.width)
            || !(1..=MAX_MAP_DIMENSION).contains(&self.height)
        {
            return Err(WandererError::InvalidConfig(format!(
                "Map dimensions must be within 1..={}, got {}x{}",
                MAX_MAP_DIMENSION, self.width, self.height
            )));
        }
        if !(1..=MAX_TILE_SIZE).contains(&self.tile_size) {
            return Err(WandererError::InvalidConfig(format!(
                "Tile size must be within 1..={}, got {}",
                MAX_TILE_SIZE, self.tile_size
            )));
        }
        Ok(())
    }

    /// Rejects configurations the generators cannot satisfy.
    pub fn validate(&self) -> WandererResult<()> {
        self.validate_dimensions()?;
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(WandererError::InvalidConfig(format!(
                "wall_probability must be within 0.0..=1.0, got {}",
                self.wall_probability
            )));
        }

        let min = self.monster_spawn_min;
        let max = self.monster_spawn_max;
        if min.x > max.x || min.y > max.y {
            return Err(WandererError::InvalidConfig(format!(
                "Monster spawn area is empty: {:?}..={:?}",
                min, max
            )));
        }
        if min.x < 0 || min.y < 0 || max.x >= self.width as i32 || max.y >= self.height as i32 {
            return Err(WandererError::InvalidConfig(format!(
                "Monster spawn area {:?}..={:?} exceeds the {}x{} map",
                min, max, self.width, self.height
            )));
        }

        for (name, range) in [("monster_hp", self.monster_hp), ("monster_atk", self.monster_atk)] {
            if range.min > range.max {
                return Err(WandererError::InvalidConfig(format!(
                    "{} range is empty: {}..={}",
                    name, range.min, range.max
                )));
            }
        }
        if self.monster_hp.min <= 0 {
            return Err(WandererError::InvalidConfig(
                "Monsters must spawn with positive hp".to_string(),
            ));
        }
        if !(1..=MAX_TILE_SIZE).contains(&self.monster_size)
            || !(1..=MAX_TILE_SIZE).contains(&self.npc_size)
        {
            return Err(WandererError::InvalidConfig(format!(
                "Entity sizes must be within 1..={}",
                MAX_TILE_SIZE
            )));
        }
        for npc in &self.npcs {
            let cell = npc.cell;
            if cell.x < 0 || cell.y < 0 || cell.x >= self.width as i32 || cell.y >= self.height as i32
            {
                return Err(WandererError::InvalidConfig(format!(
                    "NPC cell {:?} lies outside the {}x{} map",
                    cell, self.width, self.height
                )));
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ..Self::new(0)
        }
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, giving a consistent
/// generate-then-validate interface.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> WandererResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> WandererResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config. Without a
    /// seed the generator is seeded from OS entropy.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
