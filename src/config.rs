//! # Configuration
//!
//! Default game constants and the [`GameConfig`] tree that gathers them.
//! Every value has a default; a JSON file passed with `--config` can override
//! any subset of fields.

use crate::{DamageRules, GenerationConfig, Position, WandererError, WandererResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Edge length of one map cell in pixels
pub const TILE_SIZE: i32 = 32;

/// Largest accepted map width or height in cells
pub const MAX_MAP_DIMENSION: u32 = 1024;

/// Largest accepted cell edge in pixels
pub const MAX_TILE_SIZE: i32 = 256;

/// Largest pixel extent a map can have; positions and sizes stay within it
pub const MAX_PIXEL_EXTENT: i32 = MAX_MAP_DIMENSION as i32 * MAX_TILE_SIZE;

/// Default map width in cells
pub const DEFAULT_MAP_WIDTH: u32 = 50;

/// Default map height in cells
pub const DEFAULT_MAP_HEIGHT: u32 = 40;

/// Window width in pixels
pub const SCREEN_WIDTH: i32 = 800;

/// Window height in pixels
pub const SCREEN_HEIGHT: i32 = 600;

/// Logic ticks per second
pub const TARGET_FPS: u32 = 60;

/// Chance that any cell is generated as a wall
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.1;

/// Monsters the spawner tries to place
pub const DEFAULT_MONSTER_COUNT: u32 = 8;

pub const PLAYER_START_HP: i32 = 50;
pub const PLAYER_START_ATK: i32 = 10;
pub const PLAYER_SPEED: i32 = 4;

/// Player and NPC boxes are this much smaller than a tile
pub const PLAYER_SIZE: i32 = TILE_SIZE - 4;
pub const NPC_SIZE: i32 = TILE_SIZE - 4;
pub const MONSTER_SIZE: i32 = TILE_SIZE - 6;

/// Total inflation applied to an NPC box when checking for interaction
pub const NPC_INTERACT_MARGIN: i32 = 20;

/// Total inflation applied to a monster box when checking for engagement
pub const MONSTER_ENGAGE_MARGIN: i32 = 10;

pub const PLAYER_DAMAGE_FLOOR: i32 = 5;
pub const MONSTER_DAMAGE_FLOOR: i32 = 3;

/// Moving ticks between walk-cycle frame flips
pub const ANIMATION_TICKS_PER_FRAME: u32 = 10;

/// Process exit code when the player closes the window
pub const EXIT_CODE_QUIT: i32 = 0;

/// Process exit code for a startup or runtime error
pub const EXIT_CODE_ERROR: i32 = 1;

/// Process exit code when the player is defeated
pub const EXIT_CODE_GAME_OVER: i32 = 3;

/// Starting values for the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixel point the player box is centered on at startup
    pub start: Position,
    pub size: i32,
    pub speed: i32,
    pub hp: i32,
    pub atk: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Position::new(100, 100),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            hp: PLAYER_START_HP,
            atk: PLAYER_START_ATK,
        }
    }
}

/// Complete game configuration.
///
/// # Examples
///
/// ```
/// use wanderer::GameConfig;
///
/// let config = GameConfig::default();
/// assert_eq!(config.generation.width, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub target_fps: u32,
    pub player: PlayerConfig,
    pub damage: DamageRules,
    pub npc_interact_margin: i32,
    pub monster_engage_margin: i32,
    /// Keep the player box inside the map's pixel extents
    pub confine_to_map: bool,
    pub generation: GenerationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: TARGET_FPS,
            player: PlayerConfig::default(),
            damage: DamageRules::default(),
            npc_interact_margin: NPC_INTERACT_MARGIN,
            monster_engage_margin: MONSTER_ENGAGE_MARGIN,
            confine_to_map: true,
            generation: GenerationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            generation: GenerationConfig::new(seed),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> WandererResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> WandererResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> WandererResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the game cannot run with.
    pub fn validate(&self) -> WandererResult<()> {
        if !(1..=MAX_PIXEL_EXTENT).contains(&self.screen_width)
            || !(1..=MAX_PIXEL_EXTENT).contains(&self.screen_height)
        {
            return Err(WandererError::InvalidConfig(format!(
                "Screen size must be within 1..={}, got {}x{}",
                MAX_PIXEL_EXTENT, self.screen_width, self.screen_height
            )));
        }
        if self.target_fps == 0 {
            return Err(WandererError::InvalidConfig(
                "target_fps must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_TILE_SIZE).contains(&self.player.size)
            || !(0..=MAX_TILE_SIZE).contains(&self.player.speed)
        {
            return Err(WandererError::InvalidConfig(format!(
                "Player size must be within 1..={max} and speed within 0..={max}, got size {} speed {}",
                self.player.size,
                self.player.speed,
                max = MAX_TILE_SIZE
            )));
        }
        let start = self.player.start;
        let limit = MAX_PIXEL_EXTENT.unsigned_abs();
        if start.x.unsigned_abs() > limit || start.y.unsigned_abs() > limit {
            return Err(WandererError::InvalidConfig(format!(
                "Player start {:?} is further than {} pixels from the origin",
                start, MAX_PIXEL_EXTENT
            )));
        }
        if self.player.hp <= 0 {
            return Err(WandererError::InvalidConfig(format!(
                "Player must start alive, got hp {}",
                self.player.hp
            )));
        }
        if !(0..=MAX_TILE_SIZE).contains(&self.npc_interact_margin)
            || !(0..=MAX_TILE_SIZE).contains(&self.monster_engage_margin)
        {
            return Err(WandererError::InvalidConfig(format!(
                "Proximity margins must be within 0..={}",
                MAX_TILE_SIZE
            )));
        }
        self.generation.validate()
    }
}
