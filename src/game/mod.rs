//! # Game Module
//!
//! Core game state management, map representation, and entity systems.
//!
//! This module contains the fundamental building blocks of Wanderer:
//! - Map cells and the wall lookup used by collision
//! - Player, NPC, and monster records
//! - Collision and proximity queries over bounding boxes
//! - The exploring/dialog/battle state machine

pub mod battle;
pub mod camera;
pub mod collision;
pub mod dice;
pub mod entities;
pub mod proximity;
pub mod state;
pub mod world;

pub use battle::*;
pub use camera::*;
pub use collision::*;
pub use dice::*;
pub use entities::*;
pub use proximity::*;
pub use state::*;
pub use world::*;

use crate::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate, either a grid cell or a pixel point
/// depending on context.
///
/// # Examples
///
/// ```
/// use wanderer::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Facing directions for the player sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a unit delta (screen coordinates, y grows down).
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Picks the facing for a movement vector.
    ///
    /// The dominant axis wins; diagonals (equal magnitude) face vertically.
    /// Returns None for a zero vector.
    pub fn from_movement(dx: i32, dy: i32) -> Option<Direction> {
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Common interface for anything placed on the map with a bounding box.
pub trait Entity {
    /// Gets the entity's unique identifier.
    fn id(&self) -> EntityId;

    /// Gets the entity's bounding box in pixels.
    fn bounds(&self) -> Rect;

    /// Whether the entity is still active in the world.
    fn is_alive(&self) -> bool {
        true
    }
}
