//! # Entity Definitions
//!
//! Plain records for everything that lives on the map: the player, NPCs, and
//! monsters. Behavior that spans several entities (collision, proximity,
//! battles) lives in its own module.

use crate::{new_entity_id, Direction, Entity, EntityId, Rect};
use serde::{Deserialize, Serialize};

/// Combat numbers shared by the player and monsters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Current hit points; may go transiently negative before a defeat check
    pub hp: i32,
    /// Upper bound of the damage roll
    pub atk: i32,
}

impl CombatStats {
    pub fn new(hp: i32, atk: i32) -> Self {
        Self { hp, atk }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Subtracts damage without clamping.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }
}

/// A friendly character that shows a message when the player interacts nearby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    id: EntityId,
    bounds: Rect,
    message: String,
}

impl Npc {
    /// Creates an NPC whose box is centered on a pixel point.
    pub fn new(center_x: i32, center_y: i32, size: i32, message: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            bounds: Rect::centered_at(center_x, center_y, size, size),
            message: message.into(),
        }
    }

    /// The dialog text. Lines are separated by `\n`.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Entity for Npc {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// A hostile creature placed on a floor cell. Monsters never move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: EntityId,
    pub bounds: Rect,
    pub stats: CombatStats,
}

impl Monster {
    pub fn new(center_x: i32, center_y: i32, size: i32, stats: CombatStats) -> Self {
        Self {
            id: new_entity_id(),
            bounds: Rect::centered_at(center_x, center_y, size, size),
            stats,
        }
    }
}

impl Entity for Monster {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_alive(&self) -> bool {
        !self.stats.is_defeated()
    }
}

/// Two-frame walk cycle.
///
/// While moving the frame flips every `ticks_per_frame` ticks; an idle
/// player always shows frame 0 but keeps its place in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    frame_index: usize,
    timer: u32,
    moving: bool,
    ticks_per_frame: u32,
}

impl Animation {
    /// Number of frames in the walk cycle.
    pub const FRAME_COUNT: usize = 2;

    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            frame_index: 0,
            timer: 0,
            moving: false,
            ticks_per_frame: ticks_per_frame.max(1),
        }
    }

    /// Advances the cycle by one tick.
    pub fn update(&mut self, moving: bool) {
        self.moving = moving;
        if !moving {
            return;
        }

        self.timer += 1;
        if self.timer >= self.ticks_per_frame {
            self.timer = 0;
            self.frame_index = (self.frame_index + 1) % Self::FRAME_COUNT;
        }
    }

    /// The frame to draw this tick.
    pub fn current_frame(&self) -> usize {
        if self.moving {
            self.frame_index
        } else {
            0
        }
    }
}

/// The single player-controlled character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub id: EntityId,
    pub bounds: Rect,
    /// Pixels moved per tick along each held axis
    pub speed: i32,
    pub stats: CombatStats,
    pub facing: Direction,
    pub animation: Animation,
}

impl PlayerCharacter {
    /// Creates a player whose box is centered on a pixel point.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::{CombatStats, Direction, PlayerCharacter};
    ///
    /// let player = PlayerCharacter::new(100, 100, 28, 4, CombatStats::new(50, 10));
    /// assert_eq!(player.bounds.center_x(), 100);
    /// assert_eq!(player.facing, Direction::Down);
    /// ```
    pub fn new(center_x: i32, center_y: i32, size: i32, speed: i32, stats: CombatStats) -> Self {
        Self {
            id: new_entity_id(),
            bounds: Rect::centered_at(center_x, center_y, size, size),
            speed,
            stats,
            facing: Direction::Down,
            animation: Animation::new(crate::config::ANIMATION_TICKS_PER_FRAME),
        }
    }

    /// Pixel displacement for a held input vector of -1/0/1 per axis.
    pub fn displacement(&self, axis_x: i32, axis_y: i32) -> (i32, i32) {
        (axis_x * self.speed, axis_y * self.speed)
    }
}

impl Entity for PlayerCharacter {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_alive(&self) -> bool {
        !self.stats.is_defeated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_stats_damage() {
        let mut stats = CombatStats::new(10, 5);
        stats.take_damage(4);
        assert_eq!(stats.hp, 6);
        assert!(!stats.is_defeated());
        stats.take_damage(9);
        assert_eq!(stats.hp, -3);
        assert!(stats.is_defeated());
    }

    #[test]
    fn test_npc_centered_on_cell() {
        let npc = Npc::new(336, 336, 28, "Hello");
        assert_eq!(npc.bounds(), Rect::new(322, 322, 28, 28));
        assert_eq!(npc.message(), "Hello");
    }

    #[test]
    fn test_monster_alive_until_hp_zero() {
        let mut monster = Monster::new(48, 48, 26, CombatStats::new(5, 3));
        assert!(monster.is_alive());
        monster.stats.take_damage(5);
        assert!(!monster.is_alive());
    }

    #[test]
    fn test_animation_flips_every_interval() {
        let mut animation = Animation::new(10);
        for _ in 0..9 {
            animation.update(true);
            assert_eq!(animation.current_frame(), 0);
        }
        animation.update(true);
        assert_eq!(animation.current_frame(), 1);
        for _ in 0..10 {
            animation.update(true);
        }
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn test_idle_shows_first_frame() {
        let mut animation = Animation::new(1);
        animation.update(true);
        assert_eq!(animation.current_frame(), 1);
        animation.update(false);
        assert_eq!(animation.current_frame(), 0);
        // Resumes the cycle from where it was
        animation.update(true);
        assert_eq!(animation.current_frame(), 0);
    }

    #[test]
    fn test_player_displacement() {
        let player = PlayerCharacter::new(100, 100, 28, 4, CombatStats::new(50, 10));
        assert_eq!(player.displacement(1, -1), (4, -4));
        assert_eq!(player.displacement(0, 0), (0, 0));
    }
}
