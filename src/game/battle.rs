//! # Battle Resolution
//!
//! Turn arithmetic for a fight between the player and one engaged monster.
//! The mode switching around a battle (engage, flee, victory) lives in
//! [`crate::GameState`]; this module only knows how a single turn plays out.

use crate::{CombatStats, Dice, EntityId};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Damage floors for the two sides of a battle.
///
/// A roll is uniform between the floor and the attacker's `atk`. When `atk`
/// is below the floor the two bounds swap, and both ends are raised to at
/// least 1, so every hit does some damage and the range is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageRules {
    /// Minimum roll for the player's attack
    pub player_floor: i32,
    /// Minimum roll for a monster's counter-attack
    pub monster_floor: i32,
}

impl Default for DamageRules {
    fn default() -> Self {
        Self {
            player_floor: crate::config::PLAYER_DAMAGE_FLOOR,
            monster_floor: crate::config::MONSTER_DAMAGE_FLOOR,
        }
    }
}

impl DamageRules {
    /// Inclusive roll range for an attacker with the given floor and `atk`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::DamageRules;
    ///
    /// assert_eq!(DamageRules::damage_range(5, 10), 5..=10);
    /// assert_eq!(DamageRules::damage_range(5, 3), 3..=5);
    /// assert_eq!(DamageRules::damage_range(3, 0), 1..=3);
    /// ```
    pub fn damage_range(floor: i32, atk: i32) -> RangeInclusive<i32> {
        let low = floor.min(atk).max(1);
        let high = floor.max(atk).max(low);
        low..=high
    }

    pub fn player_range(&self, player: &CombatStats) -> RangeInclusive<i32> {
        Self::damage_range(self.player_floor, player.atk)
    }

    pub fn monster_range(&self, monster: &CombatStats) -> RangeInclusive<i32> {
        Self::damage_range(self.monster_floor, monster.atk)
    }
}

/// Damage dealt in one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Damage the player dealt to the monster
    pub dealt: i32,
    /// Damage the monster dealt back, if it survived to counter-attack
    pub taken: Option<i32>,
}

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Both sides are still standing
    Continue,
    /// The monster's hp dropped to zero or below
    MonsterDefeated,
    /// The counter-attack dropped the player's hp to zero or below
    PlayerDefeated,
}

/// A fight in progress against one monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSession {
    /// The engaged monster
    pub monster_id: EntityId,
    /// Turns resolved so far
    pub turns: u32,
    /// Result of the most recent turn, for the battle panel
    pub last_exchange: Option<Exchange>,
}

impl BattleSession {
    pub fn new(monster_id: EntityId) -> Self {
        Self {
            monster_id,
            turns: 0,
            last_exchange: None,
        }
    }

    /// Resolves one turn: the player strikes, and a surviving monster strikes back.
    pub fn resolve_turn<D: Dice + ?Sized>(
        &mut self,
        player: &mut CombatStats,
        monster: &mut CombatStats,
        rules: &DamageRules,
        dice: &mut D,
    ) -> (Exchange, TurnOutcome) {
        self.turns += 1;

        let dealt = dice.roll(rules.player_range(player));
        monster.take_damage(dealt);
        if monster.is_defeated() {
            let exchange = Exchange { dealt, taken: None };
            self.last_exchange = Some(exchange);
            return (exchange, TurnOutcome::MonsterDefeated);
        }

        let taken = dice.roll(rules.monster_range(monster));
        player.take_damage(taken);
        let exchange = Exchange {
            dealt,
            taken: Some(taken),
        };
        self.last_exchange = Some(exchange);

        if player.is_defeated() {
            (exchange, TurnOutcome::PlayerDefeated)
        } else {
            (exchange, TurnOutcome::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_entity_id, ScriptedDice};

    #[test]
    fn test_damage_range_policy() {
        assert_eq!(DamageRules::damage_range(5, 10), 5..=10);
        assert_eq!(DamageRules::damage_range(3, 3), 3..=3);
        assert_eq!(DamageRules::damage_range(5, 4), 4..=5);
        assert_eq!(DamageRules::damage_range(3, -2), 1..=3);
        assert_eq!(DamageRules::damage_range(0, 0), 1..=1);
    }

    #[test]
    fn test_killing_blow_skips_counter_attack() {
        let mut session = BattleSession::new(new_entity_id());
        let mut player = CombatStats::new(50, 10);
        let mut monster = CombatStats::new(8, 7);
        let mut dice = ScriptedDice::new([8, 7]);

        let (exchange, outcome) =
            session.resolve_turn(&mut player, &mut monster, &DamageRules::default(), &mut dice);

        assert_eq!(outcome, TurnOutcome::MonsterDefeated);
        assert_eq!(exchange, Exchange { dealt: 8, taken: None });
        assert_eq!(player.hp, 50);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_surviving_monster_counter_attacks() {
        let mut session = BattleSession::new(new_entity_id());
        let mut player = CombatStats::new(50, 10);
        let mut monster = CombatStats::new(30, 7);
        let mut dice = ScriptedDice::new([6, 4]);

        let (exchange, outcome) =
            session.resolve_turn(&mut player, &mut monster, &DamageRules::default(), &mut dice);

        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(exchange.taken, Some(4));
        assert_eq!(monster.hp, 24);
        assert_eq!(player.hp, 46);
        assert_eq!(session.turns, 1);
        assert_eq!(session.last_exchange, Some(exchange));
        assert_eq!(dice.requested, vec![5..=10, 3..=7]);
    }

    #[test]
    fn test_counter_attack_can_defeat_player() {
        let mut session = BattleSession::new(new_entity_id());
        let mut player = CombatStats::new(3, 10);
        let mut monster = CombatStats::new(30, 7);
        let mut dice = ScriptedDice::new([5, 7]);

        let (_, outcome) =
            session.resolve_turn(&mut player, &mut monster, &DamageRules::default(), &mut dice);

        assert_eq!(outcome, TurnOutcome::PlayerDefeated);
        assert_eq!(player.hp, -4);
    }

    #[test]
    fn test_weak_attacker_uses_swapped_range() {
        let mut session = BattleSession::new(new_entity_id());
        let mut player = CombatStats::new(50, 2);
        let mut monster = CombatStats::new(30, 1);
        let mut dice = ScriptedDice::new([100, 100]);

        let (exchange, _) =
            session.resolve_turn(&mut player, &mut monster, &DamageRules::default(), &mut dice);

        assert_eq!(exchange.dealt, 5);
        assert_eq!(exchange.taken, Some(3));
        assert_eq!(dice.requested, vec![2..=5, 1..=3]);
    }
}
