//! # Dice
//!
//! Randomness seam for combat rolls. The live game rolls with a seeded
//! [`StdRng`]; replays and tests feed scripted values instead.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// Source of uniformly distributed integer rolls.
pub trait Dice {
    /// Rolls an integer in `range` (both ends inclusive). `range` is never empty.
    fn roll(&mut self, range: RangeInclusive<i32>) -> i32;
}

impl Dice for StdRng {
    fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }
}

/// Replays a fixed sequence of rolls.
///
/// Each scripted value is clamped into the requested range, so a script can
/// say "roll high" with a large number. Once the script runs out every roll
/// returns the low end of the range.
///
/// # Examples
///
/// ```
/// use wanderer::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([7, 100]);
/// assert_eq!(dice.roll(5..=10), 7);
/// assert_eq!(dice.roll(5..=10), 10);
/// assert_eq!(dice.roll(5..=10), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    /// Ranges requested so far, oldest first
    pub requested: Vec<RangeInclusive<i32>>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            requested: Vec::new(),
        }
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        let (low, high) = (*range.start(), *range.end());
        self.requested.push(range);
        match self.rolls.pop_front() {
            Some(value) => value.clamp(low, high),
            None => low,
        }
    }
}
