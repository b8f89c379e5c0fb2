//! # Command Definitions
//!
//! Plain-data input for one logic tick, independent of the windowing layer.
//! Tests and replays build these directly.

use crate::Direction;
use serde::{Deserialize, Serialize};

/// A key-down edge that drives a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Talk to a nearby NPC
    Interact,
    /// Attack in battle, or close a dialog
    Confirm,
    /// Flee from battle, or close a dialog
    Cancel,
    /// Window close request
    Quit,
}

/// Which movement directions are currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn none() -> Self {
        Self::default()
    }

    /// Holds a single direction.
    pub fn only(direction: Direction) -> Self {
        let mut held = Self::none();
        held.set(direction, true);
        held
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// Builder-style variant of [`HeldDirections::set`].
    pub fn with(mut self, direction: Direction) -> Self {
        self.set(direction, true);
        self
    }

    /// Axis values in -1..=1; opposite keys cancel out.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::{Direction, HeldDirections};
    ///
    /// let held = HeldDirections::only(Direction::Left).with(Direction::Down);
    /// assert_eq!(held.axis(), (-1, 1));
    /// ```
    pub fn axis(&self) -> (i32, i32) {
        let x = i32::from(self.right) - i32::from(self.left);
        let y = i32::from(self.down) - i32::from(self.up);
        (x, y)
    }
}

/// Everything the game needs to know about input for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Directions held at capture time
    pub held: HeldDirections,
    /// Key-down edges since the last tick, oldest first
    pub events: Vec<InputEvent>,
}

impl InputSnapshot {
    /// A tick with nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A tick that only holds directions.
    pub fn holding(held: HeldDirections) -> Self {
        Self {
            held,
            events: Vec::new(),
        }
    }

    /// A tick with a single key-down edge and no held directions.
    pub fn pressed(event: InputEvent) -> Self {
        Self {
            held: HeldDirections::none(),
            events: vec![event],
        }
    }

    /// Folds a newer capture into this one: held state is replaced and
    /// events are appended, so no edge is lost between ticks.
    pub fn absorb(&mut self, newer: InputSnapshot) {
        self.held = newer.held;
        self.events.extend(newer.events);
    }

    /// Takes the input for one tick, leaving held directions in place for
    /// any further ticks run from the same capture.
    pub fn take_tick(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            events: std::mem::take(&mut self.events),
        }
    }
}
