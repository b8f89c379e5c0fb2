//! # Input Module
//!
//! Keyboard polling through macroquad, turned into [`InputSnapshot`]s.

pub mod commands;

pub use commands::*;

use crate::Direction;
use macroquad::prelude::*;

/// Which physical keys drive which inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    pub interact: Vec<KeyCode>,
    pub confirm: Vec<KeyCode>,
    pub cancel: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::Up, KeyCode::W],
            down: vec![KeyCode::Down, KeyCode::S],
            left: vec![KeyCode::Left, KeyCode::A],
            right: vec![KeyCode::Right, KeyCode::D],
            interact: vec![KeyCode::E],
            confirm: vec![KeyCode::Enter, KeyCode::KpEnter],
            cancel: vec![KeyCode::Escape],
        }
    }
}

impl KeyBindings {
    /// Keys bound to a movement direction.
    pub fn keys_for(&self, direction: Direction) -> &[KeyCode] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// The edge event a key produces, if any.
    pub fn event_for(&self, key: KeyCode) -> Option<InputEvent> {
        if self.interact.contains(&key) {
            Some(InputEvent::Interact)
        } else if self.confirm.contains(&key) {
            Some(InputEvent::Confirm)
        } else if self.cancel.contains(&key) {
            Some(InputEvent::Cancel)
        } else {
            None
        }
    }

    /// Every key that can produce an edge event, in a fixed order.
    pub fn event_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.interact
            .iter()
            .chain(&self.confirm)
            .chain(&self.cancel)
            .copied()
    }
}

/// Input handler for processing player commands.
///
/// Polls macroquad's keyboard state once per rendered frame and converts it
/// into an [`InputSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    pub bindings: KeyBindings,
}

impl InputHandler {
    /// Creates a new input handler with the default bindings.
    ///
    /// # Examples
    ///
    /// ```
    /// use wanderer::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// // Ready to capture input
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the keyboard and window state for this frame.
    ///
    /// Requires [`prevent_quit`] to have been called for window-close
    /// requests to show up as [`InputEvent::Quit`].
    pub fn capture(&self) -> InputSnapshot {
        let mut held = HeldDirections::none();
        for direction in Direction::all() {
            let pressed = self
                .bindings
                .keys_for(direction)
                .iter()
                .any(|key| is_key_down(*key));
            held.set(direction, pressed);
        }

        let mut events: Vec<InputEvent> = self
            .bindings
            .event_keys()
            .filter(|key| is_key_pressed(*key))
            .filter_map(|key| self.bindings.event_for(key))
            .collect();
        events.dedup();

        if is_quit_requested() {
            events.push(InputEvent::Quit);
        }

        InputSnapshot { held, events }
    }
}
