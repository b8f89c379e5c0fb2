//! # Scene Management System
//!
//! Owns the frame loop: polls input once per rendered frame, runs a fixed
//! number of logic ticks, draws, and yields to macroquad. A defeat switches
//! to a short game-over scene before the loop ends.

use crate::{
    FixedTimestep, GameExit, GameState, InputHandler, InputSnapshot, MacroquadDisplay,
    TickOutcome,
};
use log::info;
use macroquad::prelude::{
    draw_rectangle, draw_text, get_frame_time, is_key_pressed, measure_text, next_frame,
    prevent_quit, Color, KeyCode, RED,
};
use rand::rngs::StdRng;

/// How long the game-over screen stays up before the loop ends.
pub const GAME_OVER_DISPLAY_SECONDS: f32 = 2.0;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// The player was defeated; counts up to [`GAME_OVER_DISPLAY_SECONDS`]
    GameOver { elapsed: f32 },
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    /// Battle dice; continues the generation stream so a seed fixes the session
    rng: StdRng,
    timestep: FixedTimestep,
    /// Input captured but not yet consumed by a tick
    pending: InputSnapshot,
}

impl SceneManager {
    pub fn new(game_state: GameState, input_handler: InputHandler, rng: StdRng) -> Self {
        let timestep = FixedTimestep::new(game_state.config.target_fps);
        Self {
            current_scene: SceneType::Playing,
            game_state,
            display: MacroquadDisplay::new(),
            input_handler,
            rng,
            timestep,
            pending: InputSnapshot::idle(),
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> GameExit {
        // Window close requests arrive as input events instead of killing the process
        prevent_quit();

        let exit = loop {
            let frame_seconds = get_frame_time();
            let finished = match self.current_scene {
                SceneType::Playing => self.update_playing_scene(frame_seconds),
                SceneType::GameOver { elapsed } => self.update_game_over_scene(elapsed + frame_seconds),
            };
            if let Some(exit) = finished {
                break exit;
            }
            next_frame().await;
        };

        self.log_statistics(exit);
        exit
    }

    /// Runs this frame's ticks and draws. Returns the exit once the game
    /// loop should stop.
    fn update_playing_scene(&mut self, frame_seconds: f32) -> Option<GameExit> {
        self.pending.absorb(self.input_handler.capture());

        let steps = self.timestep.advance(f64::from(frame_seconds));
        for _ in 0..steps {
            let input = self.pending.take_tick();
            match self.game_state.update(&input, &mut self.rng) {
                TickOutcome::Continue => {}
                TickOutcome::Exit(GameExit::Quit) => return Some(GameExit::Quit),
                TickOutcome::Exit(GameExit::Defeated) => {
                    self.current_scene = SceneType::GameOver { elapsed: 0.0 };
                    break;
                }
            }
        }

        self.display.render_game(&self.game_state);
        None
    }

    /// Shows the game-over banner until it times out or a key dismisses it.
    fn update_game_over_scene(&mut self, elapsed: f32) -> Option<GameExit> {
        self.current_scene = SceneType::GameOver { elapsed };

        self.display.render_game(&self.game_state);
        render_game_over_banner(
            self.game_state.config.screen_width as f32,
            self.game_state.config.screen_height as f32,
        );

        let dismissed = [KeyCode::Enter, KeyCode::Escape]
            .into_iter()
            .any(is_key_pressed);
        let quit = self.input_handler.capture().events.contains(&crate::InputEvent::Quit);
        if elapsed >= GAME_OVER_DISPLAY_SECONDS || dismissed || quit {
            Some(GameExit::Defeated)
        } else {
            None
        }
    }

    fn log_statistics(&self, exit: GameExit) {
        let stats = &self.game_state.statistics;
        info!(
            "Session ended ({:?}) after {} ticks: {} battles, {} won, {} fled, {} damage dealt, {} taken, {} dialogs",
            exit,
            stats.ticks,
            stats.battles_started,
            stats.monsters_defeated,
            stats.battles_fled,
            stats.damage_dealt,
            stats.damage_taken,
            stats.dialogs_opened
        );
    }
}

fn render_game_over_banner(screen_width: f32, screen_height: f32) {
    const TEXT: &str = "GAME OVER";
    const FONT_SIZE: u16 = 64;

    draw_rectangle(0.0, 0.0, screen_width, screen_height, Color::new(0.0, 0.0, 0.0, 0.6));
    let size = measure_text(TEXT, None, FONT_SIZE, 1.0);
    draw_text(
        TEXT,
        (screen_width - size.width) / 2.0,
        (screen_height + size.height) / 2.0,
        f32::from(FONT_SIZE),
        RED,
    );
}
