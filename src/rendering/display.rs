//! # Display Management
//!
//! Draws the game state with macroquad: the visible part of the map, every
//! entity as a colored rectangle, a small status line, and the dialog or
//! battle overlay for the current mode.

use crate::rendering::ui::{draw_battle, draw_dialog, UI_FONT_SIZE};
use crate::{Camera, CellKind, Entity, GameMode, GameState, Map, Position, Rect};
use macroquad::prelude::{clear_background, draw_rectangle, draw_text, Color, BLACK, WHITE};

macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        Color::new($r as f32 / 255.0, $g as f32 / 255.0, $b as f32 / 255.0, 1.0)
    };
}

const FLOOR_COLOR: Color = rgb!(200, 230, 200);
const WALL_COLOR: Color = rgb!(120, 120, 120);
const NPC_COLOR: Color = rgb!(60, 120, 255);
const MONSTER_COLOR: Color = rgb!(200, 50, 50);
const PLAYER_FRAMES: [Color; 2] = [rgb!(50, 205, 50), rgb!(30, 160, 30)];

/// Fill color for a map cell.
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Floor => FLOOR_COLOR,
        CellKind::Wall => WALL_COLOR,
    }
}

/// Player color for an animation frame.
pub fn player_color(frame: usize) -> Color {
    PLAYER_FRAMES[frame % PLAYER_FRAMES.len()]
}

/// The cells touched by the camera view, as inclusive min/max cell
/// coordinates clipped to the map. `None` when the view misses the map.
pub fn visible_cells(map: &Map, camera: &Camera) -> Option<(Position, Position)> {
    let view = camera.view_rect().intersection(&map.pixel_bounds())?;
    let min = map.cell_at_pixel(view.left(), view.top());
    let max = map.cell_at_pixel(view.right() - 1, view.bottom() - 1);
    Some((min, max))
}

/// Macroquad display manager for the game.
#[derive(Debug, Clone, Default)]
pub struct MacroquadDisplay {
    /// Cells drawn during the last frame
    pub cells_drawn: usize,
}

impl MacroquadDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the complete game screen.
    ///
    /// Map and entities first, then the status line, then the overlay for
    /// the current mode on top.
    pub fn render_game(&mut self, game_state: &GameState) {
        clear_background(BLACK);

        self.render_map(&game_state.map, &game_state.camera);
        self.render_entities(game_state);
        self.render_status(game_state);

        match &game_state.mode {
            GameMode::Exploring => {}
            GameMode::Dialog { message } => draw_dialog(
                message,
                game_state.config.screen_width,
                game_state.config.screen_height,
            ),
            GameMode::Battle(session) => {
                if let Some(monster) = game_state.engaged_monster() {
                    draw_battle(game_state, session, monster);
                }
            }
        }
    }

    /// Draws only the cells inside the camera view.
    fn render_map(&mut self, map: &Map, camera: &Camera) {
        self.cells_drawn = 0;
        let Some((min, max)) = visible_cells(map, camera) else {
            return;
        };

        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let position = Position::new(x, y);
                if let Some(cell) = map.get_cell(position) {
                    fill(&camera.to_screen(&map.cell_rect(position)), cell_color(cell.kind));
                    self.cells_drawn += 1;
                }
            }
        }
    }

    /// NPCs, then monsters, then the player on top.
    fn render_entities(&self, game_state: &GameState) {
        let camera = &game_state.camera;
        let view = camera.view_rect();

        for npc in &game_state.npcs {
            let bounds = npc.bounds();
            if bounds.intersects(&view) {
                fill(&camera.to_screen(&bounds), NPC_COLOR);
            }
        }
        for monster in &game_state.monsters {
            if monster.bounds.intersects(&view) {
                fill(&camera.to_screen(&monster.bounds), MONSTER_COLOR);
            }
        }

        let player = &game_state.player;
        fill(
            &camera.to_screen(&player.bounds),
            player_color(player.animation.current_frame()),
        );
    }

    /// Player stats and an interaction hint in the top-left corner.
    fn render_status(&self, game_state: &GameState) {
        let stats = game_state.player.stats;
        let status = format!(
            "HP {}  ATK {}  Monsters {}",
            stats.hp,
            stats.atk,
            game_state.monsters.len()
        );
        draw_text(&status, 10.0, 10.0 + UI_FONT_SIZE, UI_FONT_SIZE, WHITE);

        if game_state.mode.is_exploring() && game_state.nearby_npc().is_some() {
            draw_text("E = Talk", 10.0, 36.0 + UI_FONT_SIZE, UI_FONT_SIZE, WHITE);
        }
    }
}

fn fill(rect: &Rect, color: Color) {
    draw_rectangle(
        rect.x as f32,
        rect.y as f32,
        rect.w as f32,
        rect.h as f32,
        color,
    );
}
