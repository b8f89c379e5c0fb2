//! # User Interface Elements
//!
//! Dialog and battle overlays. Layout and text are computed by plain
//! functions so they can be tested without a window; the `draw_*` functions
//! only paint what those return.

use crate::{BattleSession, GameState, Monster, Rect};
use macroquad::prelude::{draw_rectangle, draw_rectangle_lines, draw_text, Color, WHITE};

/// Font size for overlay text
pub const UI_FONT_SIZE: f32 = 20.0;

/// Vertical distance between overlay text lines
pub const UI_LINE_HEIGHT: f32 = 30.0;

const DIALOG_BACKGROUND: Color = Color::new(20.0 / 255.0, 20.0 / 255.0, 20.0 / 255.0, 1.0);
const BATTLE_BACKGROUND: Color = Color::new(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 1.0);

/// Key hint shown at the bottom of the battle panel.
pub const BATTLE_HINT: &str = "Enter = Attack    ESC = Run";

/// The dialog box along the bottom of the screen.
pub fn dialog_panel(screen_width: i32, screen_height: i32) -> Rect {
    Rect::new(50, screen_height - 150, screen_width - 100, 130)
}

/// The battle panel, inset 100px from every screen edge.
pub fn battle_panel(screen_width: i32, screen_height: i32) -> Rect {
    Rect::new(100, 100, screen_width - 200, screen_height - 200)
}

/// Splits a message into display lines.
///
/// Explicit `\n` breaks are kept. Lines longer than `max_chars` are wrapped
/// at word boundaries; a single word longer than the limit is split.
///
/// # Examples
///
/// ```
/// use wanderer::wrap_text;
///
/// assert_eq!(wrap_text("Hello traveler!\nWelcome.", 40), vec!["Hello traveler!", "Welcome."]);
/// assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
/// ```
pub fn wrap_text(message: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in message.split('\n') {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..max_chars).collect());
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() {
                word.len()
            } else {
                current.chars().count() + 1 + word.len()
            };
            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        lines.push(current);
    }

    lines
}

/// Roughly how many characters of overlay text fit in `width` pixels.
pub fn chars_per_line(width: i32, font_size: f32) -> usize {
    // Average glyph advance is about half the font size for the default font
    ((width as f32) / (font_size * 0.5)).floor().max(1.0) as usize
}

/// Text lines for the dialog box, already wrapped to the panel width.
pub fn dialog_lines(message: &str, panel: &Rect) -> Vec<String> {
    wrap_text(message, chars_per_line(panel.w - 40, UI_FONT_SIZE))
}

/// Text lines for the battle panel body, top to bottom.
pub fn battle_lines(state: &GameState, session: &BattleSession, monster: &Monster) -> Vec<String> {
    let mut lines = vec![
        format!("Player HP : {}", state.player.stats.hp),
        format!("Monster HP : {}", monster.stats.hp),
    ];
    if let Some(exchange) = session.last_exchange {
        let mut summary = format!("You hit for {}.", exchange.dealt);
        if let Some(taken) = exchange.taken {
            summary.push_str(&format!(" The monster hits back for {}.", taken));
        }
        lines.push(summary);
    }
    lines
}

/// Draws the dialog box with its message.
pub fn draw_dialog(message: &str, screen_width: i32, screen_height: i32) {
    let panel = dialog_panel(screen_width, screen_height);
    draw_panel(&panel, DIALOG_BACKGROUND, 2.0);

    let mut y = panel.top() as f32 + 20.0;
    for line in dialog_lines(message, &panel) {
        draw_text(&line, panel.left() as f32 + 20.0, y + UI_FONT_SIZE, UI_FONT_SIZE, WHITE);
        y += UI_LINE_HEIGHT;
    }
}

/// Draws the battle panel for the engaged monster.
pub fn draw_battle(state: &GameState, session: &BattleSession, monster: &Monster) {
    let panel = battle_panel(state.config.screen_width, state.config.screen_height);
    draw_panel(&panel, BATTLE_BACKGROUND, 3.0);

    draw_text(
        "[BATTLE]",
        panel.center_x() as f32 - 50.0,
        panel.top() as f32 + 20.0 + UI_FONT_SIZE,
        UI_FONT_SIZE,
        WHITE,
    );

    let left = panel.left() as f32 + 40.0;
    let mut y = panel.top() as f32 + 80.0;
    for line in battle_lines(state, session, monster) {
        draw_text(&line, left, y + UI_FONT_SIZE, UI_FONT_SIZE, WHITE);
        y += 40.0;
    }

    draw_text(BATTLE_HINT, left, panel.bottom() as f32 - 50.0 + UI_FONT_SIZE, UI_FONT_SIZE, WHITE);
}

fn draw_panel(panel: &Rect, background: Color, border: f32) {
    let (x, y, w, h) = (panel.x as f32, panel.y as f32, panel.w as f32, panel.h as f32);
    draw_rectangle(x, y, w, h, background);
    draw_rectangle_lines(x, y, w, h, border, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CombatStats, Exchange, GameConfig, Map};

    #[test]
    fn test_panel_layout() {
        assert_eq!(dialog_panel(800, 600), Rect::new(50, 450, 700, 130));
        assert_eq!(battle_panel(800, 600), Rect::new(100, 100, 600, 400));
    }

    #[test]
    fn test_wrap_keeps_explicit_breaks() {
        let lines = wrap_text("Beware of monsters\nin the forest.", 60);
        assert_eq!(lines, vec!["Beware of monsters", "in the forest."]);
    }

    #[test]
    fn test_wrap_long_line() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|line| line.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let lines = wrap_text("aaaaaaaaaa b", 4);
        assert_eq!(lines, vec!["aaaa", "aaaa", "aa b"]);
    }

    #[test]
    fn test_wrap_empty_lines_survive() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_dialog_lines_fit_panel() {
        let panel = dialog_panel(800, 600);
        let message = "word ".repeat(60);
        let limit = chars_per_line(panel.w - 40, UI_FONT_SIZE);
        for line in dialog_lines(&message, &panel) {
            assert!(line.chars().count() <= limit);
        }
    }

    #[test]
    fn test_battle_lines() {
        let map = Map::from_ascii(&["....", "...."], 32).unwrap();
        let state =
            GameState::from_parts(GameConfig::default(), map, Vec::new(), Vec::new()).unwrap();
        let monster = Monster::new(48, 16, 26, CombatStats::new(12, 4));
        let mut session = BattleSession::new(monster.id);

        let lines = battle_lines(&state, &session, &monster);
        assert_eq!(lines, vec!["Player HP : 50", "Monster HP : 12"]);

        session.last_exchange = Some(Exchange { dealt: 6, taken: Some(3) });
        let lines = battle_lines(&state, &session, &monster);
        assert_eq!(lines[2], "You hit for 6. The monster hits back for 3.");
    }
}
