use crate::config::Config;
use crate::core::frame::Frame;
use crate::core::input::InputEvent;
use crate::screens::ScreenAction;
use crate::ui::{color, font, text};

const HEADLINE: &str = "Pick your favorite movie from each pair!";
const HEADLINE_SCALE: i32 = 2;
const HINT_SCALE: i32 = 1;
const WRAP_MARGIN: i32 = 40;

pub fn handle_input(ev: &InputEvent) -> ScreenAction {
    match ev {
        InputEvent::Quit => ScreenAction::Exit,
        InputEvent::Select => ScreenAction::Begin,
        _ => ScreenAction::None,
    }
}

pub fn draw(frame: &mut Frame, cfg: &Config) {
    frame.clear(color::BLACK);
    let cx = cfg.screen_width as i32 / 2;
    let cy = cfg.screen_height as i32 / 2;

    let wrap_w = cfg.screen_width as i32 - 2 * WRAP_MARGIN;
    let lines = text::wrap_width(HEADLINE, wrap_w, |s| font::text_width(s, HEADLINE_SCALE));
    let line_h = font::line_height(HEADLINE_SCALE) + 6;
    let mut y = cy - (lines.len() as i32 * line_h) / 2 - 40;
    for line in &lines {
        font::draw_text_centered(frame, line, cx, y, HEADLINE_SCALE, color::WHITE);
        y += line_h;
    }

    let hints = [
        "LEFT / RIGHT  steer into the poster you prefer",
        "SPACE  start",
        "ESC  quit",
    ];
    let mut y = cy + 40;
    for hint in hints {
        font::draw_text_centered(frame, hint, cx, y, HINT_SCALE, color::DIM_TEXT);
        y += font::line_height(HINT_SCALE) + 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_begins_and_escape_exits() {
        assert_eq!(handle_input(&InputEvent::Select), ScreenAction::Begin);
        assert_eq!(handle_input(&InputEvent::Quit), ScreenAction::Exit);
        assert_eq!(handle_input(&InputEvent::MoveLeft), ScreenAction::None);
    }
}
