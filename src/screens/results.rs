use crate::config::Config;
use crate::core::frame::Frame;
use crate::core::input::InputEvent;
use crate::screens::ScreenAction;
use crate::ui::scroll::{self, ListLayout, ScrollState, Viewport};
use crate::ui::{color, font};

const LIST_SCALE: i32 = 1;
const LIST_LINE_H: i32 = 18;
const LIST_TOP: i32 = 80;
const LIST_BOTTOM_MARGIN: i32 = 60;
const LIST_MAX_W: i32 = 520;

pub fn list_viewport(cfg: &Config) -> Viewport {
    let w = LIST_MAX_W.min(cfg.screen_width as i32 - 40);
    Viewport {
        x: (cfg.screen_width as i32 - w) / 2,
        y: LIST_TOP,
        w,
        h: cfg.screen_height as i32 - LIST_TOP - LIST_BOTTOM_MARGIN,
    }
}

fn ranked(history: &[String]) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect()
}

pub fn list_layout(cfg: &Config, history: &[String]) -> ListLayout {
    scroll::layout(&ranked(history), list_viewport(cfg).w, LIST_LINE_H, LIST_SCALE)
}

pub fn handle_input(
    scroll_state: &mut ScrollState,
    cfg: &Config,
    history: &[String],
    ev: &InputEvent,
) -> ScreenAction {
    match ev {
        InputEvent::Quit => ScreenAction::Exit,
        InputEvent::Select => ScreenAction::Reset,
        InputEvent::Wheel(lines) => {
            let vp = list_viewport(cfg);
            let lay = list_layout(cfg, history);
            scroll_state.wheel(*lines, lay.total_height, vp.h);
            ScreenAction::None
        }
        InputEvent::MouseDown { x, y } => {
            let vp = list_viewport(cfg);
            // Clicks on the scrollbar column jump the view.
            if *x >= vp.x + vp.w - 12 && *x < vp.x + vp.w && *y >= vp.y && *y < vp.y + vp.h {
                let lay = list_layout(cfg, history);
                scroll_state.offset =
                    scroll::offset_for_track_click(*y - vp.y, lay.total_height, vp.h);
            }
            ScreenAction::None
        }
        _ => ScreenAction::None,
    }
}

pub fn draw(frame: &mut Frame, cfg: &Config, history: &[String], scroll_state: ScrollState) {
    frame.clear(color::BLACK);
    let cx = cfg.screen_width as i32 / 2;

    let heading = format!("YOUR RANKING ({} picks)", history.len());
    font::draw_text_centered(frame, &heading, cx, 30, 2, color::ACCENT);

    if history.is_empty() {
        font::draw_text_centered(frame, "No picks this run.", cx, LIST_TOP + 20, 1, color::DIM_TEXT);
    } else {
        let vp = list_viewport(cfg);
        let lay = list_layout(cfg, history);
        scroll::draw(frame, vp, &lay, scroll_state, LIST_SCALE, color::WHITE);
    }

    font::draw_text_centered(
        frame,
        "SPACE play again   ESC quit",
        cx,
        cfg.screen_height as i32 - 36,
        1,
        color::DIM_TEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_resets_and_wheel_scrolls() {
        let cfg = Config::default();
        let history: Vec<String> = (0..80).map(|i| format!("Movie {i}")).collect();
        let mut scroll_state = ScrollState::default();

        assert_eq!(
            handle_input(&mut scroll_state, &cfg, &history, &InputEvent::Select),
            ScreenAction::Reset
        );

        let action = handle_input(&mut scroll_state, &cfg, &history, &InputEvent::Wheel(-3.0));
        assert_eq!(action, ScreenAction::None);
        assert!(scroll_state.offset < 0.0);
    }

    #[test]
    fn wheel_on_short_history_stays_at_top() {
        let cfg = Config::default();
        let history = vec!["Only One".to_string()];
        let mut scroll_state = ScrollState::default();
        handle_input(&mut scroll_state, &cfg, &history, &InputEvent::Wheel(-10.0));
        assert_eq!(scroll_state.offset, 0.0);
    }
}
