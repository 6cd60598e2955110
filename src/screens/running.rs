use crate::config::Config;
use crate::core::frame::Frame;
use crate::core::input::InputEvent;
use crate::game::session::GameSession;
use crate::screens::ScreenAction;
use crate::ui::scroll::{self, ListLayout, ScrollState, Viewport};
use crate::ui::{color, font, text};

const CAPTION_SCALE: i32 = 1;
const CAPTION_GAP: i32 = 15;
const PANEL_HEADER_H: i32 = 28;
const PANEL_LINE_H: i32 = 12;

pub fn panel_viewport(cfg: &Config) -> Viewport {
    Viewport {
        x: cfg.play_width(),
        y: PANEL_HEADER_H,
        w: cfg.panel_width,
        h: cfg.screen_height as i32 - PANEL_HEADER_H,
    }
}

fn numbered(history: &[String]) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {title}", i + 1))
        .collect()
}

pub fn panel_layout(cfg: &Config, history: &[String]) -> ListLayout {
    scroll::layout(
        &numbered(history),
        cfg.panel_width,
        PANEL_LINE_H,
        CAPTION_SCALE,
    )
}

pub fn handle_input(
    session: &mut GameSession,
    panel: &mut ScrollState,
    cfg: &Config,
    ev: &InputEvent,
) -> ScreenAction {
    match ev {
        InputEvent::Quit => ScreenAction::Exit,
        InputEvent::MoveLeft => {
            session.actor.move_left();
            ScreenAction::None
        }
        InputEvent::MoveRight => {
            session.actor.move_right();
            ScreenAction::None
        }
        InputEvent::Select => ScreenAction::Finish,
        InputEvent::Wheel(lines) => {
            let vp = panel_viewport(cfg);
            let lay = panel_layout(cfg, &session.history);
            panel.wheel(*lines, lay.total_height, vp.h);
            ScreenAction::None
        }
        InputEvent::MouseDown { .. } => ScreenAction::None,
    }
}

pub fn draw(frame: &mut Frame, cfg: &Config, session: &GameSession, panel: ScrollState) {
    frame.clear(color::BLACK);

    let play_w = cfg.play_width();
    let screen_h = cfg.screen_height as i32;

    // Lane dividers and the panel border.
    for lane in 1..cfg.lane_count as i32 {
        let x = play_w * lane / cfg.lane_count as i32;
        frame.fill_rect(x, 0, 1, screen_h, color::LANE_LINE);
    }
    frame.fill_rect(play_w - 1, 0, 1, screen_h, color::PANEL_BORDER);

    // Falling posters with wrapped captions underneath.
    for poster in &session.active_pair {
        let rect = poster.bounding_box(cfg);
        frame.blit(&poster.bitmap, rect.x, rect.y);
        frame.stroke_rect(rect.x, rect.y, rect.w, rect.h, color::WHITE);

        let caption_w = rect.w + 20;
        let lines = text::wrap_width(&poster.title, caption_w, |s| {
            font::text_width(s, CAPTION_SCALE)
        });
        let mut y = rect.y + rect.h + CAPTION_GAP;
        let cx = rect.x + rect.w / 2;
        for line in &lines {
            font::draw_text_centered(frame, line, cx, y, CAPTION_SCALE, color::WHITE);
            y += font::line_height(CAPTION_SCALE) + 2;
        }
    }

    // The actor.
    let actor_box = session.actor.bounding_box(cfg);
    frame.fill_rect(actor_box.x, actor_box.y, actor_box.w, actor_box.h, color::PLAYER);

    // Progress, where the original drew its score.
    let progress = format!("{} / {} picked", session.history.len(), session.total_pairs());
    font::draw_text_centered(frame, &progress, play_w / 2, screen_h - 30, 1, color::WHITE);
    font::draw_text(frame, "SPACE finish", 8, 8, 1, color::DIM_TEXT);

    // Live picks panel.
    let vp = panel_viewport(cfg);
    frame.fill_rect(vp.x, 0, vp.w, PANEL_HEADER_H, color::PANEL_BG);
    font::draw_text_centered(
        frame,
        "PICKS",
        vp.x + vp.w / 2,
        (PANEL_HEADER_H - font::line_height(1)) / 2,
        1,
        color::ACCENT,
    );
    let lay = panel_layout(cfg, &session.history);
    scroll::draw(frame, vp, &lay, panel, CAPTION_SCALE, color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::spawner::PairSpawner;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn session(cfg: &Config) -> GameSession {
        let mut cat = BTreeMap::new();
        cat.insert("All".to_string(), vec!["A".to_string(), "B".to_string()]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut s = GameSession::new(cfg, &cat, 0, &mut rng);
        s.spawner = PairSpawner::from_pool(vec!["A".into(), "B".into()]);
        s
    }

    #[test]
    fn arrows_steer_and_select_finishes() {
        let cfg = Config::default();
        let mut s = session(&cfg);
        let mut panel = ScrollState::default();

        assert_eq!(
            handle_input(&mut s, &mut panel, &cfg, &InputEvent::MoveRight),
            ScreenAction::None
        );
        assert_eq!(s.actor.lane(), 1);
        assert_eq!(
            handle_input(&mut s, &mut panel, &cfg, &InputEvent::Select),
            ScreenAction::Finish
        );
        assert_eq!(
            handle_input(&mut s, &mut panel, &cfg, &InputEvent::Quit),
            ScreenAction::Exit
        );
    }

    #[test]
    fn panel_entries_are_numbered_in_pick_order() {
        let items = numbered(&["C".to_string(), "B".to_string()]);
        assert_eq!(items, vec!["1. C", "2. B"]);
    }
}
