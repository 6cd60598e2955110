//! Collision-driven selection.
//!
//! Committing a selection and clearing the active pair are two separate
//! steps so each can be verified on its own; `resolve_tick` sequences them.
//! At most one title is ever selected per tick, and a hit always removes the
//! whole pair, so the active poster count stays 0 or 2.

use crate::config::Config;
use crate::game::Rect;
use crate::game::poster::Poster;

/// First poster overlapping the actor, tested left lane before right.
pub fn find_hit(cfg: &Config, actor_box: Rect, pair: &[Poster]) -> Option<usize> {
    let mut order: Vec<usize> = (0..pair.len()).collect();
    order.sort_by_key(|&i| pair[i].lane);
    order
        .into_iter()
        .find(|&i| actor_box.overlaps(&pair[i].bounding_box(cfg)))
}

/// Appends the chosen title; history is append-only and never reordered.
pub fn commit_selection(history: &mut Vec<String>, title: String) {
    history.push(title);
}

/// Removes both posters; the pair disappears as a unit.
pub fn clear_active_pair(pair: &mut Vec<Poster>) {
    pair.clear();
}

/// Runs one tick of selection. Returns the selected title, if any.
pub fn resolve_tick(
    cfg: &Config,
    actor_box: Rect,
    pair: &mut Vec<Poster>,
    history: &mut Vec<String>,
) -> Option<String> {
    let hit = find_hit(cfg, actor_box, pair)?;
    let title = pair[hit].title.clone();
    commit_selection(history, title.clone());
    clear_active_pair(pair);
    Some(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn poster_at(cfg: &Config, lane: usize, title: &str, y: f32) -> Poster {
        let bitmap =
            RgbaImage::from_pixel(cfg.poster_width, cfg.poster_height_cap, Rgba([0, 0, 0, 255]));
        let mut p = Poster::new(cfg, lane, title.to_string(), bitmap);
        p.y = y;
        p
    }

    #[test]
    fn actor_lane_decides_the_winner() {
        let cfg = Config::default();
        // Both posters level with the actor; only the lane-0 one overlaps an
        // actor sitting in lane 0.
        let overlap_y = cfg.actor_top_y() as f32;
        let mut pair = vec![
            poster_at(&cfg, 0, "Inception", overlap_y),
            poster_at(&cfg, 1, "Titanic", overlap_y),
        ];
        let actor_box = Rect {
            x: cfg.lane_center_x(0) - cfg.actor_size / 2,
            y: cfg.actor_top_y(),
            w: cfg.actor_size,
            h: cfg.actor_size,
        };

        let mut history = Vec::new();
        let selected = resolve_tick(&cfg, actor_box, &mut pair, &mut history);
        assert_eq!(selected.as_deref(), Some("Inception"));
        assert_eq!(history, vec!["Inception"]);
        // The unselected poster is discarded with the pair.
        assert!(pair.is_empty());
    }

    #[test]
    fn left_lane_wins_ties_regardless_of_spawn_order() {
        let cfg = Config::default();
        let overlap_y = cfg.actor_top_y() as f32;
        // Actor box wide enough to touch both lanes.
        let actor_box = Rect {
            x: 0,
            y: cfg.actor_top_y(),
            w: cfg.play_width(),
            h: cfg.actor_size,
        };
        // Right-lane poster listed first; left must still win.
        let mut pair = vec![
            poster_at(&cfg, 1, "Right", overlap_y),
            poster_at(&cfg, 0, "Left", overlap_y),
        ];
        let mut history = Vec::new();
        let selected = resolve_tick(&cfg, actor_box, &mut pair, &mut history);
        assert_eq!(selected.as_deref(), Some("Left"));
    }

    #[test]
    fn no_overlap_selects_nothing() {
        let cfg = Config::default();
        let mut pair = vec![
            poster_at(&cfg, 0, "A", -150.0),
            poster_at(&cfg, 1, "B", -150.0),
        ];
        let actor_box = Rect {
            x: cfg.lane_center_x(0),
            y: cfg.actor_top_y(),
            w: cfg.actor_size,
            h: cfg.actor_size,
        };
        let mut history = Vec::new();
        assert!(resolve_tick(&cfg, actor_box, &mut pair, &mut history).is_none());
        assert_eq!(pair.len(), 2);
        assert!(history.is_empty());
    }

    #[test]
    fn history_appends_in_selection_order() {
        let mut history = Vec::new();
        commit_selection(&mut history, "C".into());
        commit_selection(&mut history, "B".into());
        assert_eq!(history, vec!["C", "B"]);
    }
}
