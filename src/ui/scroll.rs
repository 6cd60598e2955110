//! Scrollable text list widget.
//!
//! Shared by the live picks panel during play and the final results screen:
//! wraps every item to the viewport width, tracks a clamped scroll offset and
//! derives proportional scrollbar geometry. Offsets are zero-or-negative:
//! 0.0 shows the top of the content and `-max_scroll_down` the bottom.

use crate::core::frame::Frame;
use crate::ui::{color, font, text};

const H_PADDING: i32 = 12;
const V_PADDING: i32 = 6;
const SCROLLBAR_W: i32 = 6;
const MIN_THUMB: i32 = 16;
pub const WHEEL_STEP: f32 = 24.0;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// One rendered line, tagged with the index of the item it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub item: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ListLayout {
    pub rows: Vec<Row>,
    pub line_height: i32,
    pub total_height: i32,
}

/// Wraps `items` to the viewport width (minus padding) and totals the
/// resulting content height.
pub fn layout(items: &[String], viewport_w: i32, line_height: i32, scale: i32) -> ListLayout {
    let wrap_w = (viewport_w - 2 * H_PADDING - SCROLLBAR_W).max(font::GLYPH_DIM * scale);
    let mut rows = Vec::with_capacity(items.len());
    for (item, s) in items.iter().enumerate() {
        for line in text::wrap_width(s, wrap_w, |t| font::text_width(t, scale)) {
            rows.push(Row { item, text: line });
        }
    }
    let total_height = rows.len() as i32 * line_height;
    ListLayout {
        rows,
        line_height,
        total_height,
    }
}

#[inline(always)]
pub fn max_scroll_down(total_height: i32, viewport_h: i32) -> f32 {
    (total_height - viewport_h).max(0) as f32
}

/// `offset` is clamped into `[-max_scroll_down, 0]`. Idempotent.
pub fn clamp_offset(offset: f32, total_height: i32, viewport_h: i32) -> f32 {
    offset.min(0.0).max(-max_scroll_down(total_height, viewport_h))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeom {
    pub thumb_height: i32,
    pub thumb_top: i32,
}

/// Proportional thumb geometry, or `None` when the content fits and no
/// scrollbar should be drawn.
pub fn scrollbar_geometry(offset: f32, total_height: i32, viewport_h: i32) -> Option<ScrollbarGeom> {
    if total_height <= viewport_h {
        return None;
    }
    let thumb_height = MIN_THUMB.max(viewport_h * viewport_h / total_height);
    let travel = (viewport_h - thumb_height) as f32;
    let frac = -offset / (total_height - viewport_h).max(1) as f32;
    Some(ScrollbarGeom {
        thumb_height,
        thumb_top: (travel * frac).round() as i32,
    })
}

/// Offset that centers the visible window on a click `y` pixels into the
/// scrollbar track. Used for click-to-jump on the results screen.
pub fn offset_for_track_click(y: i32, total_height: i32, viewport_h: i32) -> f32 {
    let frac = (y as f32 / viewport_h.max(1) as f32).clamp(0.0, 1.0);
    clamp_offset(-frac * max_scroll_down(total_height, viewport_h), total_height, viewport_h)
}

/// Per-widget scroll position. Mutated only by wheel input and by reclamping
/// after a content-height change.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    pub offset: f32,
}

impl ScrollState {
    pub fn wheel(&mut self, delta: f32, total_height: i32, viewport_h: i32) {
        self.offset = clamp_offset(
            self.offset + delta * WHEEL_STEP,
            total_height,
            viewport_h,
        );
    }

    pub fn reclamp(&mut self, total_height: i32, viewport_h: i32) {
        self.offset = clamp_offset(self.offset, total_height, viewport_h);
    }

    /// Pin the view to the newest entry (used by the live panel so the last
    /// pick is always visible).
    pub fn follow_bottom(&mut self, total_height: i32, viewport_h: i32) {
        self.offset = -max_scroll_down(total_height, viewport_h);
    }
}

pub fn draw(
    frame: &mut Frame,
    vp: Viewport,
    lay: &ListLayout,
    scroll: ScrollState,
    scale: i32,
    text_color: u32,
) {
    frame.fill_rect(vp.x, vp.y, vp.w, vp.h, color::PANEL_BG);
    frame.stroke_rect(vp.x, vp.y, vp.w, vp.h, color::PANEL_BORDER);

    let offset = clamp_offset(scroll.offset, lay.total_height, vp.h);
    for (i, row) in lay.rows.iter().enumerate() {
        let row_y = vp.y + V_PADDING + offset.round() as i32 + i as i32 * lay.line_height;
        if row_y + lay.line_height < vp.y || row_y >= vp.y + vp.h {
            continue;
        }
        font::draw_text(frame, &row.text, vp.x + H_PADDING, row_y, scale, text_color);
    }

    if let Some(geom) = scrollbar_geometry(offset, lay.total_height, vp.h) {
        let bar_x = vp.x + vp.w - SCROLLBAR_W - 2;
        frame.fill_rect(bar_x, vp.y + 2, SCROLLBAR_W, vp.h - 4, color::SCROLLBAR_TRACK);
        frame.fill_rect(
            bar_x,
            vp.y + 2 + geom.thumb_top.min(vp.h - 4 - geom.thumb_height),
            SCROLLBAR_W,
            geom.thumb_height,
            color::SCROLLBAR_THUMB,
        );
    }
}
