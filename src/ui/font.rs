//! Text drawing on the software framebuffer.
//!
//! Uses the font8x8 legacy glyph tables with integer scaling. Because every
//! glyph is a fixed 8x8 cell, measurement is exact grid arithmetic and the
//! word wrapper never disagrees with the rasterizer.

use crate::core::frame::Frame;
use font8x8::legacy::BASIC_LEGACY;

pub const GLYPH_DIM: i32 = 8;

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

#[inline(always)]
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * GLYPH_DIM * scale
}

#[inline(always)]
pub const fn line_height(scale: i32) -> i32 {
    GLYPH_DIM * scale
}

pub fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, scale: i32, c: u32) {
    let mut pen_x = x;
    for ch in text.chars() {
        let glyph = glyph_for_char(ch);
        for (row, bits) in glyph.iter().enumerate() {
            for bit in 0..8 {
                if (bits >> bit) & 0x01 == 0 {
                    continue;
                }
                frame.fill_rect(
                    pen_x + bit * scale,
                    y + row as i32 * scale,
                    scale,
                    scale,
                    c,
                );
            }
        }
        pen_x += GLYPH_DIM * scale;
    }
}

pub fn draw_text_centered(frame: &mut Frame, text: &str, cx: i32, y: i32, scale: i32, c: u32) {
    draw_text(frame, text, cx - text_width(text, scale) / 2, y, scale, c);
}
