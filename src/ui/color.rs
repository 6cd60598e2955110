//! Packed 0RGB colors for the softbuffer framebuffer.

pub const BLACK: u32 = 0x00_00_00;
pub const WHITE: u32 = 0xFF_FF_FF;
pub const PLAYER: u32 = 0x00_C8_FF;
pub const LANE_LINE: u32 = 0x28_28_28;
pub const PANEL_BG: u32 = 0x14_14_1E;
pub const PANEL_BORDER: u32 = 0x3C_3C_50;
pub const SCROLLBAR_TRACK: u32 = 0x28_28_32;
pub const SCROLLBAR_THUMB: u32 = 0x78_78_96;
pub const DIM_TEXT: u32 = 0x96_96_96;
pub const ACCENT: u32 = 0xFF_C8_32;

#[inline(always)]
pub const fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Source-over blend of an RGBA pixel onto a packed 0RGB destination.
#[inline(always)]
pub fn blend(dst: u32, r: u8, g: u8, b: u8, a: u8) -> u32 {
    if a == 255 {
        return pack(r, g, b);
    }
    if a == 0 {
        return dst;
    }
    let a = a as u32;
    let ia = 255 - a;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;
    let r = (r as u32 * a + dr * ia) / 255;
    let g = (g as u32 * a + dg * ia) / 255;
    let b = (b as u32 * a + db * ia) / 255;
    (r << 16) | (g << 8) | b
}
