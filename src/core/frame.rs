//! Software framebuffer and the softbuffer presentation surface.
//!
//! All drawing happens into a plain `Frame` (a `Vec<u32>` of packed 0RGB
//! pixels) so screens can be rendered and inspected without a window; `Gfx`
//! owns the softbuffer surface and copies the finished frame out once per
//! redraw.

use crate::ui::color;
use image::RgbaImage;
use log::info;
use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::window::Window;

pub struct Frame {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            pixels: vec![color::BLACK; (width * height) as usize],
        }
    }

    pub fn clear(&mut self, c: u32) {
        self.pixels.fill(c);
    }

    /// Axis-aligned filled rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for row in y0..y1 {
            let base = (row * self.width) as usize;
            for col in x0..x1 {
                self.pixels[base + col as usize] = c;
            }
        }
    }

    /// One-pixel outline.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: u32) {
        self.fill_rect(x, y, w, 1, c);
        self.fill_rect(x, y + h - 1, w, 1, c);
        self.fill_rect(x, y, 1, h, c);
        self.fill_rect(x + w - 1, y, 1, h, c);
    }

    /// Blit an RGBA image with source-over blending, clipped to the frame
    /// and optionally to a clip rectangle (used by scrolled viewports).
    pub fn blit(&mut self, img: &RgbaImage, x: i32, y: i32) {
        self.blit_clipped(img, x, y, 0, 0, self.width, self.height);
    }

    pub fn blit_clipped(
        &mut self,
        img: &RgbaImage,
        x: i32,
        y: i32,
        clip_x: i32,
        clip_y: i32,
        clip_w: i32,
        clip_h: i32,
    ) {
        let x0 = x.max(clip_x).max(0);
        let y0 = y.max(clip_y).max(0);
        let x1 = (x + img.width() as i32).min(clip_x + clip_w).min(self.width);
        let y1 = (y + img.height() as i32)
            .min(clip_y + clip_h)
            .min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for row in y0..y1 {
            let src_y = (row - y) as u32;
            let base = (row * self.width) as usize;
            for col in x0..x1 {
                let src_x = (col - x) as u32;
                let p = img.get_pixel(src_x, src_y).0;
                let dst = &mut self.pixels[base + col as usize];
                *dst = color::blend(*dst, p[0], p[1], p[2], p[3]);
            }
        }
    }
}

/// Window-backed presentation surface.
pub struct Gfx {
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    width: u32,
    height: u32,
}

impl Gfx {
    pub fn new(window: Arc<Window>) -> Result<Self, Box<dyn Error>> {
        info!("Initializing softbuffer presentation surface...");
        let size = window.inner_size();
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window)?;
        Ok(Self {
            _context: context,
            surface,
            width: size.width,
            height: size.height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let (Some(w), Some(h)) = (NonZeroU32::new(self.width), NonZeroU32::new(self.height))
        else {
            return Ok(());
        };
        self.surface.resize(w, h)?;
        let mut buffer = self.surface.buffer_mut()?;

        // The frame is rendered at the logical resolution; center it if the
        // window happens to be larger, crop if smaller.
        let fw = frame.width as u32;
        let fh = frame.height as u32;
        if fw == self.width && fh == self.height {
            buffer.copy_from_slice(&frame.pixels);
        } else {
            buffer.fill(color::BLACK);
            let off_x = (self.width.saturating_sub(fw) / 2) as usize;
            let off_y = (self.height.saturating_sub(fh) / 2) as usize;
            let copy_w = fw.min(self.width) as usize;
            let copy_h = fh.min(self.height) as usize;
            for row in 0..copy_h {
                let src = row * fw as usize;
                let dst = (row + off_y) * self.width as usize + off_x;
                buffer[dst..dst + copy_w].copy_from_slice(&frame.pixels[src..src + copy_w]);
            }
        }
        buffer.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut f = Frame::new(4, 4);
        f.fill_rect(-2, -2, 10, 10, color::WHITE);
        assert!(f.pixels.iter().all(|&p| p == color::WHITE));
    }

    #[test]
    fn blit_offscreen_is_a_noop() {
        let mut f = Frame::new(4, 4);
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        f.blit(&img, -5, -5);
        assert!(f.pixels.iter().all(|&p| p == color::BLACK));
    }

    #[test]
    fn blit_partially_above_frame_draws_visible_rows() {
        let mut f = Frame::new(4, 4);
        let img = RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 255]));
        f.blit(&img, 0, -2);
        assert_eq!(f.pixels[0], color::pack(255, 0, 0));
        assert_eq!(f.pixels[4], color::BLACK);
    }
}
