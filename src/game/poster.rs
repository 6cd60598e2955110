use crate::config::Config;
use crate::game::Rect;
use image::RgbaImage;

/// One half of a falling pair. Spawns above the visible area and advances at
/// a constant per-tick speed until it is selected, its pair resolves, or it
/// scrolls fully past the bottom edge.
#[derive(Debug, Clone)]
pub struct Poster {
    pub lane: usize,
    pub title: String,
    pub bitmap: RgbaImage,
    pub y: f32,
    pub speed: f32,
}

impl Poster {
    pub fn new(cfg: &Config, lane: usize, title: String, bitmap: RgbaImage) -> Self {
        Self {
            lane,
            title,
            bitmap,
            y: -(cfg.poster_height_cap as f32),
            speed: cfg.poster_speed,
        }
    }

    pub fn advance(&mut self) {
        self.y += self.speed;
    }

    /// True once the top edge has passed the bottom of the play area.
    pub fn is_offscreen(&self, cfg: &Config) -> bool {
        self.y > cfg.screen_height as f32
    }

    pub fn bounding_box(&self, cfg: &Config) -> Rect {
        Rect {
            x: cfg.lane_center_x(self.lane) - self.bitmap.width() as i32 / 2,
            y: self.y as i32,
            w: self.bitmap.width() as i32,
            h: self.bitmap.height() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn bitmap(cfg: &Config) -> RgbaImage {
        RgbaImage::from_pixel(cfg.poster_width, cfg.poster_height_cap, Rgba([9, 9, 9, 255]))
    }

    #[test]
    fn spawns_above_the_screen_and_falls() {
        let cfg = Config::default();
        let mut p = Poster::new(&cfg, 0, "Up".into(), bitmap(&cfg));
        assert!(p.bounding_box(&cfg).y + p.bounding_box(&cfg).h <= 0);
        let before = p.y;
        p.advance();
        assert_eq!(p.y, before + cfg.poster_speed);
    }

    #[test]
    fn offscreen_only_after_fully_past_the_bottom() {
        let cfg = Config::default();
        let mut p = Poster::new(&cfg, 1, "Avatar".into(), bitmap(&cfg));
        p.y = cfg.screen_height as f32 - 1.0;
        assert!(!p.is_offscreen(&cfg));
        p.y = cfg.screen_height as f32 + 1.0;
        assert!(p.is_offscreen(&cfg));
    }
}
