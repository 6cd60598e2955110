use crate::config::Config;
use crate::game::Rect;

/// The player: a discrete lane index. Horizontal position is derived from the
/// lane, never stored, so the actor can only ever sit on a lane center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneActor {
    lane: usize,
    lane_count: usize,
}

impl LaneActor {
    pub fn new(lane_count: usize) -> Self {
        Self {
            lane: 0,
            lane_count: lane_count.max(1),
        }
    }

    #[inline(always)]
    pub const fn lane(&self) -> usize {
        self.lane
    }

    /// Clamped to lane 0; no wraparound.
    pub fn move_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    /// Clamped to the last lane; no wraparound.
    pub fn move_right(&mut self) {
        if self.lane + 1 < self.lane_count {
            self.lane += 1;
        }
    }

    pub fn bounding_box(&self, cfg: &Config) -> Rect {
        Rect {
            x: cfg.lane_center_x(self.lane) - cfg.actor_size / 2,
            y: cfg.actor_top_y(),
            w: cfg.actor_size,
            h: cfg.actor_size,
        }
    }
}
