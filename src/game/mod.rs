pub mod actor;
pub mod catalog;
pub mod poster;
pub mod select;
pub mod session;
pub mod spawner;

/// Integer axis-aligned bounding box shared by the actor and the posters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline(always)]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}
