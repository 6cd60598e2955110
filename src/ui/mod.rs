pub mod color;
pub mod font;
pub mod scroll;
pub mod text;
