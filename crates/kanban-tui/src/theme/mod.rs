pub mod colors;
pub mod styles;
