pub mod board;
pub mod tools;
