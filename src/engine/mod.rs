pub mod board;
pub mod game;
pub mod types;

pub use board::{Board, WIN_LINES};
pub use game::Game;
pub use types::*;
