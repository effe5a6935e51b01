//! Multiplayer tic-tac-toe game service.
//!
//! [`engine`] holds the game state machine, [`store`] keeps game records,
//! and [`api`] exposes both over HTTP.

pub mod api;
pub mod config;
pub mod engine;
pub mod leaderboard;
pub mod store;
