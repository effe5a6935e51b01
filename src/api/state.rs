use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{GameStore, InMemoryGameStore};

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    pub games: Arc<dyn GameStore>,
    pub config: AppConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// State backed by a fresh in-memory store.
    pub fn new(config: AppConfig) -> SharedState {
        Self::with_store(config, Arc::new(InMemoryGameStore::new()))
    }

    /// State backed by the given store.
    pub fn with_store(config: AppConfig, games: Arc<dyn GameStore>) -> SharedState {
        Arc::new(AppState {
            games,
            config,
            start_time: std::time::Instant::now(),
        })
    }
}
