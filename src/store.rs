//! Game record storage.
//!
//! [`GameStore`] is the seam the API layer depends on; [`InMemoryGameStore`]
//! is the process-lifetime implementation. All mutations of a record happen
//! under the store's write lock, so concurrent requests never interleave a
//! check with another request's write.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::engine::{Game, GameError, GameStatus, MoveRecord};

/// A state-machine operation applied to one game under exclusive access.
pub type GameUpdate = Box<dyn FnOnce(&mut Game) -> Result<(), GameError> + Send>;

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Create a game with a fresh identifier.
    async fn create(&self, name: Option<String>) -> Game;

    async fn get(&self, id: &str) -> Result<Game, GameError>;

    /// All games in insertion order, optionally restricted to one status.
    async fn list(&self, status: Option<GameStatus>) -> Vec<Game>;

    /// Apply `op` to the game atomically and return the updated record.
    async fn update(&self, id: &str, op: GameUpdate) -> Result<Game, GameError>;

    /// Play one move atomically. Returns the updated game and the recorded move.
    async fn play_move(
        &self,
        id: &str,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<(Game, MoveRecord), GameError>;

    /// Remove a game. Active games are refused.
    async fn delete(&self, id: &str) -> Result<(), GameError>;

    /// Number of stored games.
    async fn count(&self) -> usize;
}

#[derive(Debug, Default)]
struct Inner {
    games: HashMap<String, Game>,
    /// Ids in creation order.
    order: Vec<String>,
    /// Last allocated sequence number. Never reused.
    last_seq: u64,
}

impl Inner {
    /// Run `op` against one game and snapshot it on success.
    fn apply<T>(
        &mut self,
        id: &str,
        op: impl FnOnce(&mut Game) -> Result<T, GameError>,
    ) -> Result<(Game, T), GameError> {
        let game = self
            .games
            .get_mut(id)
            .ok_or_else(|| GameError::NotFound(id.to_string()))?;

        let before = game.status();
        let output = op(&mut *game).inspect_err(|err| {
            debug!(game_id = id, error = %err, "game update rejected");
        })?;
        if game.status() != before {
            info!(game_id = id, from = %before, to = %game.status(), "game status changed");
        }
        Ok((game.clone(), output))
    }
}

/// Games kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    inner: RwLock<Inner>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn create(&self, name: Option<String>) -> Game {
        let mut inner = self.inner.write().await;
        inner.last_seq += 1;
        let id = format!("game-{}", inner.last_seq);
        let game = Game::new(id.clone(), name);

        inner.order.push(id.clone());
        inner.games.insert(id.clone(), game.clone());

        info!(game_id = %id, name = %game.name, "game created");
        game
    }

    async fn get(&self, id: &str) -> Result<Game, GameError> {
        let inner = self.inner.read().await;
        inner
            .games
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::NotFound(id.to_string()))
    }

    async fn list(&self, status: Option<GameStatus>) -> Vec<Game> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.games.get(id))
            .filter(|g| status.is_none_or(|s| g.status() == s))
            .cloned()
            .collect()
    }

    async fn update(&self, id: &str, op: GameUpdate) -> Result<Game, GameError> {
        let mut inner = self.inner.write().await;
        let (game, ()) = inner.apply(id, op)?;
        Ok(game)
    }

    async fn play_move(
        &self,
        id: &str,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<(Game, MoveRecord), GameError> {
        let mut inner = self.inner.write().await;
        inner.apply(id, |g| g.make_move(player_id, row, col).cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), GameError> {
        let mut inner = self.inner.write().await;
        let game = inner
            .games
            .get(id)
            .ok_or_else(|| GameError::NotFound(id.to_string()))?;
        game.ensure_deletable()?;

        inner.games.remove(id);
        inner.order.retain(|existing| existing != id);
        info!(game_id = id, "game deleted");
        Ok(())
    }

    async fn count(&self) -> usize {
        self.inner.read().await.games.len()
    }
}
