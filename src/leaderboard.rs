//! Leaderboard consumer interface.
//!
//! Rankings would be aggregated from completed games' player statistics.
//! Aggregation is not wired into the join/move flow, so queries currently
//! return no entries; paging parameters are still validated.

use serde::Serialize;
use tracing::debug;

/// Per-player aggregate over completed games.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub games_drawn: u32,
    pub total_moves: u32,
}

impl PlayerStats {
    /// Fraction of played games that were won.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.games_won) / f64::from(self.games_played)
    }

    /// Average number of moves spent per won game.
    pub fn average_moves_per_win(&self) -> f64 {
        if self.games_won == 0 {
            return 0.0;
        }
        f64::from(self.total_moves) / f64::from(self.games_won)
    }

    /// Win rate scaled down by how many moves wins take. Higher is better.
    pub fn efficiency(&self) -> f64 {
        let per_win = self.average_moves_per_win();
        if per_win == 0.0 {
            return 0.0;
        }
        self.win_rate() / per_win
    }
}

/// Ordering used for a leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardKind {
    /// Most games won.
    Wins,
    /// Best win rate per move spent.
    Efficiency,
}

/// One ranked row.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: String,
    pub name: String,
    pub stats: PlayerStats,
    pub win_rate: f64,
    pub average_moves_per_win: f64,
    pub efficiency: f64,
}

/// Paging errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("limit must be between 1 and {max}")]
    InvalidLimit { max: u32 },
}

/// Validated 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
        default_limit: u32,
        max_limit: u32,
    ) -> Result<Self, PageError> {
        let page = match page {
            None => 1,
            Some(p) if p >= 1 => u32::try_from(p).map_err(|_| PageError::InvalidPage)?,
            Some(_) => return Err(PageError::InvalidPage),
        };
        let limit = match limit {
            None => default_limit.min(max_limit),
            Some(l) if (1..=i64::from(max_limit)).contains(&l) => l as u32,
            Some(_) => return Err(PageError::InvalidLimit { max: max_limit }),
        };
        Ok(PageRequest { page, limit })
    }

    /// Number of entries preceding this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

/// Ranked entries for one page.
///
/// Player statistics are not aggregated yet, so every page is empty.
pub fn query(kind: LeaderboardKind, page: PageRequest) -> Vec<LeaderboardEntry> {
    debug!(
        ?kind,
        page = page.page,
        limit = page.limit,
        offset = page.offset(),
        "leaderboard aggregation not available"
    );
    Vec::new()
}
