use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;

/// Build the Axum router with all routes and middleware.
///
/// Collection routes answer both with and without the trailing slash.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Game CRUD
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/{id}",
            get(handlers::get_game).delete(handlers::delete_game),
        )
        .route("/games/{id}/status", get(handlers::get_status))
        // Players and moves
        .route("/games/{id}/join", post(handlers::join_game))
        .route(
            "/games/{id}/moves",
            get(handlers::valid_moves).post(handlers::make_move),
        )
        // Leaderboard
        .route("/leaderboard", get(handlers::leaderboard_wins))
        .route("/leaderboard/", get(handlers::leaderboard_wins))
        .route(
            "/leaderboard/efficiency",
            get(handlers::leaderboard_efficiency),
        )
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
