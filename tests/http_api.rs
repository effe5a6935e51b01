//! End-to-end tests over a real HTTP listener.
//!
//! Spins up the server on an OS-assigned port and drives full games with a
//! plain HTTP client.

use serde_json::{Value, json};
use tokio::net::TcpListener;

use rust_tictactoe::api::router::create_router;
use rust_tictactoe::api::state::AppState;
use rust_tictactoe::config::AppConfig;

/// Helper: start the server on an OS-assigned port, return its base URL.
async fn start_server() -> String {
    let state = AppState::new(AppConfig::default());
    let app = create_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", addr.port())
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let resp = client.post(url).json(&body).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn get(client: &reqwest::Client, url: String) -> (u16, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn new_active_game(client: &reqwest::Client, base: &str) -> String {
    let (_, body) = post(client, format!("{base}/games/"), json!({ "name": "e2e" })).await;
    let id = body["game"]["id"].as_str().unwrap().to_string();
    for player in ["x-player", "o-player"] {
        let (status, _) = post(
            client,
            format!("{base}/games/{id}/join"),
            json!({ "playerId": player }),
        )
        .await;
        assert_eq!(status, 200);
    }
    id
}

#[tokio::test]
async fn full_game_to_a_win() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = new_active_game(&client, &base).await;

    // x takes the main diagonal.
    let script = [
        ("x-player", 0, 0),
        ("o-player", 0, 1),
        ("x-player", 1, 1),
        ("o-player", 0, 2),
        ("x-player", 2, 2),
    ];
    let mut last = Value::Null;
    for (player, row, col) in script {
        let (status, body) = post(
            &client,
            format!("{base}/games/{id}/moves"),
            json!({ "playerId": player, "row": row, "col": col }),
        )
        .await;
        assert_eq!(status, 200, "{body}");
        last = body;
    }

    assert_eq!(last["game"]["status"], "completed");
    assert_eq!(last["game"]["winnerId"], "x-player");
    assert_eq!(last["move"]["id"], "m-5");

    let (status, body) = get(&client, format!("{base}/games/{id}/status")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"]["winnerId"], "x-player");
    assert_eq!(body["status"]["moves"].as_array().unwrap().len(), 5);

    // Completed games reject moves and can be deleted.
    let (status, body) = post(
        &client,
        format!("{base}/games/{id}/moves"),
        json!({ "playerId": "o-player", "row": 2, "col": 0 }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "NOT_ACTIVE");

    let resp = client
        .delete(format!("{base}/games/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let (status, _) = get(&client, format!("{base}/games/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn full_game_to_a_draw() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = new_active_game(&client, &base).await;

    // X O X
    // X O O
    // O X X
    let script = [
        ("x-player", 0, 0),
        ("o-player", 0, 1),
        ("x-player", 0, 2),
        ("o-player", 1, 1),
        ("x-player", 1, 0),
        ("o-player", 1, 2),
        ("x-player", 2, 1),
        ("o-player", 2, 0),
        ("x-player", 2, 2),
    ];
    let mut last = Value::Null;
    for (player, row, col) in script {
        let (status, body) = post(
            &client,
            format!("{base}/games/{id}/moves"),
            json!({ "playerId": player, "row": row, "col": col }),
        )
        .await;
        assert_eq!(status, 200, "{body}");
        last = body;
    }

    assert_eq!(last["game"]["status"], "completed");
    assert!(last["game"]["winnerId"].is_null());

    let (_, body) = get(&client, format!("{base}/games/?status=completed")).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_on_same_cell_admit_one() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let id = new_active_game(&client, &base).await;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let url = format!("{base}/games/{id}/moves");
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&json!({ "playerId": "x-player", "row": 1, "col": 1 }))
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut accepted = 0;
    for attempt in attempts {
        if attempt.await.unwrap() == 200 {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);

    let (_, body) = get(&client, format!("{base}/games/{id}")).await;
    assert_eq!(body["game"]["moves"].as_array().unwrap().len(), 1);
    assert_eq!(body["game"]["currentPlayerId"], "o-player");
}
