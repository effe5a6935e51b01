use rust_tictactoe::api::router::create_router;
use rust_tictactoe::api::state::AppState;
use rust_tictactoe::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Handle --health-check flag for container HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        match health_check(config.port).await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Health check failed: {e}");
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_tictactoe=info,tower_http=info".into()),
        )
        .init();

    let bind_addr = config.bind_addr();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        %bind_addr,
        max_name_length = config.max_name_length,
        leaderboard_default_limit = config.leaderboard_default_limit,
        leaderboard_max_limit = config.leaderboard_max_limit,
        "tic-tac-toe server starting"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("server stopped; in-memory games discarded");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

/// Probe the local `/health` endpoint on `port` and require a 200 reply
/// whose body reports `"status":"ok"`.
async fn health_check(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = tokio::net::TcpStream::connect(format!("127.0.0.1:{port}")).await?;
    let request =
        format!("GET /health HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    stream.write_all(request.as_bytes()).await?;
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await?;
    let response = String::from_utf8_lossy(&raw);

    let status_line = response.lines().next().unwrap_or("");
    if !status_line.starts_with("HTTP/1.1 200") {
        return Err(format!("Unexpected response: {status_line}").into());
    }
    let body = response.split("\r\n\r\n").nth(1).unwrap_or("");
    let health: serde_json::Value = serde_json::from_str(body)?;
    match health["status"].as_str() {
        Some("ok") => Ok(()),
        other => Err(format!("Unhealthy status: {other:?}").into()),
    }
}
