//! Reference transport for `catterm`: a WebSocket endpoint handing each
//! connection its own session (one [`Dictionary`](catterm::Dictionary), one
//! gas budget, one request/reply loop). See `SPEC_FULL.md` §4.9-§4.10 and §6
//! for the contract this binary implements; it is a thin collaborator, not
//! part of the core.

mod config;
mod protocol;
mod session;

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Clone)]
struct AppState {
    default_gas: u64,
}

#[tokio::main]
async fn main() {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter.clone()))
        .init();

    let state = Arc::new(AppState {
        default_gas: config.gas,
    });

    let app = Router::new()
        .route("/", get(upgrade))
        .with_state(state);

    tracing::info!(bind = %config.bind, gas = config.gas, "starting catterm-worker");

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {}: {err}", config.bind));

    axum::serve(listener, app)
        .await
        .expect("server loop exited unexpectedly");
}

async fn upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        session::run(socket, state.default_gas).await;
    })
}
