//! WebSocket telemetry streaming server.
//!
//! A thin transport over [`rig_core::Engine`]: every accepted WebSocket
//! session gets its own fresh engine, advanced at a fixed ~10 Hz cadence
//! with wall-clock elapsed time as the timestep, and receives one JSON
//! snapshot per step as a text frame. No state is shared between sessions,
//! and the engine itself does no timing or I/O; cadence and delivery both
//! live here.

use std::time::{Duration, Instant};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rig_core::Engine;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_BIND_PORT: u16 = 8000;
const SNAPSHOT_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let app = Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        // Permissive CORS for dev-tool consumers.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = resolve_bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };
    info!("rig-stream listening on ws://{addr}/ws");
    if let Err(err) = axum::serve(listener, app).await {
        error!("server exited unexpectedly: {err}");
    }
}

fn resolve_bind_addr() -> String {
    let host =
        std::env::var("RIG_BIND_HOST").unwrap_or_else(|_| DEFAULT_BIND_HOST.to_string());
    let port = match std::env::var("RIG_BIND_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("invalid RIG_BIND_PORT {raw:?}, using {DEFAULT_BIND_PORT}");
            DEFAULT_BIND_PORT
        }),
        Err(_) => DEFAULT_BIND_PORT,
    };
    format!("{host}:{port}")
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_session)
}

/// Drive one consumer session until the socket closes.
///
/// The engine is owned by this task and dies with it; a transport failure
/// ends the session but cannot corrupt simulation state or affect any
/// other session.
async fn handle_session(mut socket: WebSocket) {
    let mut engine = Engine::new();
    let mut ticker = tokio::time::interval(SNAPSHOT_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last_step = Instant::now();

    info!("session opened");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_step).as_secs_f64();
                last_step = now;

                engine.advance(dt);
                let payload = match serde_json::to_string(&engine.snapshot()) {
                    Ok(payload) => payload,
                    Err(err) => {
                        error!("snapshot serialization failed: {err}");
                        break;
                    }
                };
                if let Err(err) = socket.send(Message::Text(payload.into())).await {
                    info!("session closed while sending: {err}");
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => {
                        info!("session closed by consumer");
                        break;
                    }
                    // The stream is push-only; inbound frames are ignored.
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("session transport error: {err}");
                        break;
                    }
                }
            }
        }
    }
    info!(tick = engine.tick(), "session ended");
}
