//! WebSocket observer channel.
//!
//! Each connected observer receives every `newReport` / `resolveReport` event
//! published after it connected, as one JSON text frame per event. Frames
//! sent by the observer are ignored apart from ping/pong/close handling.

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Ping interval for keeping connections alive.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Grace period for the pong after a ping.
const PONG_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let mut rx = state.broadcaster.subscribe();
    info!(
        observers = state.broadcaster.observer_count(),
        "🔌 Observer connected"
    );

    let (mut sender, mut receiver) = socket.split();
    let mut last_pong = Instant::now();
    let mut ping_interval = tokio::time::interval(PING_INTERVAL);

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Pong(_))) => last_pong = Instant::now(),
                    Some(Ok(Message::Ping(_))) => debug!("Received ping"),
                    Some(Ok(Message::Text(text))) => {
                        debug!(message = %text.as_str(), "Ignoring observer message");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(frame = ?frame, "Observer requested close");
                        break;
                    }
                    Some(Ok(Message::Binary(_))) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket receive error");
                        break;
                    }
                    None => break,
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(json) => {
                            if sender.send(Message::Text(json.into())).await.is_err() {
                                warn!("Failed to send event, closing connection");
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, "Failed to serialize event"),
                    },
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Observer lagged, events skipped");
                    }
                    Err(RecvError::Closed) => {
                        info!("Broadcast channel closed");
                        break;
                    }
                }
            }

            _ = ping_interval.tick() => {
                if last_pong.elapsed() > PING_INTERVAL + PONG_TIMEOUT {
                    warn!("Pong timeout, closing connection");
                    break;
                }
                if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = sender.close().await;
    info!("❌ Observer disconnected");
}
