//! WebSocket push channel for master-data updates.
//!
//! Protocol (JSON text frames):
//! ← {"type":"connected","service":"datadesk","version":"..."}
//! ← {"type":"masterDataUpdated","data":{...}}   on connect, then after every
//!   accepted POST /api/master-data
//! → {"type":"ping"}   ← {"type":"pong","timestamp":<millis>}
//!
//! Unknown client frames get {"type":"error","message":"..."} back. A client
//! that cannot keep up skips missed revisions; every frame carries the full
//! blob, so the latest one is always enough.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use datadesk_core::types::MasterData;
use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::server::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

fn connected_frame() -> serde_json::Value {
    serde_json::json!({
        "type": "connected",
        "service": "datadesk",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

fn master_data_frame(data: &MasterData) -> serde_json::Value {
    serde_json::json!({"type": "masterDataUpdated", "data": data})
}

fn pong_frame() -> serde_json::Value {
    serde_json::json!({
        "type": "pong",
        "timestamp": chrono::Utc::now().timestamp_millis(),
    })
}

fn error_frame(message: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "error",
        "message": message,
    })
}

/// Handle one WebSocket connection until it closes.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    tracing::info!("WebSocket client connected");

    let (mut sender, mut receiver) = socket.split();

    if send_json(&mut sender, &connected_frame()).await.is_err() {
        return;
    }

    // New clients start in sync: send the current blob right away.
    let snapshot = state.store.load().unwrap_or_default();
    if send_json(&mut sender, &master_data_frame(&snapshot)).await.is_err() {
        return;
    }

    let mut updates = state.updates.subscribe();

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(data) => {
                    if send_json(&mut sender, &master_data_frame(&data)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("⚠️ WS client lagged, skipped {skipped} update(s)");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    handle_text(&mut sender, &text).await;
                }
                Some(Ok(Message::Ping(data))) => {
                    let _ = sender.send(Message::Pong(data)).await;
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("WebSocket client disconnected (close frame)");
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("WebSocket error: {e}");
                    break;
                }
                None => break,
                _ => {}
            },
        }
    }

    tracing::info!("WebSocket connection closed");
}

/// Dispatch one client text frame.
async fn handle_text(sender: &mut SplitSink<WebSocket, Message>, text: &str) {
    let json = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(j) => j,
        Err(e) => {
            send_error(sender, &format!("Invalid JSON: {e}")).await;
            return;
        }
    };

    match json["type"].as_str().unwrap_or("unknown") {
        "ping" => {
            let _ = send_json(sender, &pong_frame()).await;
        }
        other => {
            send_error(sender, &format!("Unknown message type: {other}")).await;
        }
    }
}

async fn send_json(
    sender: &mut SplitSink<WebSocket, Message>,
    value: &serde_json::Value,
) -> Result<(), ()> {
    sender
        .send(Message::Text(value.to_string().into()))
        .await
        .map_err(|e| {
            tracing::error!("WS send failed: {e}");
        })
}

async fn send_error(sender: &mut SplitSink<WebSocket, Message>, message: &str) {
    let _ = send_json(sender, &error_frame(message)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_frame_shape() {
        let frame = connected_frame();
        assert_eq!(frame["type"], "connected");
        assert_eq!(frame["service"], "datadesk");
        assert!(frame["version"].is_string());
    }

    #[test]
    fn test_master_data_frame_carries_blob() {
        let data = MasterData::new_revision("warehouse opens at 8", "ops");
        let frame = master_data_frame(&data);
        assert_eq!(frame["type"], "masterDataUpdated");
        assert_eq!(frame["data"]["content"], "warehouse opens at 8");
        assert_eq!(frame["data"]["updatedBy"], "ops");
        assert!(frame["data"]["lastUpdated"].is_string());
    }

    #[test]
    fn test_pong_frame_timestamp_is_millis() {
        let frame = pong_frame();
        assert_eq!(frame["type"], "pong");
        assert!(frame["timestamp"].as_i64().unwrap() > 1_700_000_000_000);
    }

    #[test]
    fn test_error_frame_shape() {
        let frame = error_frame("Unknown message type: hello");
        assert_eq!(frame["type"], "error");
        assert_eq!(frame["message"], "Unknown message type: hello");
    }
}
