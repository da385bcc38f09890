//! Realtime analytics socket.
//!
//! Each connection gets an `initial_stats` frame, then a `heartbeat` frame
//! every `heartbeat_interval`. A `ping` text frame is answered with `pong`.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use maicivy_shared::{RawRealtimeMessage, RealtimeMessage, RealtimeMessageKind};
use tokio::time::{self, MissedTickBehavior};
use uuid::Uuid;

use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4();
    let live = state.socket_opened();
    tracing::info!("Analytics socket {} opened ({} live)", conn_id, live);

    let (mut sender, mut receiver) = socket.split();

    let initial = RealtimeMessage::with_stats(
        RealtimeMessageKind::InitialStats,
        state.realtime_stats().await,
    );
    if send_json(&mut sender, &initial).await.is_ok() {
        let mut heartbeat = time::interval_at(
            time::Instant::now() + state.heartbeat_interval,
            state.heartbeat_interval,
        );
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    let frame = RealtimeMessage::with_stats(
                        RealtimeMessageKind::Heartbeat,
                        state.realtime_stats().await,
                    );
                    if send_json(&mut sender, &frame).await.is_err() {
                        break;
                    }
                }
                msg = receiver.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        if is_ping(text.as_str()) && send_json(&mut sender, &pong()).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    state.socket_closed();
    tracing::info!("Analytics socket {} closed", conn_id);
}

fn is_ping(text: &str) -> bool {
    serde_json::from_str::<RawRealtimeMessage>(text)
        .map(|msg| msg.kind == RealtimeMessageKind::Ping)
        .unwrap_or(false)
}

fn pong() -> RealtimeMessage {
    RealtimeMessage {
        kind: RealtimeMessageKind::Pong,
        data: None,
        time: Some(chrono::Utc::now().to_rfc3339()),
    }
}

async fn send_json<S>(sender: &mut S, message: &RealtimeMessage) -> Result<(), axum::Error>
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize {:?} frame: {}", message.kind, e);
            return Ok(());
        }
    };
    sender.send(Message::Text(json.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ping_frames_are_answered() {
        assert!(is_ping(r#"{"type":"ping"}"#));
        assert!(!is_ping(r#"{"type":"heartbeat"}"#));
        assert!(!is_ping("not json"));
        assert_eq!(pong().kind, RealtimeMessageKind::Pong);
    }
}
