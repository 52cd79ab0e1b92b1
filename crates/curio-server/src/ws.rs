//! WebSocket transport for live price updates.
//!
//! The transport owns the socket lifecycle and drives the
//! [`LiveHandler`] callbacks; membership itself lives in
//! `curio-live`. Each connection gets an unbounded outbound queue
//! whose send half is the handle registered with the registry.

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use curio_live::ConnectionId;
use futures_util::stream::StreamExt;
use futures_util::SinkExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::routes::AppState;

/// Connection limiter to prevent too many concurrent WebSocket
/// connections.
pub struct ConnectionLimiter {
    current: AtomicUsize,
    max: usize,
}

impl ConnectionLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            max,
        }
    }

    pub fn try_acquire(&self) -> Option<ConnectionGuard<'_>> {
        loop {
            let current = self.current.load(Ordering::Acquire);
            if current >= self.max {
                return None;
            }
            if self
                .current
                .compare_exchange(current, current + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Some(ConnectionGuard { limiter: self });
            }
        }
    }

    pub fn current_count(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }
}

pub struct ConnectionGuard<'a> {
    limiter: &'a ConnectionLimiter,
}

impl Drop for ConnectionGuard<'_> {
    fn drop(&mut self) {
        self.limiter.current.fetch_sub(1, Ordering::Release);
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    // Early rejection while we can still answer with a status code;
    // the slot itself is re-acquired after the upgrade
    if state.limiter.try_acquire().is_none() {
        warn!(
            current = state.limiter.current_count(),
            "WebSocket connection limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    }

    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Handle one WebSocket connection from handshake to close.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let _guard = match state.limiter.try_acquire() {
        Some(guard) => guard,
        None => {
            warn!("Connection limit reached during upgrade");
            return;
        }
    };

    let id = ConnectionId::generate();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state.handler.on_open(id, tx);

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(msg) => {
                        if sender.send(Message::Text(msg.into())).await.is_err() {
                            debug!(connection = %id, "Send failed, client disconnected");
                            break;
                        }
                    }
                    // All send handles dropped: the hub pruned us
                    None => break,
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        state.handler.on_message(&id, text.as_str());
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(connection = %id, "Client closed connection");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!(connection = %id, error = %e, "WebSocket receive error");
                        break;
                    }
                    // Ping/pong handled by axum
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.handler.on_close(&id);
}
