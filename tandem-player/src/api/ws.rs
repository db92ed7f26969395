//! WebSocket push adapter
//!
//! Each connection is registered as a subscriber, receives the current
//! snapshot once, then exchanges frames until either side goes away:
//! server → client frames are bare `AudioState` JSON, client → server
//! frames are `{"type": ..., "data": ...}` commands.

use std::fmt::Display;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::sink::{Sink, SinkExt};
use futures::stream::{Stream, StreamExt};
use tandem_common::{AudioState, PushFrame};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::api::server::AppContext;
use crate::error::{Error, Result};
use crate::playback::PlayerService;
use crate::push::Subscription;

/// Grace period for the closing handshake frame
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// GET /ws - Upgrade to a push channel
///
/// Origins are not checked.
pub async fn ws_upgrade(State(ctx): State<AppContext>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| warn!("WebSocket upgrade error: {}", e))
        .on_upgrade(move |socket| async move {
            let (sink, stream) = socket.split();
            run_session(sink, stream, ctx.service, ctx.write_timeout).await;
        })
}

/// Drive one push peer from registration to disconnect.
///
/// Generic over the transport halves so it runs the same over a real
/// socket or in-memory channels.
pub async fn run_session<S, R, E>(
    mut sink: S,
    mut stream: R,
    service: Arc<PlayerService>,
    write_timeout: Duration,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = std::result::Result<Message, E>> + Unpin,
    E: Display,
{
    // The queue carries exactly the snapshots committed after `initial`
    let Subscription {
        id,
        initial,
        mut receiver,
    } = service.subscribe().await;
    info!(
        "Push client {} connected, total clients: {}",
        id,
        service.subscriber_count()
    );

    if let Err(e) = send_state(&mut sink, &initial, write_timeout).await {
        warn!("Error writing initial state to client {}: {}", id, e);
        service.unsubscribe(id);
        return;
    }

    loop {
        tokio::select! {
            outbound = receiver.recv() => match outbound {
                Some(state) => {
                    if let Err(e) = send_state(&mut sink, &state, write_timeout).await {
                        warn!("Error writing to client {}: {}", id, e);
                        break;
                    }
                }
                None => {
                    // Evicted by the broadcaster; it already logged why
                    break;
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(message)) => {
                    if handle_message(&service, message).await.is_break() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!("WebSocket read error from client {}: {}", id, e);
                    break;
                }
                None => break,
            },
        }
    }

    service.unsubscribe(id);
    let _ = timeout(CLOSE_TIMEOUT, sink.send(Message::Close(None))).await;
    info!(
        "Push client {} disconnected, total clients: {}",
        id,
        service.subscriber_count()
    );
}

/// Apply one inbound frame. Breaks on close or on a malformed frame.
async fn handle_message(service: &PlayerService, message: Message) -> ControlFlow<()> {
    let parsed = match message {
        Message::Text(text) => serde_json::from_str::<PushFrame>(&text),
        Message::Binary(bytes) => serde_json::from_slice::<PushFrame>(&bytes),
        Message::Ping(_) | Message::Pong(_) => return ControlFlow::Continue(()),
        Message::Close(_) => return ControlFlow::Break(()),
    };

    match parsed {
        Ok(frame) => {
            let command = frame.command();
            if command.is_none() {
                debug!("Ignoring unknown push command {:?}", frame.kind);
            }
            service.dispatch(command).await;
            ControlFlow::Continue(())
        }
        Err(e) => {
            warn!("Malformed push frame, closing connection: {}", e);
            ControlFlow::Break(())
        }
    }
}

async fn send_state<S>(sink: &mut S, state: &AudioState, write_timeout: Duration) -> Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let text = serde_json::to_string(state)
        .map_err(|e| Error::Http(format!("Failed to serialize state: {}", e)))?;

    match timeout(write_timeout, sink.send(Message::Text(text))).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(Error::Http(e.to_string())),
        Err(_) => Err(Error::Http(format!("write timed out after {:?}", write_timeout))),
    }
}
