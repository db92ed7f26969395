//! In-memory push client
//!
//! Runs the real WebSocket session logic over `futures` channels instead of
//! a socket, so frames can be injected and observed directly.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures::channel::mpsc;
use futures::StreamExt;
use serde_json::Value;
use tandem_common::AudioState;
use tandem_player::api::ws::run_session;
use tandem_player::PlayerService;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::test_server::DELIVERY_TIMEOUT;

pub struct TestPeer {
    to_server: mpsc::UnboundedSender<Result<Message, io::Error>>,
    from_server: mpsc::Receiver<Message>,
    pub session: JoinHandle<()>,
}

impl TestPeer {
    /// Connect a well-behaved peer
    pub fn connect(service: &Arc<PlayerService>) -> Self {
        Self::connect_with(service, 64, Duration::from_secs(1))
    }

    /// Connect with an outbound transport of `transport_capacity` frames.
    ///
    /// With capacity 0 a write completes only once the test has read the
    /// frame, so a peer that stops reading stalls the session's writer.
    pub fn connect_with(
        service: &Arc<PlayerService>,
        transport_capacity: usize,
        write_timeout: Duration,
    ) -> Self {
        let (to_server, inbound) = mpsc::unbounded();
        let (outbound, from_server) = mpsc::channel(transport_capacity);
        let session = tokio::spawn(run_session(
            outbound,
            inbound,
            Arc::clone(service),
            write_timeout,
        ));
        Self {
            to_server,
            from_server,
            session,
        }
    }

    /// Next frame from the server, or None if the transport ended
    pub async fn next_message(&mut self) -> Option<Message> {
        timeout(DELIVERY_TIMEOUT, self.from_server.next())
            .await
            .expect("Timed out waiting for a frame")
    }

    /// Next frame, which must be an `AudioState`
    pub async fn next_state(&mut self) -> AudioState {
        match self.next_message().await {
            Some(Message::Text(text)) => {
                serde_json::from_str(&text).expect("Server frame should be an AudioState")
            }
            other => panic!("Expected a state frame, got {:?}", other),
        }
    }

    /// Next frame as untyped JSON
    pub async fn next_json(&mut self) -> Value {
        match self.next_message().await {
            Some(Message::Text(text)) => serde_json::from_str(&text).unwrap(),
            other => panic!("Expected a text frame, got {:?}", other),
        }
    }

    /// Skip frames until one satisfies `predicate`
    pub async fn state_matching<F>(&mut self, predicate: F) -> AudioState
    where
        F: Fn(&AudioState) -> bool,
    {
        loop {
            let state = self.next_state().await;
            if predicate(&state) {
                return state;
            }
        }
    }

    pub fn send_json(&self, frame: Value) {
        self.send_text(&frame.to_string());
    }

    pub fn send_text(&self, text: &str) {
        self.send(Message::Text(text.to_string()));
    }

    pub fn send(&self, message: Message) {
        self.to_server
            .unbounded_send(Ok(message))
            .expect("Session should still be reading");
    }

    pub fn send_error(&self) {
        let _ = self
            .to_server
            .unbounded_send(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")));
    }

    /// Hang up without a close frame
    pub fn hang_up(self) -> JoinHandle<()> {
        self.session
    }

    /// Wait for the server side of the session to finish
    pub async fn wait_closed(self) {
        timeout(DELIVERY_TIMEOUT, self.session)
            .await
            .expect("Session did not finish")
            .expect("Session panicked");
    }
}
