//! Test helper modules for Tandem Player integration tests
//!
//! Provides reusable test infrastructure components:
//! - TestServer: in-process router plus the service behind it
//! - TestPeer: an in-memory push client driving `run_session`

#![allow(dead_code)]

pub mod test_peer;
pub mod test_server;

pub use test_peer::TestPeer;
pub use test_server::TestServer;
