//! Edge adapters: HTTP request/response endpoints and the WebSocket push
//! endpoint

pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{build_router, run, AppContext};
