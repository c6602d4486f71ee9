//! UI layer: axum router, WebSocket handler, HTTP endpoints.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
