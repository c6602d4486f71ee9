//! Concrete `EventPusher` implementations.
//!
//! - `websocket`: delivery over per-connection WebSocket channels.

pub mod websocket;

pub use websocket::WebSocketEventPusher;
