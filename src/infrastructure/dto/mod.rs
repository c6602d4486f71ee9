//! Data Transfer Objects (DTOs) for the chat session wire protocol.
//!
//! - `websocket`: WebSocket frame DTOs (client→server and server→client)
//! - `conversion`: mapping between domain entities and frames

pub mod conversion;
pub mod websocket;
