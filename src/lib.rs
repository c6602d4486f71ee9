//! Ephemeral moderated chat session server.
//!
//! This library implements the server side of a real-time multi-user chat
//! session with a built-in moderation layer: an authoritative in-memory
//! registry of connected participants, a broadcast pipeline for chat and
//! system events, and an admin command processor behind an authorization
//! guard.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
