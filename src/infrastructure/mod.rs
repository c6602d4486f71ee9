//! Infrastructure layer: concrete implementations of the domain traits
//! and the wire-format DTOs.

pub mod dto;
pub mod event_pusher;
pub mod registry;
