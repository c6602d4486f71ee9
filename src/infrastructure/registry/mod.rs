//! Concrete `SessionRegistry` implementations.
//!
//! - `inmemory`: the only implementation; all session state is memory-only
//!   and lost on restart by design.

pub mod inmemory;

pub use inmemory::InMemorySessionRegistry;
