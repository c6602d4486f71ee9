//! Domain layer: value objects, entities, errors, and the traits the rest
//! of the system depends on.
//!
//! This layer performs no I/O. Concrete implementations of its traits live
//! in the infrastructure layer (dependency inversion).

pub mod entity;
pub mod error;
pub mod identity;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, Participant, SystemNotification};
pub use error::{PushError, RegistryError, ValidationError};
pub use identity::{ADMIN_NAME_TRIGGER, IdentityVerifier, SharedSecretVerifier};
pub use pusher::{EventPusher, PushSignal, PusherChannel};
pub use registry::SessionRegistry;
pub use value_object::{ColorCode, ConnectionId, DisplayName, Timestamp};
