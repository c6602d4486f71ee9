//! Privilege assignment rule.
//!
//! The observed behavior grants admin to the participant whose declared
//! name exactly equals a reserved trigger string. That is a single
//! shared-secret bearer credential, so the comparison sits behind the
//! `IdentityVerifier` trait: the trigger can be swapped for a real
//! credential without touching the session logic.

use super::value_object::DisplayName;

/// Reserved display name that elevates the declaring connection to admin.
///
/// Process-wide constant, never user-configurable at runtime.
pub const ADMIN_NAME_TRIGGER: &str = "./admin-menu./";

/// Decides whether a declared identity carries admin privilege.
pub trait IdentityVerifier: Send + Sync {
    /// Returns true when the declared name is the elevation credential.
    fn is_admin(&self, declared: &DisplayName) -> bool;
}

/// Default verifier: exact string match against the reserved trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedSecretVerifier;

impl IdentityVerifier for SharedSecretVerifier {
    fn is_admin(&self, declared: &DisplayName) -> bool {
        declared.as_str() == ADMIN_NAME_TRIGGER
    }
}
