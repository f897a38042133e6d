//! Session identity: which side of the ledger this device acts as.

use splitbooks_core::Party;

/// Resolves which of the two fixed parties the local session acts as.
///
/// Assignment happens outside the core (pairing/authentication);
/// implementations persist the answer locally so it survives restarts.
pub trait Identity: Send + Sync {
    fn current_party(&self) -> Party;
}

/// Fixed identity for tests and single-device sessions.
#[derive(Debug, Copy, Clone)]
pub struct FixedIdentity(pub Party);

impl Identity for FixedIdentity {
    fn current_party(&self) -> Party {
        self.0
    }
}
