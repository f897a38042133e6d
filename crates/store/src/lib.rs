//! `splitbooks-store` — the replicated-store boundary and per-client state.
//!
//! The external store is the sole arbiter of write ordering (last write
//! wins) and the only place state mutates. Clients never patch their working
//! sets: every change arrives as a full authoritative snapshot, and all
//! derived values are recomputed from it in full.

pub mod memory;
pub mod session;
pub mod store;
pub mod subscription;
pub mod workspace;

pub use memory::InMemoryStore;
pub use session::{FixedIdentity, Identity};
pub use store::{SharedStore, StoreError};
pub use subscription::{Snapshot, Subscription};
pub use workspace::Workspace;
