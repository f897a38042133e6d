//! The shared-store contract, as the core consumes it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use splitbooks_books::Book;
use splitbooks_core::{DomainError, JarId, Party, TransactionId};
use splitbooks_jars::Jar;
use splitbooks_ledger::Transaction;

use crate::subscription::{Snapshot, Subscription};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed the write. Nothing was applied; the
    /// next snapshot still reflects the last confirmed state.
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// Internal lock poisoning.
    #[error("store lock poisoned")]
    Poisoned,

    /// Domain validation surfaced at the write boundary (e.g. a
    /// non-positive deposit).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The replicated shared store.
///
/// The store is the sole arbiter of write ordering and applies
/// **last-write-wins** on conflicting writes to the same record; the core
/// assumes nothing stronger. Every successful mutation fans a fresh full
/// snapshot out to subscribers; a failed write mutates nothing and emits
/// nothing.
pub trait SharedStore: Send + Sync {
    /// Subscribe to a collection. The current snapshot is delivered
    /// immediately, then one per change.
    fn subscribe_transactions(&self) -> Subscription<Snapshot<Transaction>>;
    fn subscribe_jars(&self) -> Subscription<Snapshot<Jar>>;
    fn subscribe_books(&self) -> Subscription<Snapshot<Book>>;

    /// Create or replace a transaction (whole-record write).
    fn write_transaction(&self, tx: Transaction) -> Result<(), StoreError>;

    fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError>;

    /// Create or replace a jar (whole-document write).
    fn write_jar(&self, jar: Jar) -> Result<(), StoreError>;

    /// Record a deposit as **one combined write** covering the jar's total,
    /// contributions and history together. A snapshot can never show a jar
    /// with the deposit partially applied.
    fn deposit(&self, jar_id: JarId, party: Party, amount: Decimal) -> Result<Jar, StoreError>;

    /// Create or replace a book.
    fn write_book(&self, book: Book) -> Result<(), StoreError>;

    /// First-run bootstrap: create the single default book when none exist.
    /// Returns the book a fresh session should start on.
    fn ensure_default_book(&self) -> Result<Book, StoreError>;

    /// The store's clock. Deposit history timestamps come from here.
    fn now(&self) -> DateTime<Utc>;
}
