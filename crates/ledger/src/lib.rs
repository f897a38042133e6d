//! `splitbooks-ledger` — transactions, split policies, and the balance fold.
//!
//! Everything here is pure computation over a given transaction set. The
//! engine never mutates the collection; writes happen at the store boundary.

pub mod engine;
pub mod split;
pub mod transaction;

pub use engine::{balance_effect, compute_balance};
pub use split::{Shares, SplitPolicy};
pub use transaction::{Category, Transaction, TransactionKind};
