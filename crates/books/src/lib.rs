//! `splitbooks-books` — named ledger scopes with an active/archived lifecycle.

pub mod book;
pub mod partition;

pub use book::{Book, BookStatus};
pub use partition::{active_books, earliest_book, scope_jars, scope_transactions, select_book};
