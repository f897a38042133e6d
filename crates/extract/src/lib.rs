//! `splitbooks-extract`
//!
//! **Responsibility:** the image-to-structured-data collaborator boundary.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not mutate domain state.
//! - It produces **candidate** transaction data for the user to review; a
//!   failed extraction falls back to manual entry with no partial data
//!   applied.

pub mod draft;
pub mod receipt;
pub mod retry;

pub use draft::draft_expense;
pub use receipt::{ExtractError, ExtractedItem, ExtractedReceipt, ReceiptExtractor, SplitHint};
pub use retry::{RetryPolicy, extract_with_retry};
