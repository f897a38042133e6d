//! Extraction results and the collaborator contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use splitbooks_ledger::Category;

/// How a receipt line item should split, as guessed by the extractor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitHint {
    Even,
    PayerOnly,
    CounterpartyOnly,
}

/// One extracted line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    /// Name translated to the session language, when the provider offers one.
    pub translated_name: Option<String>,
    pub price: Decimal,
    pub category_guess: Option<Category>,
    pub split_hint: Option<SplitHint>,
}

/// Structured result of a receipt extraction.
///
/// This is *not* a domain record. It is candidate data a higher layer shows
/// the user before anything is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    pub items: Vec<ExtractedItem>,
    pub total_amount: Decimal,
    pub date: NaiveDate,
    /// Free-form provider metadata (model name, timings, etc).
    pub metadata: JsonValue,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The provider call itself failed (network, quota, server error).
    #[error("extraction provider failed: {0}")]
    Provider(String),

    /// The provider answered with output that could not be interpreted.
    #[error("unparsable extraction output: {0}")]
    Unparsable(String),

    /// The retry budget ran out.
    #[error("extraction gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

/// Opaque image-to-structured-data collaborator.
///
/// Implementations must not mutate domain state. Callers treat any error as
/// recoverable: the transaction form stays in manual-entry state.
pub trait ReceiptExtractor: Send + Sync {
    fn extract(&self, image: &[u8]) -> Result<ExtractedReceipt, ExtractError>;
}
