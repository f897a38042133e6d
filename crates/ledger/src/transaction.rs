//! Transaction records: shared expenses and settlement transfers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitbooks_core::{BookId, DomainError, DomainResult, Party, TransactionId};

use crate::split::SplitPolicy;

/// Display category for a transaction.
///
/// Closed set; the balance fold ignores it entirely.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Groceries,
    Transport,
    Entertainment,
    Utilities,
    Travel,
    Health,
    Shopping,
    Other,
}

/// What kind of record a transaction is.
///
/// An expense carries exactly one split policy; a settlement carries none
/// (split math does not apply to a direct transfer). The invariant is
/// structural: there is no way to build a settlement with a split or an
/// expense without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense { split: SplitPolicy },
    Settlement,
}

/// A single ledger record.
///
/// Records are owned by the shared store and replaced wholesale on edit;
/// nothing in this crate mutates them after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Decimal,
    pub category: Category,
    /// Calendar date; no time-of-day semantics.
    pub date: NaiveDate,
    /// Who fronted the money.
    pub paid_by: Party,
    pub kind: TransactionKind,
    /// Owning book. Absent on legacy records written before books existed.
    pub book_id: Option<BookId>,
}

fn ensure_non_negative(value: Decimal, what: &str) -> DomainResult<()> {
    if value < Decimal::ZERO {
        return Err(DomainError::invalid_amount(format!(
            "{what} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

impl Transaction {
    /// Create a cost-sharing expense.
    ///
    /// The amount and any custom shares must be non-negative; custom shares
    /// are deliberately NOT required to sum to the amount.
    pub fn expense(
        id: TransactionId,
        amount: Decimal,
        category: Category,
        date: NaiveDate,
        paid_by: Party,
        split: SplitPolicy,
        book_id: Option<BookId>,
    ) -> DomainResult<Self> {
        ensure_non_negative(amount, "transaction amount")?;
        if let SplitPolicy::Custom { share_a, share_b } = split {
            ensure_non_negative(share_a, "custom share for a")?;
            ensure_non_negative(share_b, "custom share for b")?;
        }

        Ok(Self {
            id,
            amount,
            category,
            date,
            paid_by,
            kind: TransactionKind::Expense { split },
            book_id,
        })
    }

    /// Create a debt-repayment transfer from `paid_by` to the counterparty.
    pub fn settlement(
        id: TransactionId,
        amount: Decimal,
        date: NaiveDate,
        paid_by: Party,
        book_id: Option<BookId>,
    ) -> DomainResult<Self> {
        ensure_non_negative(amount, "transaction amount")?;

        Ok(Self {
            id,
            amount,
            category: Category::Other,
            date,
            paid_by,
            kind: TransactionKind::Settlement,
            book_id,
        })
    }

    pub fn is_settlement(&self) -> bool {
        matches!(self.kind, TransactionKind::Settlement)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    /// The split policy, for expenses.
    pub fn split(&self) -> Option<&SplitPolicy> {
        match &self.kind {
            TransactionKind::Expense { split } => Some(split),
            TransactionKind::Settlement => None,
        }
    }

    /// Whether a custom split's shares add up to the transaction amount.
    ///
    /// Always true for the fixed policies and for settlements. The engine
    /// folds inconsistent shares as-is; this is for display-layer warnings.
    pub fn split_reconciles(&self) -> bool {
        match &self.kind {
            TransactionKind::Expense {
                split: SplitPolicy::Custom { share_a, share_b },
            } => *share_a + *share_b == self.amount,
            _ => true,
        }
    }
}
