//! Jar state: an append-only deposit log plus derived aggregates.
//!
//! The history log is the source of truth; `current_amount` and the
//! per-party contribution totals are derived from it but persisted alongside
//! it, and the two must agree after every mutation. `audit` recomputes the
//! aggregates from the log so the agreement stays checkable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitbooks_core::{BookId, DepositId, DomainError, DomainResult, JarId, Party};

/// One recorded deposit. Entries are immutable facts; there is no reversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEntry {
    pub id: DepositId,
    pub amount: Decimal,
    pub party: Party,
    pub timestamp: DateTime<Utc>,
}

/// Per-party cumulative contribution totals.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub a: Decimal,
    pub b: Decimal,
}

impl Contributions {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn of(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.a,
            Party::B => self.b,
        }
    }

    pub fn total(&self) -> Decimal {
        self.a + self.b
    }

    fn credited(self, party: Party, amount: Decimal) -> Self {
        match party {
            Party::A => Self {
                a: self.a + amount,
                ..self
            },
            Party::B => Self {
                b: self.b + amount,
                ..self
            },
        }
    }
}

/// A shared savings goal.
///
/// Mutated only through [`Jar::deposit`]; never decremented (no withdrawal
/// exists). The whole jar is written back to the store as one document, so a
/// snapshot can never show the log and the aggregates out of step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jar {
    pub id: JarId,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub contributions: Contributions,
    /// Deposit log, newest first.
    pub history: Vec<DepositEntry>,
    /// Owning book. Absent on legacy records written before books existed.
    pub book_id: Option<BookId>,
}

impl Jar {
    /// Create a fresh jar with zero totals and an empty history.
    pub fn new(
        id: JarId,
        name: impl Into<String>,
        target_amount: Decimal,
        book_id: Option<BookId>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("jar name cannot be empty"));
        }
        if target_amount <= Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "jar target must be positive, got {target_amount}"
            )));
        }

        Ok(Self {
            id,
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            contributions: Contributions::zero(),
            history: Vec::new(),
            book_id,
        })
    }

    /// Record a deposit, returning the updated jar.
    ///
    /// Pure over the snapshot: the receiver is untouched, so a rejected
    /// deposit leaves state identical to before the call. `at` comes from
    /// the store's clock; the entry id is freshly generated.
    pub fn deposit(&self, party: Party, amount: Decimal, at: DateTime<Utc>) -> DomainResult<Jar> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "deposit must be positive, got {amount}"
            )));
        }

        let mut updated = self.clone();
        updated.current_amount += amount;
        updated.contributions = updated.contributions.credited(party, amount);
        updated.history.insert(
            0,
            DepositEntry {
                id: DepositId::new(),
                amount,
                party,
                timestamp: at,
            },
        );

        Ok(updated)
    }

    /// Whether the persisted aggregates agree with the history log.
    pub fn audit(&self) -> bool {
        let mut total = Decimal::ZERO;
        let mut per_party = Contributions::zero();
        for entry in &self.history {
            total += entry.amount;
            per_party = per_party.credited(entry.party, entry.amount);
        }

        self.current_amount == total && self.contributions == per_party
    }

    /// Fraction of the target reached, clamped to 1.
    ///
    /// Deposits past the target are allowed; only this presentation view
    /// clamps.
    pub fn progress(&self) -> Decimal {
        (self.current_amount / self.target_amount).min(Decimal::ONE)
    }
}
