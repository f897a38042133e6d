//! Book records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitbooks_core::{BookId, DomainError, DomainResult};

/// Book lifecycle status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Active,
    Archived,
}

/// A named ledger grouping transactions and jars.
///
/// Books are never physically deleted; archiving is a pure status toggle and
/// an archived book's records remain fully readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub status: BookStatus,
    /// Monotonic creation marker, used only for default ordering.
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Create an active book.
    pub fn new(id: BookId, name: impl Into<String>, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("book name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            status: BookStatus::Active,
            created_at,
        })
    }

    /// The single auto-created book for first-run bootstrap.
    pub fn default_book(created_at: DateTime<Utc>) -> Self {
        Self {
            id: BookId::new(),
            name: "General".to_string(),
            status: BookStatus::Active,
            created_at,
        }
    }

    pub fn archive(&mut self) {
        self.status = BookStatus::Archived;
    }

    pub fn restore(&mut self) {
        self.status = BookStatus::Active;
    }

    pub fn is_active(&self) -> bool {
        self.status == BookStatus::Active
    }
}
