//! Party identity: the two sides of a shared-expense ledger.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Closed enumeration of exactly two identities, `A` and `B`.
///
/// Parties are never created or destroyed; the ledger always has exactly
/// these two sides. [`Party::other`] flips to the counterparty.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    A,
    B,
}

impl Party {
    /// The opposite side.
    pub fn other(self) -> Self {
        match self {
            Party::A => Party::B,
            Party::B => Party::A,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::A => f.write_str("A"),
            Party::B => f.write_str("B"),
        }
    }
}
