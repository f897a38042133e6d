//! Split policy resolution: how an expense amount divides between the parties.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use splitbooks_core::Party;

/// Resolved per-party shares of one expense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shares {
    pub owed_by_a: Decimal,
    pub owed_by_b: Decimal,
}

impl Shares {
    pub fn owed_by(&self, party: Party) -> Decimal {
        match party {
            Party::A => self.owed_by_a,
            Party::B => self.owed_by_b,
        }
    }

    /// Shares expressed relative to the payer, mapped back onto A/B.
    fn by_payer(paid_by: Party, payer_share: Decimal, counterparty_share: Decimal) -> Self {
        match paid_by {
            Party::A => Shares {
                owed_by_a: payer_share,
                owed_by_b: counterparty_share,
            },
            Party::B => Shares {
                owed_by_a: counterparty_share,
                owed_by_b: payer_share,
            },
        }
    }
}

/// How an expense's cost divides between the two parties.
///
/// `Custom` shares are carried verbatim; they are not checked against the
/// transaction amount. Callers that care (display warnings) use
/// [`Transaction::split_reconciles`](crate::Transaction::split_reconciles).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Amount split 50/50.
    Even,
    /// The payer's personal cost; no counterparty share.
    PayerOnly,
    /// The entire cost attributed to the non-payer.
    CounterpartyOnly,
    /// Explicit per-party shares.
    Custom { share_a: Decimal, share_b: Decimal },
}

impl SplitPolicy {
    /// Resolve the per-party shares for an expense of `amount` fronted by
    /// `paid_by`.
    ///
    /// Pure and total: no error conditions. Amount non-negativity is
    /// enforced at ingestion, not here.
    pub fn resolve(&self, amount: Decimal, paid_by: Party) -> Shares {
        match *self {
            SplitPolicy::Even => {
                let half = amount / Decimal::TWO;
                Shares {
                    owed_by_a: half,
                    owed_by_b: half,
                }
            }
            SplitPolicy::PayerOnly => Shares::by_payer(paid_by, amount, Decimal::ZERO),
            SplitPolicy::CounterpartyOnly => Shares::by_payer(paid_by, Decimal::ZERO, amount),
            SplitPolicy::Custom { share_a, share_b } => Shares {
                owed_by_a: share_a,
                owed_by_b: share_b,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn even_split_halves_the_amount() {
        let shares = SplitPolicy::Even.resolve(dec!(1000), Party::A);
        assert_eq!(shares.owed_by_a, dec!(500));
        assert_eq!(shares.owed_by_b, dec!(500));

        // Payer does not matter for an even split.
        assert_eq!(shares, SplitPolicy::Even.resolve(dec!(1000), Party::B));
    }

    #[test]
    fn even_split_of_odd_amount_is_exact() {
        let shares = SplitPolicy::Even.resolve(dec!(0.01), Party::A);
        assert_eq!(shares.owed_by_a, dec!(0.005));
        assert_eq!(shares.owed_by_a + shares.owed_by_b, dec!(0.01));
    }

    #[test]
    fn payer_only_attributes_everything_to_the_payer() {
        let shares = SplitPolicy::PayerOnly.resolve(dec!(120), Party::A);
        assert_eq!(shares.owed_by_a, dec!(120));
        assert_eq!(shares.owed_by_b, dec!(0));

        let shares = SplitPolicy::PayerOnly.resolve(dec!(120), Party::B);
        assert_eq!(shares.owed_by_a, dec!(0));
        assert_eq!(shares.owed_by_b, dec!(120));
    }

    #[test]
    fn counterparty_only_attributes_everything_to_the_other_side() {
        let shares = SplitPolicy::CounterpartyOnly.resolve(dec!(75), Party::A);
        assert_eq!(shares.owed_by_a, dec!(0));
        assert_eq!(shares.owed_by_b, dec!(75));

        let shares = SplitPolicy::CounterpartyOnly.resolve(dec!(75), Party::B);
        assert_eq!(shares.owed_by_a, dec!(75));
        assert_eq!(shares.owed_by_b, dec!(0));
    }

    #[test]
    fn custom_shares_are_returned_verbatim() {
        let policy = SplitPolicy::Custom {
            share_a: dec!(30),
            share_b: dec!(80),
        };

        // 30 + 80 != 100: accepted as-is, no validation against the amount.
        let shares = policy.resolve(dec!(100), Party::A);
        assert_eq!(shares.owed_by_a, dec!(30));
        assert_eq!(shares.owed_by_b, dec!(80));
    }

    #[test]
    fn owed_by_indexes_the_matching_side() {
        let shares = Shares {
            owed_by_a: dec!(1),
            owed_by_b: dec!(2),
        };
        assert_eq!(shares.owed_by(Party::A), dec!(1));
        assert_eq!(shares.owed_by(Party::B), dec!(2));
    }
}
