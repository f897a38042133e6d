//! The balance fold: who currently owes whom, and how much.
//!
//! Sign convention: a **positive** net balance means Party B owes Party A
//! that amount; negative means the reverse. The fold is a plain sum of
//! independent per-transaction effects, so it is commutative and
//! associative: the order the store delivers records in must never change
//! the result.

use rust_decimal::Decimal;

use splitbooks_core::Party;

use crate::transaction::{Transaction, TransactionKind};

/// The independent contribution of one transaction to the net balance.
///
/// - An expense fronted by one party puts the counterparty's resolved share
///   on the books against them.
/// - A settlement is a direct transfer; it moves the balance in the payer's
///   favor by the full amount, netting against whichever direction the
///   outstanding debt runs.
pub fn balance_effect(tx: &Transaction) -> Decimal {
    match &tx.kind {
        TransactionKind::Settlement => match tx.paid_by {
            Party::A => tx.amount,
            Party::B => -tx.amount,
        },
        TransactionKind::Expense { split } => {
            let shares = split.resolve(tx.amount, tx.paid_by);
            match tx.paid_by {
                Party::A => shares.owed_by_b,
                Party::B => -shares.owed_by_a,
            }
        }
    }
}

/// Fold a transaction set into a single signed net balance.
///
/// Read-only over the collection; O(n) single pass, no allocation beyond
/// the accumulator. An empty set folds to zero ("settled"), which is data,
/// not an error.
pub fn compute_balance<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, tx| acc + balance_effect(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use splitbooks_core::TransactionId;

    use crate::split::SplitPolicy;
    use crate::transaction::Category;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn expense(amount: Decimal, paid_by: Party, split: SplitPolicy) -> Transaction {
        Transaction::expense(
            TransactionId::new(),
            amount,
            Category::Food,
            test_date(),
            paid_by,
            split,
            None,
        )
        .unwrap()
    }

    fn settlement(amount: Decimal, paid_by: Party) -> Transaction {
        Transaction::settlement(TransactionId::new(), amount, test_date(), paid_by, None).unwrap()
    }

    #[test]
    fn empty_set_is_settled() {
        let txs: Vec<Transaction> = Vec::new();
        assert_eq!(compute_balance(&txs), dec!(0));
    }

    #[test]
    fn even_expense_fronted_by_a_puts_half_on_b() {
        let txs = vec![expense(dec!(1000), Party::A, SplitPolicy::Even)];
        assert_eq!(compute_balance(&txs), dec!(500));
    }

    #[test]
    fn settlement_from_b_clears_the_debt() {
        let txs = vec![
            expense(dec!(1000), Party::A, SplitPolicy::Even),
            settlement(dec!(500), Party::B),
        ];
        assert_eq!(compute_balance(&txs), dec!(0));
    }

    #[test]
    fn even_expense_fronted_by_b_puts_half_on_a() {
        let txs = vec![expense(dec!(300), Party::B, SplitPolicy::Even)];
        assert_eq!(compute_balance(&txs), dec!(-150));
    }

    #[test]
    fn payer_only_expense_does_not_move_the_balance() {
        let txs = vec![
            expense(dec!(80), Party::A, SplitPolicy::PayerOnly),
            expense(dec!(90), Party::B, SplitPolicy::PayerOnly),
        ];
        assert_eq!(compute_balance(&txs), dec!(0));
    }

    #[test]
    fn counterparty_only_expense_moves_the_full_amount() {
        let txs = vec![expense(dec!(60), Party::A, SplitPolicy::CounterpartyOnly)];
        assert_eq!(compute_balance(&txs), dec!(60));

        let txs = vec![expense(dec!(60), Party::B, SplitPolicy::CounterpartyOnly)];
        assert_eq!(compute_balance(&txs), dec!(-60));
    }

    #[test]
    fn zero_amount_transactions_are_no_ops() {
        let txs = vec![
            expense(dec!(0), Party::A, SplitPolicy::Even),
            settlement(dec!(0), Party::B),
            expense(dec!(100), Party::A, SplitPolicy::Even),
        ];
        assert_eq!(compute_balance(&txs), dec!(50));
    }

    #[test]
    fn inconsistent_custom_split_is_folded_as_is() {
        // Shares sum to 110, amount is 100: the engine trusts the caller.
        let txs = vec![expense(
            dec!(100),
            Party::A,
            SplitPolicy::Custom {
                share_a: dec!(30),
                share_b: dec!(80),
            },
        )];
        assert_eq!(compute_balance(&txs), dec!(80));
    }

    #[test]
    fn settlements_compound_across_directions() {
        let txs = vec![
            settlement(dec!(100), Party::A),
            settlement(dec!(30), Party::B),
            settlement(dec!(20), Party::B),
        ];
        assert_eq!(compute_balance(&txs), dec!(50));
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|c| Decimal::new(c, 2))
    }

    fn any_party() -> impl Strategy<Value = Party> {
        prop_oneof![Just(Party::A), Just(Party::B)]
    }

    fn any_split() -> impl Strategy<Value = SplitPolicy> {
        prop_oneof![
            Just(SplitPolicy::Even),
            Just(SplitPolicy::PayerOnly),
            Just(SplitPolicy::CounterpartyOnly),
            (cents(), cents()).prop_map(|(share_a, share_b)| SplitPolicy::Custom {
                share_a,
                share_b
            }),
        ]
    }

    fn any_transaction() -> impl Strategy<Value = Transaction> {
        (cents(), any_party(), prop::option::of(any_split())).prop_map(
            |(amount, paid_by, split)| match split {
                Some(split) => expense(amount, paid_by, split),
                None => settlement(amount, paid_by),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the fold is order-independent.
        #[test]
        fn balance_is_invariant_under_reordering(
            (txs, shuffled) in prop::collection::vec(any_transaction(), 0..16)
                .prop_flat_map(|txs| (Just(txs.clone()), Just(txs).prop_shuffle()))
        ) {
            prop_assert_eq!(compute_balance(&txs), compute_balance(&shuffled));
        }

        /// Property: an even expense contributes exactly half the amount,
        /// signed by who fronted it.
        #[test]
        fn even_expense_contributes_half(amount in cents(), paid_by in any_party()) {
            let tx = expense(amount, paid_by, SplitPolicy::Even);
            let expected = match paid_by {
                Party::A => amount / Decimal::TWO,
                Party::B => -(amount / Decimal::TWO),
            };
            prop_assert_eq!(balance_effect(&tx), expected);
        }

        /// Property: a settlement shifts any prior balance linearly by its
        /// amount, in the payer's favor, regardless of the prior sign.
        #[test]
        fn settlement_shifts_balance_linearly(
            txs in prop::collection::vec(any_transaction(), 0..12),
            amount in cents(),
            paid_by in any_party(),
        ) {
            let base = compute_balance(&txs);

            let mut with_settlement = txs.clone();
            with_settlement.push(settlement(amount, paid_by));

            let shift = match paid_by {
                Party::A => amount,
                Party::B => -amount,
            };
            prop_assert_eq!(compute_balance(&with_settlement), base + shift);
        }

        /// Property: the fold equals the sum of individual effects.
        #[test]
        fn fold_is_sum_of_effects(txs in prop::collection::vec(any_transaction(), 0..16)) {
            let summed = txs.iter().map(balance_effect).fold(Decimal::ZERO, |a, e| a + e);
            prop_assert_eq!(compute_balance(&txs), summed);
        }
    }
}
