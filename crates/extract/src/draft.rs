//! Draft transactions built from extracted receipts.

use std::collections::HashMap;

use rust_decimal::Decimal;

use splitbooks_core::{BookId, DomainResult, Party, TransactionId};
use splitbooks_ledger::{Category, SplitPolicy, Transaction};

use crate::receipt::{ExtractedReceipt, SplitHint};

/// Build a draft expense from an extracted receipt.
///
/// Per-item prices accumulate into an explicit custom split by hint; items
/// without a hint split evenly. The draft's amount is the receipt total, so
/// the accumulated shares may disagree with it (e.g. the extractor missed a
/// line item). The ledger accepts such splits as-is, and the user reviews
/// the draft before anything is written.
pub fn draft_expense(
    receipt: &ExtractedReceipt,
    paid_by: Party,
    book_id: Option<BookId>,
) -> DomainResult<Transaction> {
    let mut share_a = Decimal::ZERO;
    let mut share_b = Decimal::ZERO;
    let mut credit = |party: Party, amount: Decimal| match party {
        Party::A => share_a += amount,
        Party::B => share_b += amount,
    };

    for item in &receipt.items {
        match item.split_hint.unwrap_or(SplitHint::Even) {
            SplitHint::Even => {
                let half = item.price / Decimal::TWO;
                credit(Party::A, half);
                credit(Party::B, half);
            }
            SplitHint::PayerOnly => credit(paid_by, item.price),
            SplitHint::CounterpartyOnly => credit(paid_by.other(), item.price),
        }
    }

    Transaction::expense(
        TransactionId::new(),
        receipt.total_amount,
        modal_category(receipt),
        receipt.date,
        paid_by,
        SplitPolicy::Custom { share_a, share_b },
        book_id,
    )
}

/// The most frequent item category guess; earlier items win ties.
fn modal_category(receipt: &ExtractedReceipt) -> Category {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for item in &receipt.items {
        if let Some(guess) = item.category_guess {
            *counts.entry(guess).or_insert(0) += 1;
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for item in &receipt.items {
        if let Some(guess) = item.category_guess {
            let count = counts[&guess];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((guess, count));
            }
        }
    }

    best.map(|(category, _)| category).unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::Value as JsonValue;

    use crate::receipt::ExtractedItem;

    fn item(price: Decimal, hint: Option<SplitHint>, guess: Option<Category>) -> ExtractedItem {
        ExtractedItem {
            name: "item".to_string(),
            translated_name: None,
            price,
            category_guess: guess,
            split_hint: hint,
        }
    }

    fn receipt(items: Vec<ExtractedItem>, total: Decimal) -> ExtractedReceipt {
        ExtractedReceipt {
            items,
            total_amount: total,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            metadata: JsonValue::Null,
        }
    }

    #[test]
    fn hints_accumulate_into_custom_shares() {
        let receipt = receipt(
            vec![
                item(dec!(40), Some(SplitHint::Even), Some(Category::Groceries)),
                item(dec!(30), Some(SplitHint::PayerOnly), Some(Category::Groceries)),
                item(dec!(30), Some(SplitHint::CounterpartyOnly), None),
            ],
            dec!(100),
        );

        let draft = draft_expense(&receipt, Party::A, None).unwrap();

        match draft.split() {
            Some(SplitPolicy::Custom { share_a, share_b }) => {
                // Even 40 -> 20 each; payer-only 30 -> A; counterparty-only 30 -> B.
                assert_eq!(*share_a, dec!(50));
                assert_eq!(*share_b, dec!(50));
            }
            other => panic!("Expected a custom split, got {other:?}"),
        }
        assert_eq!(draft.amount, dec!(100));
        assert!(draft.split_reconciles());
    }

    #[test]
    fn hints_are_relative_to_the_payer() {
        let receipt = receipt(
            vec![item(dec!(30), Some(SplitHint::PayerOnly), None)],
            dec!(30),
        );

        let draft = draft_expense(&receipt, Party::B, None).unwrap();
        match draft.split() {
            Some(SplitPolicy::Custom { share_a, share_b }) => {
                assert_eq!(*share_a, dec!(0));
                assert_eq!(*share_b, dec!(30));
            }
            other => panic!("Expected a custom split, got {other:?}"),
        }
    }

    #[test]
    fn unhinted_items_split_evenly() {
        let receipt = receipt(vec![item(dec!(50), None, None)], dec!(50));

        let draft = draft_expense(&receipt, Party::A, None).unwrap();
        match draft.split() {
            Some(SplitPolicy::Custom { share_a, share_b }) => {
                assert_eq!(*share_a, dec!(25));
                assert_eq!(*share_b, dec!(25));
            }
            other => panic!("Expected a custom split, got {other:?}"),
        }
    }

    #[test]
    fn shares_may_disagree_with_the_receipt_total() {
        // The extractor missed a line item: shares sum to 40, total is 55.
        let receipt = receipt(
            vec![item(dec!(40), Some(SplitHint::Even), None)],
            dec!(55),
        );

        let draft = draft_expense(&receipt, Party::A, None).unwrap();
        assert_eq!(draft.amount, dec!(55));
        assert!(!draft.split_reconciles());
    }

    #[test]
    fn category_comes_from_the_modal_guess() {
        let receipt = receipt(
            vec![
                item(dec!(10), None, Some(Category::Food)),
                item(dec!(10), None, Some(Category::Groceries)),
                item(dec!(10), None, Some(Category::Groceries)),
            ],
            dec!(30),
        );

        let draft = draft_expense(&receipt, Party::A, None).unwrap();
        assert_eq!(draft.category, Category::Groceries);
    }

    #[test]
    fn unguessed_receipts_fall_back_to_other() {
        let receipt = receipt(vec![item(dec!(10), None, None)], dec!(10));

        let draft = draft_expense(&receipt, Party::A, None).unwrap();
        assert_eq!(draft.category, Category::Other);
    }

    #[test]
    fn empty_receipt_drafts_a_zero_share_split() {
        let receipt = receipt(Vec::new(), dec!(0));

        let draft = draft_expense(&receipt, Party::B, None).unwrap();
        assert_eq!(draft.amount, dec!(0));
        match draft.split() {
            Some(SplitPolicy::Custom { share_a, share_b }) => {
                assert_eq!(*share_a, dec!(0));
                assert_eq!(*share_b, dec!(0));
            }
            other => panic!("Expected a custom split, got {other:?}"),
        }
    }

    #[test]
    fn draft_carries_the_receipt_date_and_book() {
        let book_id = BookId::new();
        let receipt = receipt(vec![item(dec!(10), None, None)], dec!(10));

        let draft = draft_expense(&receipt, Party::A, Some(book_id)).unwrap();
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(draft.book_id, Some(book_id));
        assert_eq!(draft.paid_by, Party::A);
    }
}
