//! Book scoping: which records belong to the book being viewed.
//!
//! Pure functions over a given snapshot; nothing here mutates the
//! collections or talks to the store.

use splitbooks_core::BookId;
use splitbooks_jars::Jar;
use splitbooks_ledger::Transaction;

use crate::book::Book;

/// The earliest-created book. Ties on `created_at` break by id.
pub fn earliest_book(books: &[Book]) -> Option<&Book> {
    books.iter().min_by_key(|b| (b.created_at, b.id))
}

/// Whether records without a book id belong to the view of `book_id`.
///
/// Legacy records predate books and carry no tag. They are attributed to the
/// earliest-created book, and only surface while that book is the one being
/// viewed. This keeps pre-book data visible without a backfill step.
fn adopts_legacy(book_id: BookId, books: &[Book]) -> bool {
    earliest_book(books).map(|b| b.id) == Some(book_id)
}

/// Filter the full transaction set down to one book's scope.
pub fn scope_transactions<'a>(
    all: &'a [Transaction],
    book_id: BookId,
    books: &[Book],
) -> Vec<&'a Transaction> {
    let adopt = adopts_legacy(book_id, books);
    all.iter()
        .filter(|tx| match tx.book_id {
            Some(owner) => owner == book_id,
            None => adopt,
        })
        .collect()
}

/// Filter the full jar set down to one book's scope. Same legacy rule as
/// transactions.
pub fn scope_jars<'a>(all: &'a [Jar], book_id: BookId, books: &[Book]) -> Vec<&'a Jar> {
    let adopt = adopts_legacy(book_id, books);
    all.iter()
        .filter(|jar| match jar.book_id {
            Some(owner) => owner == book_id,
            None => adopt,
        })
        .collect()
}

/// Active books in creation order.
pub fn active_books(books: &[Book]) -> Vec<&Book> {
    let mut active: Vec<&Book> = books.iter().filter(|b| b.is_active()).collect();
    active.sort_by_key(|b| (b.created_at, b.id));
    active
}

/// Which book a session should be looking at.
///
/// Keeps the current selection while that book still exists; otherwise falls
/// back to the first active book in creation order, then to the first book
/// outright. `None` only on an empty collection, where callers bootstrap a
/// default book before proceeding.
pub fn select_book(books: &[Book], current: Option<BookId>) -> Option<BookId> {
    if let Some(current) = current {
        if books.iter().any(|b| b.id == current) {
            return Some(current);
        }
    }

    let mut ordered: Vec<&Book> = books.iter().collect();
    ordered.sort_by_key(|b| (b.created_at, b.id));

    ordered
        .iter()
        .find(|b| b.is_active())
        .or_else(|| ordered.first())
        .map(|b| b.id)
}
