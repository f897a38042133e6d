//! Client-side derived state: pure recomputation over the latest snapshots.

use rust_decimal::Decimal;
use tracing::debug;

use splitbooks_books::{Book, partition};
use splitbooks_core::BookId;
use splitbooks_jars::Jar;
use splitbooks_ledger::{Transaction, compute_balance};

use crate::subscription::Snapshot;

/// One session's working state.
///
/// Each incoming snapshot replaces the corresponding working set wholesale,
/// and every derived value (book selection, scoped records, the balance) is
/// recomputed in full from the replacement. Nothing optimistic lives here:
/// only confirmed snapshots feed it, so a failed write can never corrupt the
/// next computation.
#[derive(Debug, Default)]
pub struct Workspace {
    books: Vec<Book>,
    transactions: Vec<Transaction>,
    jars: Vec<Jar>,
    selected_book: Option<BookId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the book set and re-run the selection policy against it.
    pub fn apply_books(&mut self, snapshot: Snapshot<Book>) {
        self.books = snapshot.documents;
        self.selected_book = partition::select_book(&self.books, self.selected_book);
        debug!(
            books = self.books.len(),
            selected = ?self.selected_book,
            "applied books snapshot"
        );
    }

    /// Replace the transaction set.
    pub fn apply_transactions(&mut self, snapshot: Snapshot<Transaction>) {
        self.transactions = snapshot.documents;
        debug!(transactions = self.transactions.len(), "applied transactions snapshot");
    }

    /// Replace the jar set.
    pub fn apply_jars(&mut self, snapshot: Snapshot<Jar>) {
        self.jars = snapshot.documents;
        debug!(jars = self.jars.len(), "applied jars snapshot");
    }

    /// Switch the session to a book. Refused when the book is not in the
    /// latest snapshot.
    pub fn select_book(&mut self, id: BookId) -> bool {
        if self.books.iter().any(|b| b.id == id) {
            self.selected_book = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected_book(&self) -> Option<BookId> {
        self.selected_book
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Transactions in the selected book's scope.
    pub fn scoped_transactions(&self) -> Vec<&Transaction> {
        match self.selected_book {
            Some(id) => partition::scope_transactions(&self.transactions, id, &self.books),
            None => Vec::new(),
        }
    }

    /// Jars in the selected book's scope.
    pub fn scoped_jars(&self) -> Vec<&Jar> {
        match self.selected_book {
            Some(id) => partition::scope_jars(&self.jars, id, &self.books),
            None => Vec::new(),
        }
    }

    /// The selected book's net balance. Positive: Party B owes Party A.
    pub fn balance(&self) -> Decimal {
        compute_balance(self.scoped_transactions())
    }
}
