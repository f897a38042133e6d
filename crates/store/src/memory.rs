//! In-memory store for tests/dev.
//!
//! Mirrors the semantics the core is allowed to rely on from the real
//! replicated store, and nothing more: last-write-wins per record id, one
//! lock scope per mutation (atomicity), full-snapshot fan-out after every
//! successful write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock, mpsc};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use splitbooks_books::{Book, select_book};
use splitbooks_core::{BookId, JarId, Party, TransactionId};
use splitbooks_jars::Jar;
use splitbooks_ledger::Transaction;

use crate::store::{SharedStore, StoreError};
use crate::subscription::{Snapshot, Subscription};

struct Topic<K, T> {
    records: RwLock<HashMap<K, T>>,
    subscribers: Mutex<Vec<mpsc::Sender<Snapshot<T>>>>,
}

impl<K, T> Default for Topic<K, T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<K: Copy + Ord + std::hash::Hash, T: Clone> Topic<K, T> {
    /// Full view of the collection, id-ordered for deterministic delivery.
    fn snapshot(records: &HashMap<K, T>, taken_at: DateTime<Utc>) -> Snapshot<T> {
        let mut keys: Vec<K> = records.keys().copied().collect();
        keys.sort();
        let documents = keys
            .iter()
            .filter_map(|k| records.get(k).cloned())
            .collect();

        Snapshot {
            taken_at,
            documents,
        }
    }

    /// Fan the snapshot out, dropping dead subscribers along the way.
    fn broadcast(&self, snapshot: Snapshot<T>) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(snapshot.clone()).is_ok());
        }
    }

    fn subscribe(&self, taken_at: DateTime<Utc>) -> Result<Subscription<Snapshot<T>>, StoreError> {
        let (tx, rx) = mpsc::channel();

        // New subscribers start from the current state.
        let initial = {
            let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
            Self::snapshot(&records, taken_at)
        };
        let _ = tx.send(initial);

        self.subscribers
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .push(tx);

        Ok(Subscription::new(rx))
    }
}

/// In-memory shared store.
///
/// `set_fail_writes(true)` makes every subsequent write fail without
/// mutating anything, for exercising write-failure handling.
#[derive(Default)]
pub struct InMemoryStore {
    transactions: Topic<TransactionId, Transaction>,
    jars: Topic<JarId, Jar>,
    books: Topic<BookId, Book>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle injected write failure.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn ensure_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl SharedStore for InMemoryStore {
    fn subscribe_transactions(&self) -> Subscription<Snapshot<Transaction>> {
        self.transactions
            .subscribe(self.now())
            .unwrap_or_else(|_| Subscription::new(mpsc::channel().1))
    }

    fn subscribe_jars(&self) -> Subscription<Snapshot<Jar>> {
        self.jars
            .subscribe(self.now())
            .unwrap_or_else(|_| Subscription::new(mpsc::channel().1))
    }

    fn subscribe_books(&self) -> Subscription<Snapshot<Book>> {
        self.books
            .subscribe(self.now())
            .unwrap_or_else(|_| Subscription::new(mpsc::channel().1))
    }

    fn write_transaction(&self, tx: Transaction) -> Result<(), StoreError> {
        self.ensure_writable()?;

        let snapshot = {
            let mut records = self
                .transactions
                .records
                .write()
                .map_err(|_| StoreError::Poisoned)?;
            // Last write wins: a replace is indistinguishable from a create.
            records.insert(tx.id, tx);
            Topic::snapshot(&records, self.now())
        };

        debug!(transactions = snapshot.documents.len(), "transaction written");
        self.transactions.broadcast(snapshot);
        Ok(())
    }

    fn delete_transaction(&self, id: TransactionId) -> Result<(), StoreError> {
        self.ensure_writable()?;

        let snapshot = {
            let mut records = self
                .transactions
                .records
                .write()
                .map_err(|_| StoreError::Poisoned)?;
            if records.remove(&id).is_none() {
                return Err(StoreError::NotFound);
            }
            Topic::snapshot(&records, self.now())
        };

        debug!(transaction_id = %id, "transaction deleted");
        self.transactions.broadcast(snapshot);
        Ok(())
    }

    fn write_jar(&self, jar: Jar) -> Result<(), StoreError> {
        self.ensure_writable()?;

        let snapshot = {
            let mut records = self.jars.records.write().map_err(|_| StoreError::Poisoned)?;
            records.insert(jar.id, jar);
            Topic::snapshot(&records, self.now())
        };

        self.jars.broadcast(snapshot);
        Ok(())
    }

    fn deposit(&self, jar_id: JarId, party: Party, amount: Decimal) -> Result<Jar, StoreError> {
        self.ensure_writable()?;

        let (updated, snapshot) = {
            let mut records = self.jars.records.write().map_err(|_| StoreError::Poisoned)?;
            let jar = records.get(&jar_id).ok_or(StoreError::NotFound)?;

            // Total, contributions and history change together under one
            // lock scope: subscribers can never observe a partial deposit.
            let updated = jar.deposit(party, amount, self.now())?;
            records.insert(jar_id, updated.clone());

            (updated, Topic::snapshot(&records, self.now()))
        };

        debug!(jar_id = %jar_id, party = %party, %amount, "deposit recorded");
        self.jars.broadcast(snapshot);
        Ok(updated)
    }

    fn write_book(&self, book: Book) -> Result<(), StoreError> {
        self.ensure_writable()?;

        let snapshot = {
            let mut records = self.books.records.write().map_err(|_| StoreError::Poisoned)?;
            records.insert(book.id, book);
            Topic::snapshot(&records, self.now())
        };

        self.books.broadcast(snapshot);
        Ok(())
    }

    fn ensure_default_book(&self) -> Result<Book, StoreError> {
        {
            let records = self.books.records.read().map_err(|_| StoreError::Poisoned)?;
            if !records.is_empty() {
                let all: Vec<Book> = records.values().cloned().collect();
                return select_book(&all, None)
                    .and_then(|id| all.iter().find(|b| b.id == id).cloned())
                    .ok_or(StoreError::NotFound);
            }
        }

        self.ensure_writable()?;

        let (book, snapshot) = {
            let mut records = self.books.records.write().map_err(|_| StoreError::Poisoned)?;
            // Re-check under the write lock: another session may have won
            // the bootstrap race.
            if let Some(existing) = records.values().next().cloned() {
                return Ok(existing);
            }

            let book = Book::default_book(self.now());
            records.insert(book.id, book.clone());
            (book, Topic::snapshot(&records, self.now()))
        };

        debug!(book_id = %book.id, "bootstrapped default book");
        self.books.broadcast(snapshot);
        Ok(book)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
