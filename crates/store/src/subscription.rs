//! Snapshot delivery mechanics.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// A full, authoritative view of one collection at a point in time.
///
/// Snapshots **replace** the subscriber's working set; they are never
/// patches. Delivery is per-collection FIFO; there is no ordering guarantee
/// across collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub taken_at: DateTime<Utc>,
    pub documents: Vec<T>,
}

/// A subscription to one collection's snapshot stream.
///
/// Designed for single-threaded consumption: each subscription belongs to
/// one client session loop.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next snapshot is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a snapshot without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain to the most recent snapshot, if any arrived.
    ///
    /// Intermediate snapshots are safe to skip because each one is total.
    pub fn latest(&self) -> Option<M> {
        let mut latest = None;
        while let Ok(message) = self.receiver.try_recv() {
            latest = Some(message);
        }
        latest
    }
}
