//! The single ordered collection of user records shared by
//! every view.
//!
//! Every mutation replaces the whole sequence, either directly through
//! `replace_all` or as a read-compute-replace via `update`. Each replacement bumps the
//! snapshot version and wakes every `subscribe()` receiver, so views can
//! re-render without polling.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::users::models::UserRecord;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub users: Arc<Vec<UserRecord>>,
}

#[derive(Clone)]
pub struct RecordStore {
    tx: Arc<watch::Sender<Snapshot>>,
    /// Held across read-compute-replace in `update`.
    writer: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(seed: Vec<UserRecord>) -> Self {
        let mut seen = HashSet::new();
        let users: Vec<UserRecord> = seed
            .into_iter()
            .filter(|u| {
                let fresh = seen.insert(u.id);
                if !fresh {
                    warn!("Dropping duplicate seed record for user {}", u.id);
                }
                fresh
            })
            .collect();

        let (tx, _rx) = watch::channel(Snapshot {
            version: 0,
            users: Arc::new(users),
        });
        RecordStore {
            tx: Arc::new(tx),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn get_all(&self) -> Arc<Vec<UserRecord>> {
        self.tx.borrow().users.clone()
    }

    pub fn find(&self, id: u32) -> Option<UserRecord> {
        self.tx.borrow().users.iter().find(|u| u.id == id).cloned()
    }

    /// Publishes `users` as the new sequence and wakes subscribers.
    pub fn replace_all(&self, users: Vec<UserRecord>) -> Snapshot {
        let mut next = None;
        self.tx.send_modify(|snapshot| {
            snapshot.version += 1;
            snapshot.users = Arc::new(users);
            next = Some(snapshot.clone());
        });
        let next = next.unwrap_or_else(|| self.snapshot());
        debug!(
            "User registry replaced: version {}, {} records",
            next.version,
            next.users.len()
        );
        next
    }

    /// Computes the next sequence from the current one and publishes it with
    /// `replace_all`. Concurrent updates are serialized, so none of them
    /// computes from a stale sequence.
    pub fn update(&self, f: impl FnOnce(&[UserRecord]) -> Vec<UserRecord>) -> Snapshot {
        let _writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.get_all();
        self.replace_all(f(&current))
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}
