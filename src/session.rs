use tracing::warn;

use crate::models::{SyncState, Transaction};
use crate::store::{LedgerStore, StoreError};
use crate::sync::SyncClient;

/// The store plus an optional remote. All transaction writes go through
/// here so each record's sync state tracks what actually reached the
/// server.
///
/// Remote calls are one best-effort attempt: on success the server's
/// canonical record is stored, on failure the local record is stored
/// anyway and flagged. Nothing here ever blocks a local mutation.
pub struct Session {
    pub store: LedgerStore,
    sync: Option<SyncClient>,
}

impl Session {
    pub fn new(store: LedgerStore, sync: Option<SyncClient>) -> Self {
        Self { store, sync }
    }

    pub fn has_remote(&self) -> bool {
        self.sync.is_some()
    }

    pub fn add_transaction(&mut self, mut txn: Transaction) -> i64 {
        match &self.sync {
            Some(client) => match client.create_transaction(&txn) {
                Ok(canonical) => self.store.add_transaction(canonical),
                Err(e) => {
                    warn!("remote create failed, keeping local copy: {e:#}");
                    txn.sync = SyncState::Pending;
                    self.store.add_transaction(txn)
                }
            },
            None => {
                txn.sync = SyncState::Local;
                self.store.add_transaction(txn)
            }
        }
    }

    pub fn update_transaction(&mut self, mut txn: Transaction) -> Result<(), StoreError> {
        match &self.sync {
            Some(client) => match client.update_transaction(&txn) {
                Ok(canonical) => self.store.update_transaction(canonical),
                Err(e) => {
                    warn!("remote update failed, keeping local copy: {e:#}");
                    let was_synced = self
                        .store
                        .find_transaction(txn.id)
                        .map(|t| t.sync == SyncState::Synced)
                        .unwrap_or(false);
                    // A locally edited record the server already knows about
                    // has now diverged from it.
                    txn.sync = if was_synced {
                        SyncState::Conflict
                    } else {
                        SyncState::Pending
                    };
                    self.store.update_transaction(txn)
                }
            },
            None => {
                txn.sync = SyncState::Local;
                self.store.update_transaction(txn)
            }
        }
    }

    /// Remove locally no matter what the remote says.
    pub fn delete_transaction(&mut self, id: i64) -> Result<Transaction, StoreError> {
        if let Some(client) = &self.sync {
            if let Err(e) = client.delete_transaction(id) {
                warn!("remote delete failed, removing locally anyway: {e:#}");
            }
        }
        self.store.remove_transaction(id)
    }
}

#[cfg(test)]
mod session_tests {
    #![allow(clippy::unwrap_used)]

    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Category, TxnKind};
    use crate::persist::MemoryStorage;
    use crate::store::LedgerStore;

    fn offline_session() -> Session {
        Session::new(LedgerStore::open(Box::new(MemoryStorage::new())), None)
    }

    // Port 9 (discard) refuses connections, so every remote call fails fast.
    fn unreachable_session() -> Session {
        let client = SyncClient::new("http://127.0.0.1:9", "tester").unwrap();
        Session::new(
            LedgerStore::open(Box::new(MemoryStorage::new())),
            Some(client),
        )
    }

    fn txn(amount: rust_decimal::Decimal) -> Transaction {
        Transaction {
            id: 0,
            amount,
            description: "Coffee".into(),
            category: Category::DiningOut,
            kind: TxnKind::Expense,
            date: "2024-03-01".into(),
            merchant: None,
            sync: SyncState::Synced,
        }
    }

    #[test]
    fn test_offline_records_stay_local() {
        let mut session = offline_session();
        assert!(!session.has_remote());

        let id = session.add_transaction(txn(dec!(4.50)));
        assert_eq!(
            session.store.find_transaction(id).unwrap().sync,
            SyncState::Local
        );
    }

    #[test]
    fn test_failed_remote_create_marks_pending() {
        let mut session = unreachable_session();
        assert!(session.has_remote());

        let id = session.add_transaction(txn(dec!(4.50)));
        assert_eq!(
            session.store.find_transaction(id).unwrap().sync,
            SyncState::Pending
        );
    }

    #[test]
    fn test_failed_remote_update_of_synced_record_marks_conflict() {
        let mut session = unreachable_session();
        // txn() carries SyncState::Synced; insert it directly so the store
        // holds a record the server already knows about
        let id = session.store.add_transaction(txn(dec!(4.50)));

        let mut edited = session.store.find_transaction(id).unwrap().clone();
        edited.description = "Espresso".into();
        session.update_transaction(edited).unwrap();

        assert_eq!(
            session.store.find_transaction(id).unwrap().sync,
            SyncState::Conflict
        );
    }

    #[test]
    fn test_offline_delete_removes_locally() {
        let mut session = offline_session();
        let id = session.add_transaction(txn(dec!(4.50)));
        session.delete_transaction(id).unwrap();
        assert!(session.store.transactions().is_empty());
    }
}
