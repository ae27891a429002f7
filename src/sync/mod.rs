use std::time::Duration;

use anyhow::{Context, Result};

use crate::models::{SyncState, Transaction};

pub mod wire;

pub use wire::TransactionWire;

/// Environment variable naming the remote API root. Sync is disabled when
/// it is unset.
pub const REMOTE_URL_VAR: &str = "HOMELEDGER_REMOTE_URL";
/// Environment variable naming the remote user. Defaults to "default".
pub const REMOTE_USER_VAR: &str = "HOMELEDGER_USER";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort client for the remote ledger API.
///
/// One attempt per operation, no retries, no offline queue. The local store
/// stays the source of truth whatever the remote outcome.
pub struct SyncClient {
    http: reqwest::blocking::Client,
    base_url: String,
    user: String,
}

impl SyncClient {
    pub fn new(base_url: &str, user: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
        })
    }

    /// Build a client from the environment, or `None` when no remote is
    /// configured.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(REMOTE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => {
                let user =
                    std::env::var(REMOTE_USER_VAR).unwrap_or_else(|_| "default".to_string());
                Ok(Some(Self::new(&url, &user)?))
            }
            _ => Ok(None),
        }
    }

    fn transactions_url(&self) -> String {
        format!("{}/users/{}/transactions", self.base_url, self.user)
    }

    /// POST the transaction and return the server's canonical record.
    pub fn create_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        let wire: TransactionWire = self
            .http
            .post(self.transactions_url())
            .json(&TransactionWire::from(txn))
            .send()
            .context("Remote create failed")?
            .error_for_status()
            .context("Remote create rejected")?
            .json()
            .context("Remote create returned an unreadable body")?;
        wire.into_transaction(SyncState::Synced)
    }

    /// PUT the transaction and return the server's canonical record.
    pub fn update_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        let wire: TransactionWire = self
            .http
            .put(format!("{}/{}", self.transactions_url(), txn.id))
            .json(&TransactionWire::from(txn))
            .send()
            .context("Remote update failed")?
            .error_for_status()
            .context("Remote update rejected")?
            .json()
            .context("Remote update returned an unreadable body")?;
        wire.into_transaction(SyncState::Synced)
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        self.http
            .delete(format!("{}/{}", self.transactions_url(), id))
            .send()
            .context("Remote delete failed")?
            .error_for_status()
            .context("Remote delete rejected")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
