//! In-memory store backing tests. Same trait surface as the Postgres
//! store, plus a lookup counter so tests can assert that malformed
//! requests never reach storage.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::account::Account;
use crate::store::{AccountStore, NewAccount};

pub struct MemStore {
    accounts: RwLock<Vec<Account>>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of by-id / by-number lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for MemStore {
    async fn get_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.accounts.read().await.clone())
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AppError::AccountNotFound)
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.number == number)
            .cloned()
            .ok_or(AppError::AccountNotFound)
    }

    async fn create_account(&self, new: NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.number == new.number) {
            return Err(AppError::DuplicateNumber);
        }
        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: new.first_name,
            last_name: new.last_name,
            number: new.number,
            password_hash: new.password_hash,
            balance: 0,
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        if accounts.len() == before {
            return Err(AppError::AccountNotFound);
        }
        Ok(())
    }
}
