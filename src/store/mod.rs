use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::account::Account;

pub mod memory;
pub mod postgres;

/// Fields supplied when creating an account. The store assigns the id
/// and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub password_hash: String,
}

/// Storage capability for accounts.
///
/// Handlers and the ownership gate depend on this trait, never on a
/// concrete store, so tests can run against [`memory::MemStore`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get_accounts(&self) -> Result<Vec<Account>, AppError>;

    /// Lookup by storage id. Absent ids yield [`AppError::AccountNotFound`].
    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError>;

    /// Lookup by business account number.
    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError>;

    /// Insert a new account. A colliding `number` yields
    /// [`AppError::DuplicateNumber`] so callers can regenerate and retry.
    async fn create_account(&self, new: NewAccount) -> Result<Account, AppError>;

    async fn delete_account(&self, id: i64) -> Result<(), AppError>;
}
