use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::account::Account;
use crate::store::{AccountStore, NewAccount};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn get_accounts(&self) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, Account>(
            "SELECT id, first_name, last_name, number, password_hash, balance, created_at \
             FROM accounts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, Account>(
            "SELECT id, first_name, last_name, number, password_hash, balance, created_at \
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::AccountNotFound)
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, Account>(
            "SELECT id, first_name, last_name, number, password_hash, balance, created_at \
             FROM accounts WHERE number = $1",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(AppError::AccountNotFound)
    }

    async fn create_account(&self, new: NewAccount) -> Result<Account, AppError> {
        let row = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (first_name, last_name, number, password_hash)
               VALUES ($1, $2, $3, $4)
               RETURNING id, first_name, last_name, number, password_hash, balance, created_at"#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.number)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateNumber,
            other => AppError::Database(other),
        })?;
        Ok(row)
    }

    async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::AccountNotFound);
        }
        Ok(())
    }
}
