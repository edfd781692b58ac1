use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::errors::AppError;

/// A bank account.
///
/// `id` is the storage key; `number` is the externally-facing business
/// handle. They are distinct on purpose: issued tokens assert the number,
/// never the storage id. `number` is unique and immutable once assigned.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    /// Salted Argon2id hash. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Verify a candidate password against the stored hash.
    /// Argon2 verification is constant-time over the digest.
    pub fn verify_password(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Generate a random six-digit account number.
/// Uniqueness is enforced by the store; callers retry on collision.
pub fn random_account_number() -> i64 {
    rand::thread_rng().gen_range(100_000..1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account(hash: String) -> Account {
        Account {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            number: 1001,
            password_hash: hash,
            balance: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hash_is_salted_and_not_plaintext() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();
        assert_ne!(a, "hunter2");
        // fresh salt per hash
        assert_ne!(a, b);
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hash = hash_password("hunter2").unwrap();
        let account = sample_account(hash);
        assert!(account.verify_password("hunter2"));
    }

    #[test]
    fn verify_rejects_wrong_password_and_garbage_hash() {
        let hash = hash_password("hunter2").unwrap();
        let account = sample_account(hash);
        assert!(!account.verify_password("letmein"));

        let broken = sample_account("not-a-phc-string".into());
        assert!(!broken.verify_password("hunter2"));
    }

    #[test]
    fn account_number_is_six_digits() {
        for _ in 0..100 {
            let n = random_account_number();
            assert!((100_000..1_000_000).contains(&n));
        }
    }

    #[test]
    fn serialization_is_camel_case_and_omits_hash() {
        let account = sample_account("secret-hash".into());
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["number"], 1001);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
