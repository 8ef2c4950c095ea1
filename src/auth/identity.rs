//! User registration and credential checks
//!
//! Passwords are hashed with Argon2 on the blocking thread pool.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task;

use crate::error::AuthError;

/// A registered user as seen by the rest of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

// == Identity Provider ==
/// Source of user accounts.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account. Usernames are unique.
    async fn register(&self, username: &str, email: &str, password: &str)
        -> Result<User, AuthError>;

    /// Checks a username/password pair.
    ///
    /// Unknown users and wrong passwords both yield `InvalidCredentials`.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;
}

#[derive(Debug)]
struct Account {
    user: User,
    password_hash: String,
}

/// Identity provider keeping accounts in process memory.
#[derive(Debug)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    next_id: AtomicI64,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.accounts.read().await.contains_key(username) {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = hash_password(password.to_string()).await?;

        let mut accounts = self.accounts.write().await;
        // Another registration may have won while we were hashing
        if accounts.contains_key(username) {
            return Err(AuthError::DuplicateUsername);
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            username: username.to_string(),
            email: email.to_string(),
        };
        accounts.insert(
            username.to_string(),
            Account {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = {
            let accounts = self.accounts.read().await;
            let account = accounts
                .get(username)
                .ok_or(AuthError::InvalidCredentials)?;
            (account.user.clone(), account.password_hash.clone())
        };

        if verify_password(password.to_string(), password_hash).await? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

// == Hashing ==
async fn hash_password(password: String) -> Result<String, AuthError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(e.to_string()))?
}

async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|e| AuthError::Hashing(e.to_string()))
}
