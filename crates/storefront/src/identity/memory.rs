//! In-process identity store.

use std::collections::{HashMap, HashSet};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::instrument;

use mirror_core::{Email, UserId};

use super::{IdentityError, IdentityStore};
use crate::models::{CurrentUser, Profile};

/// Shortest password the store accepts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// A password reset the store was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRequest {
    pub email: Email,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Account {
    id: UserId,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Documents {
    next_id: i32,
    accounts: HashMap<Email, Account>,
    profiles: HashMap<UserId, Profile>,
    password_resets: Vec<PasswordResetRequest>,
    signed_in: HashSet<UserId>,
}

/// Identity store holding accounts, Argon2id password hashes and profile
/// documents in memory.
pub struct MemoryIdentityStore {
    hasher: Argon2<'static>,
    documents: RwLock<Documents>,
}

impl Default for MemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryIdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryIdentityStore").finish_non_exhaustive()
    }
}

impl MemoryIdentityStore {
    /// Create an empty store using default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(Argon2::default())
    }

    /// Create an empty store with a specific Argon2 configuration.
    #[must_use]
    pub fn with_hasher(hasher: Argon2<'static>) -> Self {
        Self {
            hasher,
            documents: RwLock::new(Documents {
                next_id: 1,
                ..Documents::default()
            }),
        }
    }

    /// Password resets requested so far, oldest first.
    pub async fn password_resets(&self) -> Vec<PasswordResetRequest> {
        self.documents.read().await.password_resets.clone()
    }

    /// Whether the user is currently signed in.
    pub async fn is_signed_in(&self, user_id: UserId) -> bool {
        self.documents.read().await.signed_in.contains(&user_id)
    }

    fn hash_password(&self, password: &SecretString) -> Result<String, IdentityError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| IdentityError::Unavailable(format!("password hashing failed: {e}")))
    }

    fn verify_password(&self, password: &SecretString, hash: &str) -> Result<(), IdentityError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| IdentityError::InvalidCredentials)?;
        self.hasher
            .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
            .map_err(|_| IdentityError::InvalidCredentials)
    }
}

/// The hosted service only accepts addresses whose domain has a dot.
fn check_deliverable(email: &Email) -> Result<(), IdentityError> {
    let domain = email.domain();
    if domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') {
        Ok(())
    } else {
        Err(IdentityError::InvalidEmail)
    }
}

impl IdentityStore for MemoryIdentityStore {
    #[instrument(skip_all)]
    async fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserId, IdentityError> {
        check_deliverable(email)?;
        if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword);
        }

        let password_hash = self.hash_password(password)?;

        let mut documents = self.documents.write().await;
        if documents.accounts.contains_key(email) {
            return Err(IdentityError::EmailInUse);
        }
        let id = UserId::new(documents.next_id);
        documents.next_id += 1;
        documents
            .accounts
            .insert(email.clone(), Account { id, password_hash });
        documents.signed_in.insert(id);

        tracing::info!(user_id = %id, "account created");
        Ok(id)
    }

    #[instrument(skip_all)]
    async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<CurrentUser, IdentityError> {
        let (id, password_hash) = {
            let documents = self.documents.read().await;
            let account = documents
                .accounts
                .get(email)
                .ok_or(IdentityError::InvalidCredentials)?;
            (account.id, account.password_hash.clone())
        };

        self.verify_password(password, &password_hash)?;
        self.documents.write().await.signed_in.insert(id);

        tracing::info!(user_id = %id, "signed in");
        Ok(CurrentUser {
            id,
            email: email.clone(),
        })
    }

    #[instrument(skip_all)]
    async fn send_password_reset(&self, email: &Email) -> Result<(), IdentityError> {
        check_deliverable(email)?;

        let mut documents = self.documents.write().await;
        if !documents.accounts.contains_key(email) {
            return Err(IdentityError::UserNotFound);
        }
        documents.password_resets.push(PasswordResetRequest {
            email: email.clone(),
            requested_at: Utc::now(),
        });

        tracing::info!("password reset requested");
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, IdentityError> {
        Ok(self.documents.read().await.profiles.get(&user_id).cloned())
    }

    #[instrument(skip(self, profile))]
    async fn set_profile(&self, user_id: UserId, profile: &Profile) -> Result<(), IdentityError> {
        let mut documents = self.documents.write().await;
        if !documents.accounts.values().any(|account| account.id == user_id) {
            return Err(IdentityError::UserNotFound);
        }
        documents.profiles.insert(user_id, profile.clone());

        tracing::debug!("profile written");
        Ok(())
    }

    async fn sign_out(&self, user_id: UserId) {
        self.documents.write().await.signed_in.remove(&user_id);
    }
}
