//! Test doubles for [`IdentityStore`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use argon2::{Algorithm, Argon2, Params, Version};
use secrecy::SecretString;

use mirror_core::{Email, UserId};

use super::{IdentityError, IdentityStore, MemoryIdentityStore};
use crate::models::{CurrentUser, Profile};

/// Memory store with the cheapest Argon2 parameters, for fast tests.
#[allow(clippy::unwrap_used)]
pub fn fast_store() -> MemoryIdentityStore {
    let params = Params::new(8, 1, 1, None).unwrap();
    MemoryIdentityStore::with_hasher(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Wraps a memory store, counting every call and optionally failing them.
pub struct RecordingStore {
    inner: MemoryIdentityStore,
    calls: AtomicUsize,
    failure: Mutex<Option<IdentityError>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: fast_store(),
            calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Make every following call fail with `error`.
    #[allow(clippy::unwrap_used)]
    pub fn fail_with(&self, error: IdentityError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Number of calls that reached the store.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self) -> Result<(), IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failure.lock().unwrap().clone().map_or(Ok(()), Err)
    }
}

impl IdentityStore for RecordingStore {
    async fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<UserId, IdentityError> {
        self.record()?;
        self.inner.create_account(email, password).await
    }

    async fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<CurrentUser, IdentityError> {
        self.record()?;
        self.inner.sign_in(email, password).await
    }

    async fn send_password_reset(&self, email: &Email) -> Result<(), IdentityError> {
        self.record()?;
        self.inner.send_password_reset(email).await
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, IdentityError> {
        self.record()?;
        self.inner.get_profile(user_id).await
    }

    async fn set_profile(&self, user_id: UserId, profile: &Profile) -> Result<(), IdentityError> {
        self.record()?;
        self.inner.set_profile(user_id, profile).await
    }

    async fn sign_out(&self, user_id: UserId) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_out(user_id).await;
    }
}
