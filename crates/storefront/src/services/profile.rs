//! Customer profile service.

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use mirror_core::{Gender, UserId};

use crate::identity::{IdentityError, IdentityStore};
use crate::models::{CurrentUser, Profile};
use crate::services::validation::{self, ValidationError};

/// Errors from profile operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("identity store error: {0}")]
    Identity(#[from] IdentityError),

    /// The account has never written a profile.
    #[error("profile not found")]
    NotFound,
}

impl ProfileError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Identity(_) => "Could not save your profile. Please try again.".to_string(),
            Self::NotFound => "Please complete your profile.".to_string(),
        }
    }
}

/// Profile fields submitted by the customer.
///
/// Absent fields are left untouched by [`ProfileService::update`].
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
}

/// Reads and writes the profile document for signed-in customers.
pub struct ProfileService<'a, S> {
    store: &'a S,
}

impl<'a, S: IdentityStore> ProfileService<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if no profile was ever written.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: UserId) -> Result<Profile, ProfileError> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    /// Write the first full profile after registration.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` if the name is blank (nothing is
    /// written), or `ProfileError::Identity` if the write fails.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn complete(
        &self,
        user: &CurrentUser,
        form: ProfileForm,
    ) -> Result<Profile, ProfileError> {
        let profile = Profile {
            name: form.name.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            gender: form.gender.unwrap_or_default(),
            email: user.email.clone(),
        };
        self.save(user.id, profile).await
    }

    /// Overlay the submitted fields on the stored profile.
    ///
    /// A missing profile starts from a blank one carrying the account email.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Validation` if the resulting name is blank, or
    /// `ProfileError::Identity` if the read or write fails.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn update(
        &self,
        user: &CurrentUser,
        form: ProfileForm,
    ) -> Result<Profile, ProfileError> {
        let mut profile = self
            .store
            .get_profile(user.id)
            .await?
            .unwrap_or_else(|| Profile::blank(user.email.clone()));

        if let Some(name) = form.name {
            profile.name = name;
        }
        if let Some(phone) = form.phone {
            profile.phone = phone;
        }
        if let Some(gender) = form.gender {
            profile.gender = gender;
        }
        self.save(user.id, profile).await
    }

    async fn save(&self, user_id: UserId, mut profile: Profile) -> Result<Profile, ProfileError> {
        validation::require("name", &profile.name)?;
        profile.name = profile.name.trim().to_string();
        profile.phone = profile.phone.trim().to_string();

        self.store.set_profile(user_id, &profile).await?;
        Ok(profile)
    }
}
