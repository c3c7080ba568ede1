//! Request-level operations of the registry.
//!
//! Handlers stay thin: they extract input and the caller, call one method
//! here, and wrap the result. Every method returns [`ApiError`] so handlers
//! can use `?` directly.

use std::cmp::Reverse;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use chipreg_auth::{Hs256Jwt, PasswordHasher};
use chipreg_core::AnimalId;
use chipreg_infra::store::StoreError;
use chipreg_infra::{ActivityLog, Stores};
use chipreg_registry::{
    Activity, Animal, AnimalPatch, Credentials, NewAnimal, NewUser, PublicAnimal, User, UserView,
};

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

const PHONE_TAKEN: &str = "a user with this phone is already registered";
const CHIP_TAKEN: &str = "an animal with this chip number is already registered";

/// Password checked on logins for unknown phones, so both rejection paths
/// run one verification.
const DUMMY_PASSWORD: &str = "chipreg-dummy-password";

pub struct AppServices {
    stores: Stores,
    activity_log: ActivityLog,
    activity_page_size: usize,
    hasher: Arc<dyn PasswordHasher>,
    jwt: Arc<Hs256Jwt>,
    dummy_hash: String,
}

/// Tunables that are not part of any single store or codec.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub activity_retention: usize,
    pub activity_page_size: usize,
}

impl AppServices {
    pub async fn new(
        stores: Stores,
        jwt: Arc<Hs256Jwt>,
        hasher: Arc<dyn PasswordHasher>,
        settings: ServiceSettings,
    ) -> anyhow::Result<Self> {
        let dummy_hash = {
            let hasher = hasher.clone();
            tokio::task::spawn_blocking(move || hasher.hash(DUMMY_PASSWORD))
                .await
                .context("dummy hash task failed")?
                .context("failed to compute dummy password hash")?
        };
        let activity_log = ActivityLog::new(stores.activities.clone(), settings.activity_retention);

        Ok(Self {
            stores,
            activity_log,
            activity_page_size: settings.activity_page_size,
            hasher,
            jwt,
            dummy_hash,
        })
    }

    // -------------------------
    // Accounts
    // -------------------------

    pub async fn register(&self, input: NewUser) -> Result<(String, UserView), ApiError> {
        let registration = input.validate()?;

        let phone = registration.phone.clone();
        if self.stores.users.find(&move |u: &User| u.phone == phone).await?.is_some() {
            return Err(ApiError::Conflict(PHONE_TAKEN.to_string()));
        }

        let password_hash = self.hash_password(registration.password.clone()).await?;
        let now = Utc::now();
        let user = User::register(&registration, password_hash, now);
        self.stores
            .users
            .insert(user.clone())
            .await
            .map_err(|e| ApiError::from_store(e, PHONE_TAKEN))?;

        let token = self.jwt.issue(user.id, &user.phone, now)?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok((token, user.view()))
    }

    pub async fn login(&self, input: Credentials) -> Result<(String, UserView), ApiError> {
        let attempt = input.validate()?;

        let phone = attempt.phone.clone();
        let user = self.stores.users.find(&move |u: &User| u.phone == phone).await?;

        let Some(user) = user else {
            self.verify_password(attempt.password, self.dummy_hash.clone()).await?;
            tracing::debug!("login rejected: unknown phone");
            return Err(ApiError::InvalidCredentials);
        };

        if !self
            .verify_password(attempt.password, user.password_hash.clone())
            .await?
        {
            tracing::debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.id, &user.phone, Utc::now())?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((token, user.view()))
    }

    pub async fn me(&self, principal: &PrincipalContext) -> Result<UserView, ApiError> {
        let user = self
            .stores
            .users
            .get(&principal.user_id())
            .await?
            .ok_or(ApiError::NotFound("user"))?;
        Ok(user.view())
    }

    // -------------------------
    // Animals
    // -------------------------

    pub async fn add_animal(&self, principal: &PrincipalContext, input: NewAnimal) -> Result<Animal, ApiError> {
        let registration = input.validate()?;

        let owner = self
            .stores
            .users
            .get(&principal.user_id())
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        let chip = registration.chip_number.clone();
        if self.stores.animals.find(&move |a: &Animal| a.chip_number == chip).await?.is_some() {
            return Err(ApiError::Conflict(CHIP_TAKEN.to_string()));
        }

        let now = Utc::now();
        let animal = Animal::register(registration, &owner, now);
        self.stores
            .animals
            .insert(animal.clone())
            .await
            .map_err(|e| ApiError::from_store(e, CHIP_TAKEN))?;

        tracing::info!(
            user_id = %owner.id,
            animal_id = %animal.id,
            chip_number = %animal.chip_number,
            "animal registered"
        );
        self.record_activity(Activity::animal_added(owner.id, &animal, now)).await;
        Ok(animal)
    }

    /// The caller's animals, newest registration first.
    pub async fn list_animals(&self, principal: &PrincipalContext) -> Result<Vec<Animal>, ApiError> {
        let owner = principal.user_id();
        let mut animals = self
            .stores
            .animals
            .list(&move |a: &Animal| a.is_owned_by(owner))
            .await?;
        animals.sort_by_key(|a| Reverse((a.registration_date, a.id)));
        Ok(animals)
    }

    pub async fn get_animal(&self, principal: &PrincipalContext, raw_id: &str) -> Result<Animal, ApiError> {
        self.owned_animal(principal, raw_id).await
    }

    pub async fn update_animal(
        &self,
        principal: &PrincipalContext,
        raw_id: &str,
        patch: AnimalPatch,
    ) -> Result<Animal, ApiError> {
        let existing = self.owned_animal(principal, raw_id).await?;

        let now = Utc::now();
        let updated = existing.apply_patch(patch, now)?;
        self.stores
            .animals
            .replace(updated.clone())
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => ApiError::NotFound("animal"),
                other => ApiError::from_store(other, CHIP_TAKEN),
            })?;

        tracing::info!(user_id = %principal.user_id(), animal_id = %updated.id, "animal updated");
        self.record_activity(Activity::animal_updated(principal.user_id(), &updated, now))
            .await;
        Ok(updated)
    }

    pub async fn delete_animal(&self, principal: &PrincipalContext, raw_id: &str) -> Result<(), ApiError> {
        let existing = self.owned_animal(principal, raw_id).await?;

        let removed = self
            .stores
            .animals
            .remove(&existing.id)
            .await?
            .ok_or(ApiError::NotFound("animal"))?;

        tracing::info!(
            user_id = %principal.user_id(),
            animal_id = %removed.id,
            chip_number = %removed.chip_number,
            "animal deleted"
        );
        self.record_activity(Activity::animal_deleted(principal.user_id(), &removed, Utc::now()))
            .await;
        Ok(())
    }

    // -------------------------
    // Activity + public lookup
    // -------------------------

    pub async fn activities(&self, principal: &PrincipalContext) -> Result<Vec<Activity>, ApiError> {
        Ok(self
            .activity_log
            .recent_for(principal.user_id(), self.activity_page_size)
            .await?)
    }

    /// Anonymous lookup by chip number; only the public projection leaves.
    pub async fn search(&self, chip_number: &str) -> Result<PublicAnimal, ApiError> {
        let chip = chip_number.trim().to_string();
        if chip.is_empty() {
            return Err(ApiError::validation("chipNumber is required"));
        }

        let animal = self
            .stores
            .animals
            .find(&move |a: &Animal| a.chip_number == chip)
            .await?
            .ok_or(ApiError::NotFound("animal"))?;
        Ok(animal.public_view())
    }

    // -------------------------
    // Helpers
    // -------------------------

    /// An animal the caller owns. Bad ids, missing records and foreign
    /// records are all the same 404.
    async fn owned_animal(&self, principal: &PrincipalContext, raw_id: &str) -> Result<Animal, ApiError> {
        let id: AnimalId = raw_id.parse().map_err(|_| ApiError::NotFound("animal"))?;
        self.stores
            .animals
            .get(&id)
            .await?
            .filter(|a| a.is_owned_by(principal.user_id()))
            .ok_or(ApiError::NotFound("animal"))
    }

    async fn record_activity(&self, entry: Activity) {
        let user_id = entry.user_id;
        if let Err(e) = self.activity_log.append(entry).await {
            tracing::warn!(user_id = %user_id, error = %e, "failed to record activity");
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, ApiError> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("password hashing task failed")??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, ApiError> {
        let hasher = self.hasher.clone();
        let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .context("password verification task failed")??;
        Ok(ok)
    }
}
