//! Registered animals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use chipreg_core::{AnimalId, DomainResult, Entity, UserId, Violations};

use crate::text;
use crate::user::User;

/// Fields an owner may change after registration.
///
/// Anything outside this struct (`id`, `chipNumber`, owner snapshot,
/// `registrationDate`) is fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDetails {
    pub pet_name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub vaccinations: Option<String>,
    #[serde(default)]
    pub diseases: Option<String>,
    #[serde(default)]
    pub vet_info: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub behavior: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl AnimalDetails {
    fn check(&self, violations: &mut Violations) {
        violations
            .check(self.pet_name.is_empty(), "petName is required")
            .check(self.species.is_empty(), "species is required");
    }

    /// Overlay the supplied patch fields. Blank optional values clear the field.
    fn merge(&mut self, patch: AnimalPatch, violations: &mut Violations) {
        fn set(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = text::optional(value);
            }
        }

        if patch.pet_name.is_some() {
            self.pet_name = text::required(patch.pet_name);
        }
        if patch.species.is_some() {
            self.species = text::required(patch.species);
        }
        if patch.birth_date.is_some() {
            self.birth_date = text::date(patch.birth_date, violations);
        }
        set(&mut self.breed, patch.breed);
        set(&mut self.color, patch.color);
        set(&mut self.gender, patch.gender);
        set(&mut self.vaccinations, patch.vaccinations);
        set(&mut self.diseases, patch.diseases);
        set(&mut self.vet_info, patch.vet_info);
        set(&mut self.diet, patch.diet);
        set(&mut self.behavior, patch.behavior);
        set(&mut self.additional_info, patch.additional_info);
    }
}

/// Stored animal record.
///
/// # Invariants
/// - `chip_number` is unique across all animals and never changes.
/// - `owner_name`/`owner_phone` are a snapshot of the owner at registration time.
/// - Only [`AnimalDetails`] and `last_updated` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub chip_number: String,
    #[serde(flatten)]
    pub details: AnimalDetails,
    pub owner_id: UserId,
    pub owner_name: String,
    pub owner_phone: String,
    pub registration_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Animal {
    /// Create a record owned by `owner`, snapshotting the owner's contact data.
    pub fn register(registration: AnimalRegistration, owner: &User, now: DateTime<Utc>) -> Self {
        Self {
            id: AnimalId::new(),
            chip_number: registration.chip_number,
            details: registration.details,
            owner_id: owner.id,
            owner_name: owner.full_name.clone(),
            owner_phone: owner.phone.clone(),
            registration_date: now,
            last_updated: now,
        }
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Apply an owner's edit, returning the updated record.
    ///
    /// Only the details are merged; the protected fields are carried over from
    /// `self` unchanged.
    pub fn apply_patch(&self, patch: AnimalPatch, now: DateTime<Utc>) -> DomainResult<Animal> {
        let mut details = self.details.clone();
        let mut violations = Violations::new();
        details.merge(patch, &mut violations);
        details.check(&mut violations);
        violations.into_result()?;

        Ok(Animal {
            details,
            last_updated: now,
            ..self.clone()
        })
    }

    pub fn public_view(&self) -> PublicAnimal {
        PublicAnimal::from(self)
    }
}

impl Entity for Animal {
    type Id = AnimalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Raw "add animal" request, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub chip_number: Option<String>,
    pub pet_name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub vaccinations: Option<String>,
    pub diseases: Option<String>,
    pub vet_info: Option<String>,
    pub diet: Option<String>,
    pub behavior: Option<String>,
    pub additional_info: Option<String>,
}

/// "Add animal" request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalRegistration {
    pub chip_number: String,
    pub details: AnimalDetails,
}

impl NewAnimal {
    pub fn validate(self) -> DomainResult<AnimalRegistration> {
        let mut violations = Violations::new();
        let chip_number = text::required(self.chip_number);
        let pet_name = text::required(self.pet_name);
        let species = text::required(self.species);
        violations
            .check(chip_number.is_empty(), "chipNumber is required")
            .check(pet_name.is_empty(), "petName is required")
            .check(species.is_empty(), "species is required");

        let details = AnimalDetails {
            pet_name,
            species,
            breed: text::optional(self.breed),
            birth_date: text::date(self.birth_date, &mut violations),
            color: text::optional(self.color),
            gender: text::optional(self.gender),
            vaccinations: text::optional(self.vaccinations),
            diseases: text::optional(self.diseases),
            vet_info: text::optional(self.vet_info),
            diet: text::optional(self.diet),
            behavior: text::optional(self.behavior),
            additional_info: text::optional(self.additional_info),
        };

        violations.into_result()?;

        Ok(AnimalRegistration {
            chip_number,
            details,
        })
    }
}

/// Partial update. Absent (or `null`) fields keep their stored value, blank
/// strings clear optional ones (including `birthDate`); fields
/// not listed here (e.g. `chipNumber`, `ownerId`) are ignored when present in
/// the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPatch {
    pub pet_name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub color: Option<String>,
    pub gender: Option<String>,
    pub vaccinations: Option<String>,
    pub diseases: Option<String>,
    pub vet_info: Option<String>,
    pub diet: Option<String>,
    pub behavior: Option<String>,
    pub additional_info: Option<String>,
}

/// What an anonymous chip lookup may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAnimal {
    pub pet_name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub chip_number: String,
}

impl From<&Animal> for PublicAnimal {
    fn from(animal: &Animal) -> Self {
        Self {
            pet_name: animal.details.pet_name.clone(),
            species: animal.details.species.clone(),
            breed: animal.details.breed.clone(),
            color: animal.details.color.clone(),
            owner_name: animal.owner_name.clone(),
            owner_phone: animal.owner_phone.clone(),
            chip_number: animal.chip_number.clone(),
        }
    }
}
