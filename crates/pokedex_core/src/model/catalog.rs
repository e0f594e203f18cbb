//! Persisted catalog entities.
//!
//! # Responsibility
//! - Define the row shapes stored for the six catalog entities.
//! - Own natural-key normalization used by duplicate detection.
//!
//! # Invariants
//! - Identities are assigned by the store; `0` means "not yet persisted".
//! - Natural keys compare after `trim` and Unicode uppercase on both sides.
//! - Owning references (`country_id`, `pokemon_id`, `reviewer_id`) always
//!   point at existing rows once persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CategoryId = i64;
pub type CountryId = i64;
pub type OwnerId = i64;
pub type PokemonId = i64;
pub type ReviewId = i64;
pub type ReviewerId = i64;

/// Identity value carried by entities that have not been inserted yet.
pub const UNSAVED_ID: i64 = 0;

/// Normalizes a natural-key value for case/whitespace-insensitive comparison.
pub fn natural_key(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Write-time validation failures for catalog entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required text field is empty after trimming.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
        }
    }
}

impl Error for ModelValidationError {}

fn require(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField { entity, field });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
        }
    }

    pub fn natural_key(&self) -> String {
        natural_key(&self.name)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("category", "name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
        }
    }

    pub fn natural_key(&self) -> String {
        natural_key(&self.name)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("country", "name", &self.name)
    }
}

/// Pokemon owner living in exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub country_id: CountryId,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country_id: CountryId,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
            country_id,
        }
    }

    /// Owners are unique by their concatenated full name.
    pub fn natural_key(&self) -> String {
        owner_key(&self.first_name, &self.last_name)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("owner", "first_name", &self.first_name)?;
        require("owner", "last_name", &self.last_name)
    }
}

/// Natural key for an owner given the raw name parts.
pub fn owner_key(first_name: &str, last_name: &str) -> String {
    natural_key(&format!("{first_name}{last_name}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    pub birth_date: NaiveDate,
}

impl Pokemon {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            birth_date,
        }
    }

    pub fn natural_key(&self) -> String {
        natural_key(&self.name)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("pokemon", "name", &self.name)
    }
}

/// Review of one pokemon written by one reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub pokemon_id: PokemonId,
    pub reviewer_id: ReviewerId,
}

impl Review {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
        pokemon_id: PokemonId,
        reviewer_id: ReviewerId,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_id,
            reviewer_id,
        }
    }

    pub fn natural_key(&self) -> String {
        natural_key(&self.title)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("review", "title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: ReviewerId,
    pub first_name: String,
    pub last_name: String,
}

impl Reviewer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Reviewers are unique by last name alone.
    pub fn natural_key(&self) -> String {
        natural_key(&self.last_name)
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require("reviewer", "last_name", &self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{natural_key, owner_key, Category, ModelValidationError, Owner};

    #[test]
    fn natural_key_trims_and_uppercases() {
        assert_eq!(natural_key("  canada "), "CANADA");
        assert_eq!(natural_key("Canada"), natural_key("\tCANADA\n"));
    }

    #[test]
    fn natural_key_folds_non_ascii_letters() {
        assert_eq!(natural_key("flabébé"), "FLABÉBÉ");
    }

    #[test]
    fn owner_key_concatenates_name_parts() {
        let owner = Owner::new("Ash", "Ketchum", 1);
        assert_eq!(owner.natural_key(), "ASHKETCHUM");
        assert_eq!(owner_key(" ash", "ketchum "), "ASHKETCHUM");
    }

    #[test]
    fn validate_rejects_blank_names() {
        let err = Category::new("   ").validate().unwrap_err();
        assert_eq!(
            err,
            ModelValidationError::BlankField {
                entity: "category",
                field: "name"
            }
        );
    }
}
