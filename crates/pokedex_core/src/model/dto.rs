//! External payload/response shapes and their entity projections.
//!
//! Payloads omit owning references; those arrive as separate identifiers and
//! are attached by the services.

use super::catalog::{
    Category, CategoryId, Country, CountryId, Owner, OwnerId, Pokemon, PokemonId, Review,
    ReviewId, Reviewer, ReviewerId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    #[serde(default)]
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    #[serde(default)]
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    #[serde(default)]
    pub id: PokemonId,
    pub name: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(default)]
    pub id: ReviewId,
    pub title: String,
    pub text: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerDto {
    #[serde(default)]
    pub id: ReviewerId,
    pub first_name: String,
    pub last_name: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(value: CategoryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Country> for CountryDto {
    fn from(value: Country) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CountryDto> for Country {
    fn from(value: CountryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Owner> for OwnerDto {
    fn from(value: Owner) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

impl OwnerDto {
    /// Projects the payload onto an owner living in `country_id`.
    pub fn into_owner(self, country_id: CountryId) -> Owner {
        Owner {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            country_id,
        }
    }
}

impl From<Pokemon> for PokemonDto {
    fn from(value: Pokemon) -> Self {
        Self {
            id: value.id,
            name: value.name,
            birth_date: value.birth_date,
        }
    }
}

impl From<PokemonDto> for Pokemon {
    fn from(value: PokemonDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            birth_date: value.birth_date,
        }
    }
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            title: value.title,
            text: value.text,
            rating: value.rating,
        }
    }
}

impl ReviewDto {
    /// Projects the payload onto a review of `pokemon_id` by `reviewer_id`.
    pub fn into_review(self, pokemon_id: PokemonId, reviewer_id: ReviewerId) -> Review {
        Review {
            id: self.id,
            title: self.title,
            text: self.text,
            rating: self.rating,
            pokemon_id,
            reviewer_id,
        }
    }
}

impl From<Reviewer> for ReviewerDto {
    fn from(value: Reviewer) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

impl From<ReviewerDto> for Reviewer {
    fn from(value: ReviewerDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}
