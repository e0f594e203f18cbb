//! Core catalog logic for the Pokedex backend.
//! This crate owns storage, natural-key rules and cross-entity invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{
    natural_key, owner_key, Category, CategoryId, Country, CountryId, ModelValidationError,
    Owner, OwnerId, Pokemon, PokemonId, Review, ReviewId, Reviewer, ReviewerId,
};
pub use model::dto::{CategoryDto, CountryDto, OwnerDto, PokemonDto, ReviewDto, ReviewerDto};
pub use repo::{RepoError, RepoResult};
pub use service::pokemon_service::PokemonDeletion;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
