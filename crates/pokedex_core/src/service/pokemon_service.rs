//! Pokemon use-case service.
//!
//! # Responsibility
//! - Create pokemon already linked to one owner and one category.
//! - Delete pokemon after clearing the reviews that reference them.
//!
//! # Invariants
//! - Deletion is best-effort across two commits: reviews first, then the
//!   pokemon. Both are attempted even when the first reports no change, and
//!   nothing is rolled back if the second fails.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{CategoryId, Owner, OwnerId, Pokemon, PokemonId};
use crate::model::dto::PokemonDto;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::owner_repo::OwnerRepository;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::repo::review_repo::ReviewRepository;
use log::{info, warn};

const ENTITY: &str = "Pokemon";

/// What a pokemon deletion actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokemonDeletion {
    /// Number of reviews that referenced the pokemon before deletion.
    pub review_count: usize,
    /// Batch review delete reported success (trivially true with no reviews).
    pub reviews_deleted: bool,
    /// Pokemon row delete reported success.
    pub pokemon_deleted: bool,
}

/// Pokemon service composing pokemon, owner, category and review repositories.
pub struct PokemonService<P, O, C, R>
where
    P: PokemonRepository,
    O: OwnerRepository,
    C: CategoryRepository,
    R: ReviewRepository,
{
    pokemon: P,
    owners: O,
    categories: C,
    reviews: R,
}

impl<P, O, C, R> PokemonService<P, O, C, R>
where
    P: PokemonRepository,
    O: OwnerRepository,
    C: CategoryRepository,
    R: ReviewRepository,
{
    pub fn new(pokemon: P, owners: O, categories: C, reviews: R) -> Self {
        Self {
            pokemon,
            owners,
            categories,
            reviews,
        }
    }

    pub fn list_pokemon(&self) -> ServiceResult<Vec<Pokemon>> {
        Ok(self.pokemon.list_pokemon()?)
    }

    pub fn get_pokemon(&self, id: PokemonId) -> ServiceResult<Pokemon> {
        self.pokemon
            .get_pokemon(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// Mean review rating of a pokemon, `0.0` when it has no reviews.
    pub fn pokemon_rating(&self, id: PokemonId) -> ServiceResult<f64> {
        self.ensure_exists(id)?;
        Ok(self.pokemon.pokemon_rating(id)?)
    }

    pub fn owners_of_pokemon(&self, id: PokemonId) -> ServiceResult<Vec<Owner>> {
        self.ensure_exists(id)?;
        Ok(self.owners.owners_of_pokemon(id)?)
    }

    /// Creates a pokemon owned by `owner_id` and filed under `category_id`.
    pub fn create_pokemon(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        payload: PokemonDto,
    ) -> ServiceResult<Pokemon> {
        let mut pokemon = Pokemon::from(payload);
        pokemon.validate()?;

        if self.pokemon.find_pokemon_by_name(&pokemon.name)?.is_some() {
            info!("event=pokemon_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.owners.owner_exists(owner_id)? {
            return Err(ServiceError::not_found("Owner", owner_id));
        }
        if !self.categories.category_exists(category_id)? {
            return Err(ServiceError::not_found("Category", category_id));
        }

        if !self
            .pokemon
            .create_pokemon(owner_id, category_id, &mut pokemon)?
        {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=pokemon_create module=service status=ok pokemon_id={} owner_id={} category_id={}",
            pokemon.id, owner_id, category_id
        );
        Ok(pokemon)
    }

    /// Replaces name and birth date; owner/category links are untouched.
    pub fn update_pokemon(&self, id: PokemonId, payload: PokemonDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        self.ensure_exists(id)?;

        let pokemon = Pokemon::from(payload);
        pokemon.validate()?;
        let applied = self.pokemon.update_pokemon(&pokemon)?;
        if !applied {
            warn!("event=pokemon_update module=service status=not_applied pokemon_id={id}");
        }
        Ok(applied)
    }

    /// Deletes every review of the pokemon, then the pokemon itself.
    pub fn delete_pokemon(&self, id: PokemonId) -> ServiceResult<PokemonDeletion> {
        let pokemon = self
            .pokemon
            .get_pokemon(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;
        let reviews = self.reviews.reviews_of_pokemon(id)?;

        let reviews_deleted = self.reviews.delete_reviews(&reviews)?;
        if !reviews_deleted {
            warn!(
                "event=pokemon_delete module=service status=reviews_not_deleted pokemon_id={id} review_count={}",
                reviews.len()
            );
        }

        let pokemon_deleted = self.pokemon.delete_pokemon(&pokemon)?;
        if !pokemon_deleted {
            warn!("event=pokemon_delete module=service status=not_applied pokemon_id={id}");
        }

        info!(
            "event=pokemon_delete module=service status=done pokemon_id={id} review_count={} reviews_deleted={reviews_deleted} pokemon_deleted={pokemon_deleted}",
            reviews.len()
        );
        Ok(PokemonDeletion {
            review_count: reviews.len(),
            reviews_deleted,
            pokemon_deleted,
        })
    }

    fn ensure_exists(&self, id: PokemonId) -> ServiceResult<()> {
        if !self.pokemon.pokemon_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
