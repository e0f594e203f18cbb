//! Review use-case service.
//!
//! # Invariants
//! - Review titles are unique across all pokemon.
//! - A review is only created against an existing pokemon and reviewer, and
//!   keeps both references across updates.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{PokemonId, Review, ReviewId, ReviewerId};
use crate::model::dto::ReviewDto;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::repo::review_repo::ReviewRepository;
use crate::repo::reviewer_repo::ReviewerRepository;
use log::{info, warn};

const ENTITY: &str = "Review";

/// Review service composing review, pokemon and reviewer repositories.
pub struct ReviewService<R, P, V>
where
    R: ReviewRepository,
    P: PokemonRepository,
    V: ReviewerRepository,
{
    reviews: R,
    pokemon: P,
    reviewers: V,
}

impl<R, P, V> ReviewService<R, P, V>
where
    R: ReviewRepository,
    P: PokemonRepository,
    V: ReviewerRepository,
{
    pub fn new(reviews: R, pokemon: P, reviewers: V) -> Self {
        Self {
            reviews,
            pokemon,
            reviewers,
        }
    }

    pub fn list_reviews(&self) -> ServiceResult<Vec<Review>> {
        Ok(self.reviews.list_reviews()?)
    }

    pub fn get_review(&self, id: ReviewId) -> ServiceResult<Review> {
        self.reviews
            .get_review(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub fn reviews_of_pokemon(&self, pokemon_id: PokemonId) -> ServiceResult<Vec<Review>> {
        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(ServiceError::not_found("Pokemon", pokemon_id));
        }
        Ok(self.reviews.reviews_of_pokemon(pokemon_id)?)
    }

    /// Creates a review of `pokemon_id` written by `reviewer_id`.
    pub fn create_review(
        &self,
        pokemon_id: PokemonId,
        reviewer_id: ReviewerId,
        payload: ReviewDto,
    ) -> ServiceResult<Review> {
        let mut review = payload.into_review(pokemon_id, reviewer_id);
        review.validate()?;

        if self.reviews.find_review_by_title(&review.title)?.is_some() {
            info!("event=review_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.pokemon.pokemon_exists(pokemon_id)? {
            return Err(ServiceError::not_found("Pokemon", pokemon_id));
        }
        if !self.reviewers.reviewer_exists(reviewer_id)? {
            return Err(ServiceError::not_found("Reviewer", reviewer_id));
        }

        if !self.reviews.create_review(&mut review)? {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=review_create module=service status=ok review_id={} pokemon_id={} reviewer_id={}",
            review.id, pokemon_id, reviewer_id
        );
        Ok(review)
    }

    pub fn update_review(&self, id: ReviewId, payload: ReviewDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        let stored = self
            .reviews
            .get_review(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let review = payload.into_review(stored.pokemon_id, stored.reviewer_id);
        review.validate()?;
        let applied = self.reviews.update_review(&review)?;
        if !applied {
            warn!("event=review_update module=service status=not_applied review_id={id}");
        }
        Ok(applied)
    }

    pub fn delete_review(&self, id: ReviewId) -> ServiceResult<bool> {
        let review = self
            .reviews
            .get_review(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let applied = self.reviews.delete_review(&review)?;
        if !applied {
            warn!("event=review_delete module=service status=not_applied review_id={id}");
        }
        Ok(applied)
    }
}
