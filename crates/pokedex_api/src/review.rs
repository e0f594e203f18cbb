//! Review endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::pokemon_repo::SqlitePokemonRepository;
use pokedex_core::repo::review_repo::SqliteReviewRepository;
use pokedex_core::repo::reviewer_repo::SqliteReviewerRepository;
use pokedex_core::service::review_service::ReviewService;
use pokedex_core::{PokemonId, ReviewDto, ReviewId, ReviewerId, ServiceResult};
use rusqlite::Connection;

type Service<'conn> = ReviewService<
    SqliteReviewRepository<'conn>,
    SqlitePokemonRepository<'conn>,
    SqliteReviewerRepository<'conn>,
>;

fn service(conn: &Connection) -> ServiceResult<Service<'_>> {
    Ok(ReviewService::new(
        SqliteReviewRepository::try_new(conn)?,
        SqlitePokemonRepository::try_new(conn)?,
        SqliteReviewerRepository::try_new(conn)?,
    ))
}

impl CatalogApi {
    pub fn list_reviews(&self) -> ApiResponse<Vec<ReviewDto>> {
        ApiResponse::read(self.session("list_reviews", |conn| {
            service(conn)?.list_reviews().map(project)
        }))
    }

    pub fn get_review(&self, id: ReviewId) -> ApiResponse<ReviewDto> {
        ApiResponse::read(self.session("get_review", |conn| {
            service(conn)?.get_review(id).map(ReviewDto::from)
        }))
    }

    pub fn reviews_of_pokemon(&self, pokemon_id: PokemonId) -> ApiResponse<Vec<ReviewDto>> {
        ApiResponse::read(self.session("reviews_of_pokemon", |conn| {
            service(conn)?.reviews_of_pokemon(pokemon_id).map(project)
        }))
    }

    /// Creates a review of `pokemon_id` written by `reviewer_id`.
    pub fn create_review(
        &self,
        pokemon_id: PokemonId,
        reviewer_id: ReviewerId,
        payload: Option<ReviewDto>,
    ) -> ApiResponse<ReviewDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_review", |conn| {
                service(conn)?
                    .create_review(pokemon_id, reviewer_id, payload)
                    .map(ReviewDto::from)
            })
        }))
    }

    pub fn update_review(&self, id: ReviewId, payload: Option<ReviewDto>) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_review", |conn| {
                service(conn)?.update_review(id, payload)
            })
        }))
    }

    pub fn delete_review(&self, id: ReviewId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_review", |conn| {
            service(conn)?.delete_review(id)
        }))
    }
}
