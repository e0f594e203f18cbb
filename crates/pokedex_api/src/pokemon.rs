//! Pokemon endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::category_repo::SqliteCategoryRepository;
use pokedex_core::repo::owner_repo::SqliteOwnerRepository;
use pokedex_core::repo::pokemon_repo::SqlitePokemonRepository;
use pokedex_core::repo::review_repo::SqliteReviewRepository;
use pokedex_core::service::pokemon_service::PokemonService;
use pokedex_core::{CategoryId, OwnerDto, OwnerId, PokemonDto, PokemonId, ServiceResult};
use rusqlite::Connection;

type Service<'conn> = PokemonService<
    SqlitePokemonRepository<'conn>,
    SqliteOwnerRepository<'conn>,
    SqliteCategoryRepository<'conn>,
    SqliteReviewRepository<'conn>,
>;

fn service(conn: &Connection) -> ServiceResult<Service<'_>> {
    Ok(PokemonService::new(
        SqlitePokemonRepository::try_new(conn)?,
        SqliteOwnerRepository::try_new(conn)?,
        SqliteCategoryRepository::try_new(conn)?,
        SqliteReviewRepository::try_new(conn)?,
    ))
}

impl CatalogApi {
    pub fn list_pokemon(&self) -> ApiResponse<Vec<PokemonDto>> {
        ApiResponse::read(self.session("list_pokemon", |conn| {
            service(conn)?.list_pokemon().map(project)
        }))
    }

    pub fn get_pokemon(&self, id: PokemonId) -> ApiResponse<PokemonDto> {
        ApiResponse::read(self.session("get_pokemon", |conn| {
            service(conn)?.get_pokemon(id).map(PokemonDto::from)
        }))
    }

    /// Mean review rating; `0.0` for a pokemon without reviews.
    pub fn pokemon_rating(&self, id: PokemonId) -> ApiResponse<f64> {
        ApiResponse::read(self.session("pokemon_rating", |conn| {
            service(conn)?.pokemon_rating(id)
        }))
    }

    pub fn owners_of_pokemon(&self, id: PokemonId) -> ApiResponse<Vec<OwnerDto>> {
        ApiResponse::read(self.session("owners_of_pokemon", |conn| {
            service(conn)?.owners_of_pokemon(id).map(project)
        }))
    }

    /// Creates a pokemon owned by `owner_id` and filed under `category_id`.
    pub fn create_pokemon(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        payload: Option<PokemonDto>,
    ) -> ApiResponse<PokemonDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_pokemon", |conn| {
                service(conn)?
                    .create_pokemon(owner_id, category_id, payload)
                    .map(PokemonDto::from)
            })
        }))
    }

    pub fn update_pokemon(&self, id: PokemonId, payload: Option<PokemonDto>) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_pokemon", |conn| {
                service(conn)?.update_pokemon(id, payload)
            })
        }))
    }

    /// Deletes the pokemon's reviews, then the pokemon.
    pub fn delete_pokemon(&self, id: PokemonId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_pokemon", |conn| {
            service(conn)?.delete_pokemon(id)
        }))
    }
}
