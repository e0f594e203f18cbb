//! Owner endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::country_repo::SqliteCountryRepository;
use pokedex_core::repo::owner_repo::SqliteOwnerRepository;
use pokedex_core::service::owner_service::OwnerService;
use pokedex_core::{CountryDto, CountryId, OwnerDto, OwnerId, PokemonDto, ServiceResult};
use rusqlite::Connection;

type Service<'conn> = OwnerService<SqliteOwnerRepository<'conn>, SqliteCountryRepository<'conn>>;

fn service(conn: &Connection) -> ServiceResult<Service<'_>> {
    Ok(OwnerService::new(
        SqliteOwnerRepository::try_new(conn)?,
        SqliteCountryRepository::try_new(conn)?,
    ))
}

impl CatalogApi {
    pub fn list_owners(&self) -> ApiResponse<Vec<OwnerDto>> {
        ApiResponse::read(self.session("list_owners", |conn| {
            service(conn)?.list_owners().map(project)
        }))
    }

    pub fn get_owner(&self, id: OwnerId) -> ApiResponse<OwnerDto> {
        ApiResponse::read(self.session("get_owner", |conn| {
            service(conn)?.get_owner(id).map(OwnerDto::from)
        }))
    }

    pub fn pokemon_of_owner(&self, id: OwnerId) -> ApiResponse<Vec<PokemonDto>> {
        ApiResponse::read(self.session("pokemon_of_owner", |conn| {
            service(conn)?.pokemon_of_owner(id).map(project)
        }))
    }

    pub fn country_of_owner(&self, id: OwnerId) -> ApiResponse<CountryDto> {
        ApiResponse::read(self.session("country_of_owner", |conn| {
            service(conn)?.country_of_owner(id).map(CountryDto::from)
        }))
    }

    /// Creates an owner living in `country_id`.
    pub fn create_owner(
        &self,
        country_id: CountryId,
        payload: Option<OwnerDto>,
    ) -> ApiResponse<OwnerDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_owner", |conn| {
                service(conn)?
                    .create_owner(country_id, payload)
                    .map(OwnerDto::from)
            })
        }))
    }

    pub fn update_owner(&self, id: OwnerId, payload: Option<OwnerDto>) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_owner", |conn| service(conn)?.update_owner(id, payload))
        }))
    }

    pub fn delete_owner(&self, id: OwnerId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_owner", |conn| {
            service(conn)?.delete_owner(id)
        }))
    }
}
