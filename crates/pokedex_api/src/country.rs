//! Country endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::country_repo::SqliteCountryRepository;
use pokedex_core::service::country_service::CountryService;
use pokedex_core::{CountryDto, CountryId, OwnerDto, ServiceResult};
use rusqlite::Connection;

fn service(conn: &Connection) -> ServiceResult<CountryService<SqliteCountryRepository<'_>>> {
    Ok(CountryService::new(SqliteCountryRepository::try_new(conn)?))
}

impl CatalogApi {
    pub fn list_countries(&self) -> ApiResponse<Vec<CountryDto>> {
        ApiResponse::read(self.session("list_countries", |conn| {
            service(conn)?.list_countries().map(project)
        }))
    }

    pub fn get_country(&self, id: CountryId) -> ApiResponse<CountryDto> {
        ApiResponse::read(self.session("get_country", |conn| {
            service(conn)?.get_country(id).map(CountryDto::from)
        }))
    }

    pub fn owners_of_country(&self, id: CountryId) -> ApiResponse<Vec<OwnerDto>> {
        ApiResponse::read(self.session("owners_of_country", |conn| {
            service(conn)?.owners_of_country(id).map(project)
        }))
    }

    pub fn create_country(&self, payload: Option<CountryDto>) -> ApiResponse<CountryDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_country", |conn| {
                service(conn)?.create_country(payload).map(CountryDto::from)
            })
        }))
    }

    pub fn update_country(&self, id: CountryId, payload: Option<CountryDto>) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_country", |conn| {
                service(conn)?.update_country(id, payload)
            })
        }))
    }

    pub fn delete_country(&self, id: CountryId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_country", |conn| {
            service(conn)?.delete_country(id)
        }))
    }
}
