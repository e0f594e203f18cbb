//! Category endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::category_repo::SqliteCategoryRepository;
use pokedex_core::service::category_service::CategoryService;
use pokedex_core::{CategoryDto, CategoryId, PokemonDto, ServiceResult};
use rusqlite::Connection;

fn service(conn: &Connection) -> ServiceResult<CategoryService<SqliteCategoryRepository<'_>>> {
    Ok(CategoryService::new(SqliteCategoryRepository::try_new(conn)?))
}

impl CatalogApi {
    pub fn list_categories(&self) -> ApiResponse<Vec<CategoryDto>> {
        ApiResponse::read(self.session("list_categories", |conn| {
            service(conn)?.list_categories().map(project)
        }))
    }

    pub fn get_category(&self, id: CategoryId) -> ApiResponse<CategoryDto> {
        ApiResponse::read(self.session("get_category", |conn| {
            service(conn)?.get_category(id).map(CategoryDto::from)
        }))
    }

    pub fn pokemon_by_category(&self, id: CategoryId) -> ApiResponse<Vec<PokemonDto>> {
        ApiResponse::read(self.session("pokemon_by_category", |conn| {
            service(conn)?.pokemon_by_category(id).map(project)
        }))
    }

    pub fn create_category(&self, payload: Option<CategoryDto>) -> ApiResponse<CategoryDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_category", |conn| {
                service(conn)?
                    .create_category(payload)
                    .map(CategoryDto::from)
            })
        }))
    }

    pub fn update_category(
        &self,
        id: CategoryId,
        payload: Option<CategoryDto>,
    ) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_category", |conn| {
                service(conn)?.update_category(id, payload)
            })
        }))
    }

    pub fn delete_category(&self, id: CategoryId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_category", |conn| {
            service(conn)?.delete_category(id)
        }))
    }
}
