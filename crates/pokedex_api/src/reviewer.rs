//! Reviewer endpoints.

use crate::response::{require_payload, ApiResponse};
use crate::{project, CatalogApi};
use pokedex_core::repo::reviewer_repo::SqliteReviewerRepository;
use pokedex_core::service::reviewer_service::ReviewerService;
use pokedex_core::{ReviewDto, ReviewerDto, ReviewerId, ServiceResult};
use rusqlite::Connection;

fn service(conn: &Connection) -> ServiceResult<ReviewerService<SqliteReviewerRepository<'_>>> {
    Ok(ReviewerService::new(SqliteReviewerRepository::try_new(conn)?))
}

impl CatalogApi {
    pub fn list_reviewers(&self) -> ApiResponse<Vec<ReviewerDto>> {
        ApiResponse::read(self.session("list_reviewers", |conn| {
            service(conn)?.list_reviewers().map(project)
        }))
    }

    pub fn get_reviewer(&self, id: ReviewerId) -> ApiResponse<ReviewerDto> {
        ApiResponse::read(self.session("get_reviewer", |conn| {
            service(conn)?.get_reviewer(id).map(ReviewerDto::from)
        }))
    }

    pub fn reviews_by_reviewer(&self, id: ReviewerId) -> ApiResponse<Vec<ReviewDto>> {
        ApiResponse::read(self.session("reviews_by_reviewer", |conn| {
            service(conn)?.reviews_by_reviewer(id).map(project)
        }))
    }

    pub fn create_reviewer(&self, payload: Option<ReviewerDto>) -> ApiResponse<ReviewerDto> {
        ApiResponse::created(require_payload(payload).and_then(|payload| {
            self.session("create_reviewer", |conn| {
                service(conn)?.create_reviewer(payload).map(ReviewerDto::from)
            })
        }))
    }

    pub fn update_reviewer(
        &self,
        id: ReviewerId,
        payload: Option<ReviewerDto>,
    ) -> ApiResponse<bool> {
        ApiResponse::updated(require_payload(payload).and_then(|payload| {
            self.session("update_reviewer", |conn| {
                service(conn)?.update_reviewer(id, payload)
            })
        }))
    }

    pub fn delete_reviewer(&self, id: ReviewerId) -> ApiResponse<()> {
        ApiResponse::deleted(self.session("delete_reviewer", |conn| {
            service(conn)?.delete_reviewer(id)
        }))
    }
}
