//! Reviewer use-case service.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{Review, Reviewer, ReviewerId};
use crate::model::dto::ReviewerDto;
use crate::repo::reviewer_repo::ReviewerRepository;
use log::{info, warn};

const ENTITY: &str = "Reviewer";

/// Reviewer service facade over a repository implementation.
pub struct ReviewerService<V: ReviewerRepository> {
    reviewers: V,
}

impl<V: ReviewerRepository> ReviewerService<V> {
    pub fn new(reviewers: V) -> Self {
        Self { reviewers }
    }

    pub fn list_reviewers(&self) -> ServiceResult<Vec<Reviewer>> {
        Ok(self.reviewers.list_reviewers()?)
    }

    pub fn get_reviewer(&self, id: ReviewerId) -> ServiceResult<Reviewer> {
        self.reviewers
            .get_reviewer(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub fn reviews_by_reviewer(&self, id: ReviewerId) -> ServiceResult<Vec<Review>> {
        if !self.reviewers.reviewer_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        Ok(self.reviewers.reviews_by_reviewer(id)?)
    }

    /// Creates a reviewer unless the trimmed, case-folded last name is taken.
    pub fn create_reviewer(&self, payload: ReviewerDto) -> ServiceResult<Reviewer> {
        let mut reviewer = Reviewer::from(payload);
        reviewer.validate()?;

        if self
            .reviewers
            .find_reviewer_by_last_name(&reviewer.last_name)?
            .is_some()
        {
            info!("event=reviewer_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.reviewers.create_reviewer(&mut reviewer)? {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=reviewer_create module=service status=ok reviewer_id={}",
            reviewer.id
        );
        Ok(reviewer)
    }

    pub fn update_reviewer(&self, id: ReviewerId, payload: ReviewerDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        if !self.reviewers.reviewer_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        let reviewer = Reviewer::from(payload);
        reviewer.validate()?;
        let applied = self.reviewers.update_reviewer(&reviewer)?;
        if !applied {
            warn!("event=reviewer_update module=service status=not_applied reviewer_id={id}");
        }
        Ok(applied)
    }

    /// Deletes a reviewer. Fails in the store while reviews still reference it.
    pub fn delete_reviewer(&self, id: ReviewerId) -> ServiceResult<bool> {
        let reviewer = self
            .reviewers
            .get_reviewer(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let applied = self.reviewers.delete_reviewer(&reviewer)?;
        if !applied {
            warn!("event=reviewer_delete module=service status=not_applied reviewer_id={id}");
        }
        Ok(applied)
    }
}
