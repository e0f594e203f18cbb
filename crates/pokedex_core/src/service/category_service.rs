//! Category use-case service.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{Category, CategoryId, Pokemon};
use crate::model::dto::CategoryDto;
use crate::repo::category_repo::CategoryRepository;
use log::{info, warn};

const ENTITY: &str = "Category";

/// Category service facade over a repository implementation.
pub struct CategoryService<R: CategoryRepository> {
    categories: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(categories: R) -> Self {
        Self { categories }
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.list_categories()?)
    }

    pub fn get_category(&self, id: CategoryId) -> ServiceResult<Category> {
        self.categories
            .get_category(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub fn pokemon_by_category(&self, id: CategoryId) -> ServiceResult<Vec<Pokemon>> {
        if !self.categories.category_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        Ok(self.categories.pokemon_by_category(id)?)
    }

    /// Creates a category unless its trimmed, case-folded name is taken.
    pub fn create_category(&self, payload: CategoryDto) -> ServiceResult<Category> {
        let mut category = Category::from(payload);
        category.validate()?;

        if self
            .categories
            .find_category_by_name(&category.name)?
            .is_some()
        {
            info!("event=category_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.categories.create_category(&mut category)? {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=category_create module=service status=ok category_id={}",
            category.id
        );
        Ok(category)
    }

    /// Replaces a category; `Ok(false)` when the store reported no change.
    pub fn update_category(&self, id: CategoryId, payload: CategoryDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        if !self.categories.category_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        let category = Category::from(payload);
        category.validate()?;
        let applied = self.categories.update_category(&category)?;
        if !applied {
            warn!("event=category_update module=service status=not_applied category_id={id}");
        }
        Ok(applied)
    }

    /// Deletes a category and its pokemon links; pokemon rows stay.
    pub fn delete_category(&self, id: CategoryId) -> ServiceResult<bool> {
        let category = self
            .categories
            .get_category(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let applied = self.categories.delete_category(&category)?;
        if !applied {
            warn!("event=category_delete module=service status=not_applied category_id={id}");
        }
        Ok(applied)
    }
}
