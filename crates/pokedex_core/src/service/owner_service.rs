//! Owner use-case service.
//!
//! # Invariants
//! - An owner is only created inside an existing country.
//! - Updates keep the stored country; the payload carries names only.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{Country, CountryId, Owner, OwnerId, Pokemon};
use crate::model::dto::OwnerDto;
use crate::repo::country_repo::CountryRepository;
use crate::repo::owner_repo::OwnerRepository;
use log::{info, warn};

const ENTITY: &str = "Owner";

/// Owner service composing owner and country repositories.
pub struct OwnerService<O: OwnerRepository, C: CountryRepository> {
    owners: O,
    countries: C,
}

impl<O: OwnerRepository, C: CountryRepository> OwnerService<O, C> {
    pub fn new(owners: O, countries: C) -> Self {
        Self { owners, countries }
    }

    pub fn list_owners(&self) -> ServiceResult<Vec<Owner>> {
        Ok(self.owners.list_owners()?)
    }

    pub fn get_owner(&self, id: OwnerId) -> ServiceResult<Owner> {
        self.owners
            .get_owner(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub fn pokemon_of_owner(&self, id: OwnerId) -> ServiceResult<Vec<Pokemon>> {
        if !self.owners.owner_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        Ok(self.owners.pokemon_of_owner(id)?)
    }

    pub fn country_of_owner(&self, id: OwnerId) -> ServiceResult<Country> {
        self.countries
            .country_of_owner(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    /// Creates an owner living in `country_id`.
    ///
    /// Duplicate detection uses the trimmed, case-folded full name.
    pub fn create_owner(&self, country_id: CountryId, payload: OwnerDto) -> ServiceResult<Owner> {
        let mut owner = payload.into_owner(country_id);
        owner.validate()?;

        if self
            .owners
            .find_owner_by_name(&owner.first_name, &owner.last_name)?
            .is_some()
        {
            info!("event=owner_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.countries.country_exists(country_id)? {
            return Err(ServiceError::not_found("Country", country_id));
        }

        if !self.owners.create_owner(&mut owner)? {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=owner_create module=service status=ok owner_id={} country_id={}",
            owner.id, country_id
        );
        Ok(owner)
    }

    pub fn update_owner(&self, id: OwnerId, payload: OwnerDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        let stored = self
            .owners
            .get_owner(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let owner = payload.into_owner(stored.country_id);
        owner.validate()?;
        let applied = self.owners.update_owner(&owner)?;
        if !applied {
            warn!("event=owner_update module=service status=not_applied owner_id={id}");
        }
        Ok(applied)
    }

    /// Deletes an owner and its pokemon links; pokemon rows stay.
    pub fn delete_owner(&self, id: OwnerId) -> ServiceResult<bool> {
        let owner = self
            .owners
            .get_owner(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let applied = self.owners.delete_owner(&owner)?;
        if !applied {
            warn!("event=owner_delete module=service status=not_applied owner_id={id}");
        }
        Ok(applied)
    }
}
