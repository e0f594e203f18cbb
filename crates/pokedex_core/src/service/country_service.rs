//! Country use-case service.

use super::{ensure_same_id, ServiceError, ServiceResult};
use crate::model::catalog::{Country, CountryId, Owner};
use crate::model::dto::CountryDto;
use crate::repo::country_repo::CountryRepository;
use log::{info, warn};

const ENTITY: &str = "Country";

/// Country service facade over a repository implementation.
pub struct CountryService<R: CountryRepository> {
    countries: R,
}

impl<R: CountryRepository> CountryService<R> {
    pub fn new(countries: R) -> Self {
        Self { countries }
    }

    pub fn list_countries(&self) -> ServiceResult<Vec<Country>> {
        Ok(self.countries.list_countries()?)
    }

    pub fn get_country(&self, id: CountryId) -> ServiceResult<Country> {
        self.countries
            .get_country(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))
    }

    pub fn owners_of_country(&self, id: CountryId) -> ServiceResult<Vec<Owner>> {
        if !self.countries.country_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        Ok(self.countries.owners_of_country(id)?)
    }

    pub fn create_country(&self, payload: CountryDto) -> ServiceResult<Country> {
        let mut country = Country::from(payload);
        country.validate()?;

        if self.countries.find_country_by_name(&country.name)?.is_some() {
            info!("event=country_create module=service status=duplicate");
            return Err(ServiceError::Duplicate { entity: ENTITY });
        }

        if !self.countries.create_country(&mut country)? {
            return Err(ServiceError::PersistenceFailed {
                entity: ENTITY,
                operation: "create",
            });
        }

        info!(
            "event=country_create module=service status=ok country_id={}",
            country.id
        );
        Ok(country)
    }

    pub fn update_country(&self, id: CountryId, payload: CountryDto) -> ServiceResult<bool> {
        ensure_same_id(id, payload.id)?;
        if !self.countries.country_exists(id)? {
            return Err(ServiceError::not_found(ENTITY, id));
        }

        let country = Country::from(payload);
        country.validate()?;
        let applied = self.countries.update_country(&country)?;
        if !applied {
            warn!("event=country_update module=service status=not_applied country_id={id}");
        }
        Ok(applied)
    }

    /// Deletes a country. Fails in the store while owners still reference it.
    pub fn delete_country(&self, id: CountryId) -> ServiceResult<bool> {
        let country = self
            .countries
            .get_country(id)?
            .ok_or(ServiceError::not_found(ENTITY, id))?;

        let applied = self.countries.delete_country(&country)?;
        if !applied {
            warn!("event=country_delete module=service status=not_applied country_id={id}");
        }
        Ok(applied)
    }
}
