//! Catalog use-case services.
//!
//! # Responsibility
//! - Enforce per-operation preconditions (existence, natural-key uniqueness,
//!   identity agreement) before delegating to repositories.
//! - Compose multi-entity writes (owner→country, pokemon→owner/category,
//!   review→pokemon/reviewer, pokemon deletion clearing its reviews).
//!
//! # Invariants
//! - `NotFound` and `Duplicate` are decided before any mutation.
//! - Update/delete report a store-side "nothing changed" as `Ok(false)`;
//!   callers still answer success.
//! - Services stay storage-agnostic; they only see repository traits.
//! - Natural-key uniqueness is check-then-insert against non-unique indexes;
//!   concurrent creates of the same key are not serialized.

use crate::model::catalog::ModelValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_service;
pub mod country_service;
pub mod owner_service;
pub mod pokemon_service;
pub mod review_service;
pub mod reviewer_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing failure taxonomy for catalog operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or missing input, or path/payload identity mismatch.
    InvalidRequest(String),
    /// Target (or referenced) identity does not resolve.
    NotFound { entity: &'static str, id: i64 },
    /// Natural key already taken by another row.
    Duplicate { entity: &'static str },
    /// Store accepted the call but reported that nothing was written.
    PersistenceFailed {
        entity: &'static str,
        operation: &'static str,
    },
    /// Store could not execute the operation.
    Repo(RepoError),
}

impl ServiceError {
    /// HTTP-equivalent status used at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Duplicate { .. } => 422,
            Self::PersistenceFailed { .. } => 500,
            Self::Repo(_) => 500,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "invalid request: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Duplicate { entity } => write!(f, "{entity} already exists"),
            Self::PersistenceFailed { entity, operation } => {
                write!(f, "Something went wrong while saving ({entity} {operation})")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidRequest(err.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}

impl From<crate::db::DbError> for ServiceError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Rejects updates whose path identity disagrees with the payload identity.
pub(crate) fn ensure_same_id(path_id: i64, payload_id: i64) -> ServiceResult<()> {
    if path_id != payload_id {
        return Err(ServiceError::InvalidRequest(format!(
            "path id {path_id} does not match payload id {payload_id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_same_id, ServiceError};
    use crate::model::catalog::ModelValidationError;

    #[test]
    fn status_codes_follow_signal_contract() {
        assert_eq!(ServiceError::InvalidRequest(String::new()).status_code(), 400);
        assert_eq!(ServiceError::not_found("Country", 1).status_code(), 404);
        assert_eq!(ServiceError::Duplicate { entity: "Country" }.status_code(), 422);
        assert_eq!(
            ServiceError::PersistenceFailed {
                entity: "Country",
                operation: "create"
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn duplicate_message_names_entity() {
        let err = ServiceError::Duplicate { entity: "Pokemon" };
        assert_eq!(err.to_string(), "Pokemon already exists");
    }

    #[test]
    fn validation_errors_become_invalid_request() {
        let err = ServiceError::from(ModelValidationError::BlankField {
            entity: "country",
            field: "name",
        });
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn mismatched_ids_are_rejected() {
        assert!(ensure_same_id(3, 3).is_ok());
        let err = ensure_same_id(3, 4).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }
}
