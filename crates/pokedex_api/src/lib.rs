//! Transport-neutral request boundary for the Pokedex catalog.
//!
//! # Responsibility
//! - Expose one call per catalog operation with parsed identifiers and
//!   optional payloads.
//! - Run each call inside its own store session and map the outcome onto a
//!   status-coded [`ApiResponse`].
//!
//! # Invariants
//! - Calls never panic; every failure becomes a response status.
//! - No connection outlives the call that opened it.

use log::{info, warn};
use pokedex_core::db::open_db;
use pokedex_core::{init_logging, ServiceError, ServiceResult};
use rusqlite::Connection;
use std::time::Instant;

mod category;
pub mod config;
mod country;
mod owner;
mod pokemon;
pub mod response;
mod review;
mod reviewer;

pub use config::{ApiConfig, ConfigError};
pub use response::ApiResponse;

/// Catalog request boundary bound to one configuration.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    config: ApiConfig,
}

impl CatalogApi {
    /// Builds the boundary and starts file logging when a log dir is set.
    ///
    /// # Errors
    /// - [`ConfigError::Logging`] when the logger cannot start or conflicts
    ///   with an already active configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        if let Some(log_dir) = &config.log_dir {
            init_logging(config.log_level, &log_dir.to_string_lossy())
                .map_err(ConfigError::Logging)?;
        }
        Ok(Self { config })
    }

    /// Resolves configuration from the environment and builds the boundary.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Runs `op` against a fresh connection that is dropped on return.
    pub(crate) fn session<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&Connection) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let result = open_db(&self.config.db_path)
            .map_err(ServiceError::from)
            .and_then(|conn| op(&conn));
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => info!(
                "event=api_call module=api status=ok op={operation} duration_ms={duration_ms}"
            ),
            Err(err) => warn!(
                "event=api_call module=api status=error op={operation} code={} duration_ms={duration_ms}",
                err.status_code()
            ),
        }
        result
    }
}

/// Projects stored entities onto their external shape.
pub(crate) fn project<E, D: From<E>>(items: Vec<E>) -> Vec<D> {
    items.into_iter().map(D::from).collect()
}
