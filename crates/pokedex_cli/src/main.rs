//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pokedex_core` and `pokedex_api` wiring against the configured store.
//! - Keep output deterministic for quick local sanity checks.

use pokedex_api::{ApiResponse, CatalogApi};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("pokedex_core ping={}", pokedex_core::ping());
    println!("pokedex_core version={}", pokedex_core::core_version());

    let api = match CatalogApi::from_env() {
        Ok(api) => api,
        Err(err) => {
            eprintln!("pokedex_cli config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("pokedex_api db_path={}", api.config().db_path.display());

    let counts = [
        ("categories", count(api.list_categories())),
        ("countries", count(api.list_countries())),
        ("owners", count(api.list_owners())),
        ("pokemon", count(api.list_pokemon())),
        ("reviewers", count(api.list_reviewers())),
        ("reviews", count(api.list_reviews())),
    ];

    let mut healthy = true;
    for (entity, result) in counts {
        match result {
            Ok(total) => println!("pokedex_api {entity}={total}"),
            Err(message) => {
                healthy = false;
                eprintln!("pokedex_api {entity} failed: {message}");
            }
        }
    }

    if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn count<T>(response: ApiResponse<Vec<T>>) -> Result<usize, String> {
    match response.body {
        Some(items) => Ok(items.len()),
        None => Err(response
            .message
            .unwrap_or_else(|| format!("status {}", response.status))),
    }
}
