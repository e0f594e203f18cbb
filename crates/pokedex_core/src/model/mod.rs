//! Catalog domain model.
//!
//! # Responsibility
//! - Define persisted entity shapes (`catalog`) and external shapes (`dto`).
//! - Keep natural-key normalization in one place.

pub mod catalog;
pub mod dto;
