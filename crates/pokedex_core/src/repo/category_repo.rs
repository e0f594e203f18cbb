//! Category repository.
//!
//! # Invariants
//! - `pokemon_by_category` follows `pokemon_categories` join rows only.
//! - Deleting a category removes its join rows, never the pokemon.

use super::pokemon_repo::parse_pokemon_row;
use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{natural_key, Category, CategoryId, Pokemon};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name FROM categories";

/// Repository interface for categories.
pub trait CategoryRepository {
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn category_exists(&self, id: CategoryId) -> RepoResult<bool>;
    /// Looks a category up by natural key (trimmed, case-folded name).
    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
    /// Inserts and writes the assigned id back on success.
    fn create_category(&self, category: &mut Category) -> RepoResult<bool>;
    fn update_category(&self, category: &Category) -> RepoResult<bool>;
    fn delete_category(&self, category: &Category) -> RepoResult<bool>;
    fn pokemon_by_category(&self, id: CategoryId) -> RepoResult<Vec<Pokemon>>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY id ASC;"))?;
        let categories = stmt
            .query_map([], parse_category_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_category_row,
            )
            .optional()?;
        Ok(category)
    }

    fn category_exists(&self, id: CategoryId) -> RepoResult<bool> {
        row_exists(self.conn, "categories", id)
    }

    fn find_category_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("{CATEGORY_SELECT_SQL} WHERE name_key = ?1 ORDER BY id ASC LIMIT 1;"),
                [natural_key(name)],
                parse_category_row,
            )
            .optional()?;
        Ok(category)
    }

    fn create_category(&self, category: &mut Category) -> RepoResult<bool> {
        category.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO categories (name, name_key) VALUES (?1, ?2);",
            params![category.name, category.natural_key()],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        category.id = self.conn.last_insert_rowid();
        Ok(true)
    }

    fn update_category(&self, category: &Category) -> RepoResult<bool> {
        category.validate()?;

        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1, name_key = ?2 WHERE id = ?3;",
            params![category.name, category.natural_key(), category.id],
        )?;
        Ok(changed > 0)
    }

    fn delete_category(&self, category: &Category) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [category.id])?;
        Ok(removed > 0)
    }

    fn pokemon_by_category(&self, id: CategoryId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id AS id, p.name AS name, p.birth_date AS birth_date
             FROM pokemon p
             INNER JOIN pokemon_categories pc ON pc.pokemon_id = p.id
             WHERE pc.category_id = ?1
             ORDER BY p.id ASC;",
        )?;
        let pokemon = stmt
            .query_map([id], parse_pokemon_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pokemon)
    }
}

fn parse_category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
