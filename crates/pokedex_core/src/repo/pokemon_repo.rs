//! Pokemon repository.
//!
//! # Responsibility
//! - Persist pokemon rows together with their owner/category join rows.
//! - Answer rating aggregation over the pokemon's reviews.
//!
//! # Invariants
//! - `create_pokemon` writes the pokemon row and both join rows in one
//!   transaction; either all three land or none.
//! - Deleting a pokemon that still has reviews fails in the store; callers
//!   clear reviews first.

use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{natural_key, CategoryId, OwnerId, Pokemon, PokemonId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const POKEMON_SELECT_SQL: &str = "SELECT id, name, birth_date FROM pokemon";

/// Repository interface for pokemon.
pub trait PokemonRepository {
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>>;
    fn get_pokemon(&self, id: PokemonId) -> RepoResult<Option<Pokemon>>;
    fn pokemon_exists(&self, id: PokemonId) -> RepoResult<bool>;
    fn find_pokemon_by_name(&self, name: &str) -> RepoResult<Option<Pokemon>>;
    /// Inserts the pokemon and links it to one owner and one category.
    fn create_pokemon(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        pokemon: &mut Pokemon,
    ) -> RepoResult<bool>;
    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<bool>;
    fn delete_pokemon(&self, pokemon: &Pokemon) -> RepoResult<bool>;
    /// Mean review rating; `0.0` when the pokemon has no reviews.
    fn pokemon_rating(&self, id: PokemonId) -> RepoResult<f64>;
}

/// SQLite-backed pokemon repository.
pub struct SqlitePokemonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePokemonRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PokemonRepository for SqlitePokemonRepository<'_> {
    fn list_pokemon(&self) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POKEMON_SELECT_SQL} ORDER BY id ASC;"))?;
        let pokemon = stmt
            .query_map([], parse_pokemon_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pokemon)
    }

    fn get_pokemon(&self, id: PokemonId) -> RepoResult<Option<Pokemon>> {
        let pokemon = self
            .conn
            .query_row(
                &format!("{POKEMON_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_pokemon_row,
            )
            .optional()?;
        Ok(pokemon)
    }

    fn pokemon_exists(&self, id: PokemonId) -> RepoResult<bool> {
        row_exists(self.conn, "pokemon", id)
    }

    fn find_pokemon_by_name(&self, name: &str) -> RepoResult<Option<Pokemon>> {
        let pokemon = self
            .conn
            .query_row(
                &format!("{POKEMON_SELECT_SQL} WHERE name_key = ?1 ORDER BY id ASC LIMIT 1;"),
                [natural_key(name)],
                parse_pokemon_row,
            )
            .optional()?;
        Ok(pokemon)
    }

    fn create_pokemon(
        &self,
        owner_id: OwnerId,
        category_id: CategoryId,
        pokemon: &mut Pokemon,
    ) -> RepoResult<bool> {
        pokemon.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO pokemon (name, name_key, birth_date) VALUES (?1, ?2, ?3);",
            params![pokemon.name, pokemon.natural_key(), pokemon.birth_date],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        let pokemon_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO pokemon_owners (pokemon_id, owner_id) VALUES (?1, ?2);",
            params![pokemon_id, owner_id],
        )?;
        tx.execute(
            "INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES (?1, ?2);",
            params![pokemon_id, category_id],
        )?;
        tx.commit()?;

        pokemon.id = pokemon_id;
        Ok(true)
    }

    fn update_pokemon(&self, pokemon: &Pokemon) -> RepoResult<bool> {
        pokemon.validate()?;

        let changed = self.conn.execute(
            "UPDATE pokemon SET name = ?1, name_key = ?2, birth_date = ?3 WHERE id = ?4;",
            params![
                pokemon.name,
                pokemon.natural_key(),
                pokemon.birth_date,
                pokemon.id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_pokemon(&self, pokemon: &Pokemon) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM pokemon WHERE id = ?1;", [pokemon.id])?;
        Ok(removed > 0)
    }

    fn pokemon_rating(&self, id: PokemonId) -> RepoResult<f64> {
        let average: Option<f64> = self.conn.query_row(
            "SELECT AVG(rating) FROM reviews WHERE pokemon_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(average.unwrap_or(0.0))
    }
}

pub(crate) fn parse_pokemon_row(row: &Row<'_>) -> rusqlite::Result<Pokemon> {
    Ok(Pokemon {
        id: row.get("id")?,
        name: row.get("name")?,
        birth_date: row.get("birth_date")?,
    })
}
