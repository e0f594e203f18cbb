//! Owner repository.
//!
//! # Invariants
//! - Owner natural key is the concatenated full name.
//! - `pokemon_of_owner`/`owners_of_pokemon` follow `pokemon_owners` rows only.

use super::pokemon_repo::parse_pokemon_row;
use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{owner_key, Owner, OwnerId, Pokemon, PokemonId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const OWNER_SELECT_SQL: &str = "SELECT id, first_name, last_name, country_id FROM owners";

/// Repository interface for owners.
pub trait OwnerRepository {
    fn list_owners(&self) -> RepoResult<Vec<Owner>>;
    fn get_owner(&self, id: OwnerId) -> RepoResult<Option<Owner>>;
    fn owner_exists(&self, id: OwnerId) -> RepoResult<bool>;
    /// Looks an owner up by the natural key of `first_name + last_name`.
    fn find_owner_by_name(&self, first_name: &str, last_name: &str)
        -> RepoResult<Option<Owner>>;
    fn create_owner(&self, owner: &mut Owner) -> RepoResult<bool>;
    fn update_owner(&self, owner: &Owner) -> RepoResult<bool>;
    fn delete_owner(&self, owner: &Owner) -> RepoResult<bool>;
    fn pokemon_of_owner(&self, id: OwnerId) -> RepoResult<Vec<Pokemon>>;
    fn owners_of_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Owner>>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn list_owners(&self) -> RepoResult<Vec<Owner>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OWNER_SELECT_SQL} ORDER BY id ASC;"))?;
        let owners = stmt
            .query_map([], parse_owner_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(owners)
    }

    fn get_owner(&self, id: OwnerId) -> RepoResult<Option<Owner>> {
        let owner = self
            .conn
            .query_row(
                &format!("{OWNER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_owner_row,
            )
            .optional()?;
        Ok(owner)
    }

    fn owner_exists(&self, id: OwnerId) -> RepoResult<bool> {
        row_exists(self.conn, "owners", id)
    }

    fn find_owner_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<Owner>> {
        let owner = self
            .conn
            .query_row(
                &format!("{OWNER_SELECT_SQL} WHERE name_key = ?1 ORDER BY id ASC LIMIT 1;"),
                [owner_key(first_name, last_name)],
                parse_owner_row,
            )
            .optional()?;
        Ok(owner)
    }

    fn create_owner(&self, owner: &mut Owner) -> RepoResult<bool> {
        owner.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO owners (first_name, last_name, name_key, country_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                owner.first_name,
                owner.last_name,
                owner.natural_key(),
                owner.country_id,
            ],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        owner.id = self.conn.last_insert_rowid();
        Ok(true)
    }

    fn update_owner(&self, owner: &Owner) -> RepoResult<bool> {
        owner.validate()?;

        let changed = self.conn.execute(
            "UPDATE owners
             SET
                first_name = ?1,
                last_name = ?2,
                name_key = ?3,
                country_id = ?4
             WHERE id = ?5;",
            params![
                owner.first_name,
                owner.last_name,
                owner.natural_key(),
                owner.country_id,
                owner.id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_owner(&self, owner: &Owner) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM owners WHERE id = ?1;", [owner.id])?;
        Ok(removed > 0)
    }

    fn pokemon_of_owner(&self, id: OwnerId) -> RepoResult<Vec<Pokemon>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id AS id, p.name AS name, p.birth_date AS birth_date
             FROM pokemon p
             INNER JOIN pokemon_owners po ON po.pokemon_id = p.id
             WHERE po.owner_id = ?1
             ORDER BY p.id ASC;",
        )?;
        let pokemon = stmt
            .query_map([id], parse_pokemon_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pokemon)
    }

    fn owners_of_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                o.id AS id,
                o.first_name AS first_name,
                o.last_name AS last_name,
                o.country_id AS country_id
             FROM owners o
             INNER JOIN pokemon_owners po ON po.owner_id = o.id
             WHERE po.pokemon_id = ?1
             ORDER BY o.id ASC;",
        )?;
        let owners = stmt
            .query_map([pokemon_id], parse_owner_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(owners)
    }
}

pub(crate) fn parse_owner_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        country_id: row.get("country_id")?,
    })
}
