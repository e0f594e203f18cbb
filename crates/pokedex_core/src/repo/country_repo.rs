//! Country repository.
//!
//! # Invariants
//! - A country referenced by any owner cannot be deleted; the store rejects
//!   it with a foreign-key error.

use super::owner_repo::parse_owner_row;
use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{natural_key, Country, CountryId, Owner, OwnerId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COUNTRY_SELECT_SQL: &str = "SELECT id, name FROM countries";

/// Repository interface for countries.
pub trait CountryRepository {
    fn list_countries(&self) -> RepoResult<Vec<Country>>;
    fn get_country(&self, id: CountryId) -> RepoResult<Option<Country>>;
    fn country_exists(&self, id: CountryId) -> RepoResult<bool>;
    fn find_country_by_name(&self, name: &str) -> RepoResult<Option<Country>>;
    fn create_country(&self, country: &mut Country) -> RepoResult<bool>;
    fn update_country(&self, country: &Country) -> RepoResult<bool>;
    fn delete_country(&self, country: &Country) -> RepoResult<bool>;
    fn owners_of_country(&self, id: CountryId) -> RepoResult<Vec<Owner>>;
    /// Country the given owner lives in; `None` for an unknown owner.
    fn country_of_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Country>>;
}

/// SQLite-backed country repository.
pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn list_countries(&self) -> RepoResult<Vec<Country>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COUNTRY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut countries = Vec::new();
        while let Some(row) = rows.next()? {
            countries.push(parse_country_row(row)?);
        }
        Ok(countries)
    }

    fn get_country(&self, id: CountryId) -> RepoResult<Option<Country>> {
        let country = self
            .conn
            .query_row(
                &format!("{COUNTRY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_country_row,
            )
            .optional()?;
        Ok(country)
    }

    fn country_exists(&self, id: CountryId) -> RepoResult<bool> {
        row_exists(self.conn, "countries", id)
    }

    fn find_country_by_name(&self, name: &str) -> RepoResult<Option<Country>> {
        let country = self
            .conn
            .query_row(
                &format!("{COUNTRY_SELECT_SQL} WHERE name_key = ?1 ORDER BY id ASC LIMIT 1;"),
                [natural_key(name)],
                parse_country_row,
            )
            .optional()?;
        Ok(country)
    }

    fn create_country(&self, country: &mut Country) -> RepoResult<bool> {
        country.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO countries (name, name_key) VALUES (?1, ?2);",
            params![country.name, country.natural_key()],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        country.id = self.conn.last_insert_rowid();
        Ok(true)
    }

    fn update_country(&self, country: &Country) -> RepoResult<bool> {
        country.validate()?;

        let changed = self.conn.execute(
            "UPDATE countries SET name = ?1, name_key = ?2 WHERE id = ?3;",
            params![country.name, country.natural_key(), country.id],
        )?;
        Ok(changed > 0)
    }

    fn delete_country(&self, country: &Country) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM countries WHERE id = ?1;", [country.id])?;
        Ok(removed > 0)
    }

    fn owners_of_country(&self, id: CountryId) -> RepoResult<Vec<Owner>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, country_id
             FROM owners
             WHERE country_id = ?1
             ORDER BY id ASC;",
        )?;
        let owners = stmt
            .query_map([id], parse_owner_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(owners)
    }

    fn country_of_owner(&self, owner_id: OwnerId) -> RepoResult<Option<Country>> {
        let country = self
            .conn
            .query_row(
                "SELECT c.id AS id, c.name AS name
                 FROM countries c
                 INNER JOIN owners o ON o.country_id = c.id
                 WHERE o.id = ?1;",
                [owner_id],
                parse_country_row,
            )
            .optional()?;
        Ok(country)
    }
}

fn parse_country_row(row: &Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
