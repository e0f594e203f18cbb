//! Reviewer repository.

use super::review_repo::parse_review_row;
use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{natural_key, Review, Reviewer, ReviewerId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const REVIEWER_SELECT_SQL: &str = "SELECT id, first_name, last_name FROM reviewers";

/// Repository interface for reviewers.
pub trait ReviewerRepository {
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>>;
    fn get_reviewer(&self, id: ReviewerId) -> RepoResult<Option<Reviewer>>;
    fn reviewer_exists(&self, id: ReviewerId) -> RepoResult<bool>;
    /// Looks a reviewer up by natural key (trimmed, case-folded last name).
    fn find_reviewer_by_last_name(&self, last_name: &str) -> RepoResult<Option<Reviewer>>;
    fn create_reviewer(&self, reviewer: &mut Reviewer) -> RepoResult<bool>;
    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<bool>;
    fn delete_reviewer(&self, reviewer: &Reviewer) -> RepoResult<bool>;
    fn reviews_by_reviewer(&self, id: ReviewerId) -> RepoResult<Vec<Review>>;
}

/// SQLite-backed reviewer repository.
pub struct SqliteReviewerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewerRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReviewerRepository for SqliteReviewerRepository<'_> {
    fn list_reviewers(&self) -> RepoResult<Vec<Reviewer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEWER_SELECT_SQL} ORDER BY id ASC;"))?;
        let reviewers = stmt
            .query_map([], parse_reviewer_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviewers)
    }

    fn get_reviewer(&self, id: ReviewerId) -> RepoResult<Option<Reviewer>> {
        let reviewer = self
            .conn
            .query_row(
                &format!("{REVIEWER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_reviewer_row,
            )
            .optional()?;
        Ok(reviewer)
    }

    fn reviewer_exists(&self, id: ReviewerId) -> RepoResult<bool> {
        row_exists(self.conn, "reviewers", id)
    }

    fn find_reviewer_by_last_name(&self, last_name: &str) -> RepoResult<Option<Reviewer>> {
        let reviewer = self
            .conn
            .query_row(
                &format!(
                    "{REVIEWER_SELECT_SQL} WHERE last_name_key = ?1 ORDER BY id ASC LIMIT 1;"
                ),
                [natural_key(last_name)],
                parse_reviewer_row,
            )
            .optional()?;
        Ok(reviewer)
    }

    fn create_reviewer(&self, reviewer: &mut Reviewer) -> RepoResult<bool> {
        reviewer.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO reviewers (first_name, last_name, last_name_key) VALUES (?1, ?2, ?3);",
            params![
                reviewer.first_name,
                reviewer.last_name,
                reviewer.natural_key()
            ],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        reviewer.id = self.conn.last_insert_rowid();
        Ok(true)
    }

    fn update_reviewer(&self, reviewer: &Reviewer) -> RepoResult<bool> {
        reviewer.validate()?;

        let changed = self.conn.execute(
            "UPDATE reviewers
             SET first_name = ?1, last_name = ?2, last_name_key = ?3
             WHERE id = ?4;",
            params![
                reviewer.first_name,
                reviewer.last_name,
                reviewer.natural_key(),
                reviewer.id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_reviewer(&self, reviewer: &Reviewer) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM reviewers WHERE id = ?1;", [reviewer.id])?;
        Ok(removed > 0)
    }

    fn reviews_by_reviewer(&self, id: ReviewerId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, text, rating, pokemon_id, reviewer_id
             FROM reviews
             WHERE reviewer_id = ?1
             ORDER BY id ASC;",
        )?;
        let reviews = stmt
            .query_map([id], parse_review_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }
}

fn parse_reviewer_row(row: &Row<'_>) -> rusqlite::Result<Reviewer> {
    Ok(Reviewer {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}
