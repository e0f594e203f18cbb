//! Review repository.
//!
//! # Responsibility
//! - Persist reviews with their owning pokemon/reviewer references.
//! - Provide the batch delete used before a pokemon is removed.
//!
//! # Invariants
//! - `delete_reviews` runs as one commit; an empty batch succeeds without
//!   touching the store.

use super::{ensure_catalog_connection_ready, row_exists, RepoResult};
use crate::model::catalog::{natural_key, PokemonId, Review, ReviewId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const REVIEW_SELECT_SQL: &str =
    "SELECT id, title, text, rating, pokemon_id, reviewer_id FROM reviews";

/// Repository interface for reviews.
pub trait ReviewRepository {
    fn list_reviews(&self) -> RepoResult<Vec<Review>>;
    fn get_review(&self, id: ReviewId) -> RepoResult<Option<Review>>;
    fn review_exists(&self, id: ReviewId) -> RepoResult<bool>;
    fn find_review_by_title(&self, title: &str) -> RepoResult<Option<Review>>;
    fn reviews_of_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Review>>;
    fn create_review(&self, review: &mut Review) -> RepoResult<bool>;
    fn update_review(&self, review: &Review) -> RepoResult<bool>;
    fn delete_review(&self, review: &Review) -> RepoResult<bool>;
    /// Deletes all given reviews in one commit.
    ///
    /// Returns `true` when at least one row was removed, or when `reviews`
    /// is empty.
    fn delete_reviews(&self, reviews: &[Review]) -> RepoResult<bool>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn list_reviews(&self) -> RepoResult<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} ORDER BY id ASC;"))?;
        let reviews = stmt
            .query_map([], parse_review_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    fn get_review(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let review = self
            .conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_review_row,
            )
            .optional()?;
        Ok(review)
    }

    fn review_exists(&self, id: ReviewId) -> RepoResult<bool> {
        row_exists(self.conn, "reviews", id)
    }

    fn find_review_by_title(&self, title: &str) -> RepoResult<Option<Review>> {
        let review = self
            .conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE title_key = ?1 ORDER BY id ASC LIMIT 1;"),
                [natural_key(title)],
                parse_review_row,
            )
            .optional()?;
        Ok(review)
    }

    fn reviews_of_pokemon(&self, pokemon_id: PokemonId) -> RepoResult<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE pokemon_id = ?1 ORDER BY id ASC;"
        ))?;
        let reviews = stmt
            .query_map([pokemon_id], parse_review_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(reviews)
    }

    fn create_review(&self, review: &mut Review) -> RepoResult<bool> {
        review.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO reviews (title, title_key, text, rating, pokemon_id, reviewer_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                review.title,
                review.natural_key(),
                review.text,
                review.rating,
                review.pokemon_id,
                review.reviewer_id,
            ],
        )?;
        if inserted == 0 {
            return Ok(false);
        }

        review.id = self.conn.last_insert_rowid();
        Ok(true)
    }

    fn update_review(&self, review: &Review) -> RepoResult<bool> {
        review.validate()?;

        let changed = self.conn.execute(
            "UPDATE reviews
             SET
                title = ?1,
                title_key = ?2,
                text = ?3,
                rating = ?4,
                pokemon_id = ?5,
                reviewer_id = ?6
             WHERE id = ?7;",
            params![
                review.title,
                review.natural_key(),
                review.text,
                review.rating,
                review.pokemon_id,
                review.reviewer_id,
                review.id,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete_review(&self, review: &Review) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [review.id])?;
        Ok(removed > 0)
    }

    fn delete_reviews(&self, reviews: &[Review]) -> RepoResult<bool> {
        if reviews.is_empty() {
            return Ok(true);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM reviews WHERE id = ?1;")?;
            for review in reviews {
                removed += stmt.execute([review.id])?;
            }
        }
        tx.commit()?;

        Ok(removed > 0)
    }
}

pub(crate) fn parse_review_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get("id")?,
        title: row.get("title")?,
        text: row.get("text")?,
        rating: row.get("rating")?,
        pokemon_id: row.get("pokemon_id")?,
        reviewer_id: row.get("reviewer_id")?,
    })
}
