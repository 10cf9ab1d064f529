//! Reviews repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::review::{CreateReview, Review},
};

/// Reviews are returned with the reviewer's name joined in
const REVIEW_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.user_id, u.name AS user_name, r.score, r.comment,
           r.created_at, r.updated_at
    FROM reviews r
    JOIN users u ON r.user_id = u.id
"#;

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Reviews of a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Review>> {
        let sql = format!(
            "{} WHERE r.book_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            REVIEW_SELECT
        );
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    /// All scores of a book (rating aggregation happens in the model layer)
    pub async fn scores_for_book(&self, book_id: i32) -> AppResult<Vec<i16>> {
        let scores: Vec<i16> =
            sqlx::query_scalar("SELECT score FROM reviews WHERE book_id = $1 ORDER BY id")
                .bind(book_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(scores)
    }

    /// Insert a review; one review per (book, user) is enforced by the
    /// unique constraint
    pub async fn create(
        &self,
        book_id: i32,
        user_id: i32,
        review: &CreateReview,
    ) -> AppResult<Review> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO reviews (book_id, user_id, score, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(review.score)
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict("You have already reviewed this book".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        let sql = format!("{} WHERE r.id = $1", REVIEW_SELECT);
        let created = sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    /// Delete the user's review of a book; absence is reported as not found
    pub async fn delete(&self, book_id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE book_id = $1 AND user_id = $2")
            .bind(book_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Review not found".to_string()));
        }
        Ok(())
    }
}
