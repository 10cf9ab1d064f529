//! Favorites repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorShort,
        book::BookShort,
        favorite::{FavorableKind, Favorite, FavoriteBookStats},
    },
};

#[derive(Clone)]
pub struct FavoritesRepository {
    pool: Pool<Postgres>,
}

impl FavoritesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a favorite; the unique constraint rejects duplicates
    pub async fn add(
        &self,
        user_id: i32,
        kind: FavorableKind,
        favorable_id: i32,
    ) -> AppResult<Favorite> {
        sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, favorable_type, favorable_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(favorable_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if super::is_unique_violation(&e) {
                AppError::Conflict(format!("{} is already a favorite", kind))
            } else {
                e.into()
            }
        })
    }

    /// Remove a favorite; absent pairs are reported as not found
    pub async fn remove(
        &self,
        user_id: i32,
        kind: FavorableKind,
        favorable_id: i32,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND favorable_type = $2 AND favorable_id = $3",
        )
        .bind(user_id)
        .bind(kind)
        .bind(favorable_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Favorite {} {} not found",
                kind, favorable_id
            )));
        }
        Ok(())
    }

    /// Whether the (user, favorable) pair exists
    pub async fn exists(
        &self,
        user_id: i32,
        kind: FavorableKind,
        favorable_id: i32,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM favorites
                WHERE user_id = $1 AND favorable_type = $2 AND favorable_id = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(favorable_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Books the user has favorited, most recently favorited first
    pub async fn favorite_books(&self, user_id: i32) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, a.name AS author_name, p.name AS publisher_name,
                   b.publication_year, b.available_quantity, b.total_quantity
            FROM favorites f
            JOIN books b ON f.favorable_id = b.id
            JOIN authors a ON b.author_id = a.id
            JOIN publishers p ON b.publisher_id = p.id
            WHERE f.user_id = $1 AND f.favorable_type = 'book'
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Authors the user follows, most recently followed first
    pub async fn followed_authors(&self, user_id: i32) -> AppResult<Vec<AuthorShort>> {
        let authors = sqlx::query_as::<_, AuthorShort>(
            r#"
            SELECT a.id, a.name, a.nationality, COUNT(b.id) AS book_count
            FROM favorites f
            JOIN authors a ON f.favorable_id = a.id
            LEFT JOIN books b ON b.author_id = a.id
            WHERE f.user_id = $1 AND f.favorable_type = 'author'
            GROUP BY a.id, f.created_at, f.id
            ORDER BY f.created_at DESC, f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Summary counts over the user's favorite books
    pub async fn favorite_book_stats(&self, user_id: i32) -> AppResult<FavoriteBookStats> {
        let row: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(DISTINCT b.author_id),
                   COUNT(DISTINCT b.publisher_id)
            FROM favorites f
            JOIN books b ON f.favorable_id = b.id
            WHERE f.user_id = $1 AND f.favorable_type = 'book'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(FavoriteBookStats {
            total_favorites: row.0,
            unique_authors: row.1,
            unique_publishers: row.2,
        })
    }
}
