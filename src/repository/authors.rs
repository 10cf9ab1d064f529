//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, AuthorShort, CreateAuthor, LivenessFilter, UpdateAuthor},
        book::BookShort,
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// List authors with optional name search and liveness filter
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<(Vec<AuthorShort>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);
        let name_pattern = query.name.as_ref().map(|n| format!("%{}%", n));

        let liveness_clause = match query.liveness {
            Some(LivenessFilter::Alive) => "AND a.death_date IS NULL",
            Some(LivenessFilter::Deceased) => "AND a.death_date IS NOT NULL",
            None => "",
        };

        let list_sql = format!(
            r#"
            SELECT a.id, a.name, a.nationality, COUNT(b.id) AS book_count
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            WHERE ($1::text IS NULL OR a.name ILIKE $1) {}
            GROUP BY a.id
            ORDER BY a.name, a.id
            LIMIT $2 OFFSET $3
            "#,
            liveness_clause
        );

        let authors = sqlx::query_as::<_, AuthorShort>(&list_sql)
            .bind(&name_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM authors a WHERE ($1::text IS NULL OR a.name ILIKE $1) {}",
            liveness_clause
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&name_pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok((authors, total))
    }

    /// Books of one author, newest entries first
    pub async fn books(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        let books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.title, a.name AS author_name, p.name AS publisher_name,
                   b.publication_year, b.available_quantity, b.total_quantity
            FROM books b
            JOIN authors a ON b.author_id = a.id
            JOIN publishers p ON b.publisher_id = p.id
            WHERE b.author_id = $1
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Number of books referencing this author
    pub async fn book_count(&self, author_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, bio, nationality, birth_date, death_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.bio)
        .bind(&author.nationality)
        .bind(author.birth_date)
        .bind(author.death_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update author fields; None leaves a column unchanged
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                nationality = COALESCE($4, nationality),
                birth_date = COALESCE($5, birth_date),
                death_date = COALESCE($6, death_date),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&author.name)
        .bind(&author.bio)
        .bind(&author.nationality)
        .bind(author.birth_date)
        .bind(author.death_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author; the caller is responsible for the dependent-books
    /// guard
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }
        Ok(())
    }
}
