//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, BookShort, BookSort, CreateBook, RankedBook, SearchType, UpdateBook},
        category::Category,
    },
};

/// Shared SELECT for short book rows (author and publisher names joined in)
const BOOK_SHORT_SELECT: &str = r#"
    SELECT b.id, b.title, a.name AS author_name, p.name AS publisher_name,
           b.publication_year, b.available_quantity, b.total_quantity
    FROM books b
    JOIN authors a ON b.author_id = a.id
    JOIN publishers p ON b.publisher_id = p.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get several books at once (cart hydration); order is unspecified
    pub async fn get_by_ids(&self, ids: &[i32]) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// List books with optional author filter and sort order
    pub async fn list(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let (limit, offset) = super::page_bounds(query.page, query.per_page);

        let order_clause = match query.sort {
            Some(BookSort::Recent) => "ORDER BY b.created_at DESC, b.id DESC",
            Some(BookSort::Recommended) => "ORDER BY b.publication_year DESC NULLS LAST, b.id",
            None => "ORDER BY b.title, b.id",
        };

        let list_sql = format!(
            "{} WHERE ($1::int4 IS NULL OR b.author_id = $1) {} LIMIT $2 OFFSET $3",
            BOOK_SHORT_SELECT, order_clause
        );

        let books = sqlx::query_as::<_, BookShort>(&list_sql)
            .bind(query.author_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM books b WHERE ($1::int4 IS NULL OR b.author_id = $1)")
                .bind(query.author_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((books, total))
    }

    /// Search books by a case-insensitive substring in the scope selected by
    /// `search_type`
    pub async fn search(
        &self,
        term: &str,
        search_type: SearchType,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<BookShort>, i64)> {
        let (limit, offset) = super::page_bounds(page, per_page);
        let pattern = format!("%{}%", term);

        const CATEGORY_MATCH: &str = r#"EXISTS (
            SELECT 1 FROM book_categories bc
            JOIN categories c ON bc.category_id = c.id
            WHERE bc.book_id = b.id AND c.name ILIKE $1
        )"#;

        let predicate = match search_type {
            SearchType::Title => "b.title ILIKE $1".to_string(),
            SearchType::Author => "a.name ILIKE $1".to_string(),
            SearchType::Publisher => "p.name ILIKE $1".to_string(),
            SearchType::Category => CATEGORY_MATCH.to_string(),
            SearchType::All => format!(
                "(b.title ILIKE $1 OR a.name ILIKE $1 OR p.name ILIKE $1 OR {})",
                CATEGORY_MATCH
            ),
        };

        let list_sql = format!(
            "{} WHERE {} ORDER BY b.title, b.id LIMIT $2 OFFSET $3",
            BOOK_SHORT_SELECT, predicate
        );

        let books = sqlx::query_as::<_, BookShort>(&list_sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!(
            r#"
            SELECT COUNT(*)
            FROM books b
            JOIN authors a ON b.author_id = a.id
            JOIN publishers p ON b.publisher_id = p.id
            WHERE {}
            "#,
            predicate
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Rank books by summed borrowed quantity, optionally windowed by the
    /// calendar year and/or month of the owning request's request_date.
    /// Ties break on ascending book id.
    pub async fn most_borrowed(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        limit: i64,
    ) -> AppResult<Vec<RankedBook>> {
        let mut conditions: Vec<String> = Vec::new();
        if year.is_some() {
            conditions.push(format!(
                "date_part('year', r.request_date)::int4 = ${}",
                conditions.len() + 1
            ));
        }
        if month.is_some() {
            conditions.push(format!(
                "date_part('month', r.request_date)::int4 = ${}",
                conditions.len() + 1
            ));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT b.id, b.title, a.name AS author_name,
                   SUM(i.quantity)::int8 AS borrow_count
            FROM borrow_request_items i
            JOIN borrow_requests r ON i.borrow_request_id = r.id
            JOIN books b ON i.book_id = b.id
            JOIN authors a ON b.author_id = a.id
            {}
            GROUP BY b.id, b.title, a.name
            ORDER BY borrow_count DESC, b.id
            LIMIT {}
            "#,
            where_clause, limit
        );

        let mut query = sqlx::query_as::<_, RankedBook>(&sql);
        if let Some(y) = year {
            query = query.bind(y);
        }
        if let Some(m) = month {
            query = query.bind(m as i32);
        }

        let ranked = query.fetch_all(&self.pool).await?;
        Ok(ranked)
    }

    /// Categories attached to a book
    pub async fn categories(&self, book_id: i32) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.*
            FROM categories c
            JOIN book_categories bc ON bc.category_id = c.id
            WHERE bc.book_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Insert a new book with its category links; all copies start available
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, description, author_id, publisher_id,
                               publication_year, total_quantity, available_quantity)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.publication_year)
        .bind(book.total_quantity)
        .fetch_one(&mut *tx)
        .await?;

        for category_id in &book.category_ids {
            sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update book fields; a total_quantity change shifts available_quantity
    /// by the same delta, and the quantity CHECK rejects totals below the
    /// number of copies currently out
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                author_id = COALESCE($4, author_id),
                publisher_id = COALESCE($5, publisher_id),
                publication_year = COALESCE($6, publication_year),
                available_quantity = available_quantity
                    + (COALESCE($7, total_quantity) - total_quantity),
                total_quantity = COALESCE($7, total_quantity),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(book.author_id)
        .bind(book.publisher_id)
        .bind(book.publication_year)
        .bind(book.total_quantity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            if super::is_check_violation(&e) {
                AppError::Validation(
                    "Total quantity cannot drop below the number of borrowed copies".to_string(),
                )
            } else {
                AppError::from(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref category_ids) = book.category_ids {
            sqlx::query("DELETE FROM book_categories WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for category_id in category_ids {
                sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(category_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a book together with its favorites; borrow history blocks the
    /// delete through the FK on borrow_request_items
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM favorites WHERE favorable_type = 'book' AND favorable_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if super::is_foreign_key_violation(&e) {
                    AppError::DependentRecords(
                        "Book cannot be deleted while borrow requests reference it".to_string(),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
