//! Borrow requests repository: reservation persistence and inventory movement

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{
        BorrowRequest, BorrowRequestDetails, BorrowRequestItemDetails, CartEntry,
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Convert a validated cart into a borrow request inside one transaction.
    ///
    /// Each line decrements the book's availability with a conditional
    /// update (`available_quantity >= quantity`), so two concurrent
    /// checkouts can never drive availability negative. Any line that
    /// cannot be satisfied rolls the whole request back.
    pub async fn create_request(
        &self,
        user_id: i32,
        request_date: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
        entries: &[CartEntry],
    ) -> AppResult<BorrowRequestDetails> {
        let mut tx = self.pool.begin().await?;

        let request_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO borrow_requests (user_id, request_date, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(request_date)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let title: Option<String> = sqlx::query_scalar(
                r#"
                UPDATE books
                SET available_quantity = available_quantity - $2,
                    borrow_count = borrow_count + $2,
                    updated_at = now()
                WHERE id = $1 AND available_quantity >= $2
                RETURNING title
                "#,
            )
            .bind(entry.book_id)
            .bind(entry.quantity)
            .fetch_optional(&mut *tx)
            .await?;

            let title = match title {
                Some(title) => title,
                // Dropping the transaction rolls back every decrement made
                // so far: all-or-nothing
                None => {
                    let known_title: Option<String> =
                        sqlx::query_scalar("SELECT title FROM books WHERE id = $1")
                            .bind(entry.book_id)
                            .fetch_optional(&mut *tx)
                            .await?;
                    return Err(match known_title {
                        Some(t) => AppError::BusinessRule(format!(
                            "Not enough copies of '{}' available",
                            t
                        )),
                        None => AppError::NotFound(format!(
                            "Book with id {} not found",
                            entry.book_id
                        )),
                    });
                }
            };

            let item_id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO borrow_request_items (borrow_request_id, book_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(request_id)
            .bind(entry.book_id)
            .bind(entry.quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(BorrowRequestItemDetails {
                id: item_id,
                book_id: entry.book_id,
                title,
                quantity: entry.quantity,
            });
        }

        tx.commit().await?;

        Ok(BorrowRequestDetails {
            id: request_id,
            user_id,
            request_date,
            start_date,
            end_date,
            items,
        })
    }

    /// Get borrow request header by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BorrowRequest> {
        sqlx::query_as::<_, BorrowRequest>("SELECT * FROM borrow_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow request with id {} not found", id)))
    }

    /// Line items of a request, hydrated with book titles
    pub async fn items(&self, request_id: i32) -> AppResult<Vec<BorrowRequestItemDetails>> {
        let items = sqlx::query_as::<_, BorrowRequestItemDetails>(
            r#"
            SELECT i.id, i.book_id, b.title, i.quantity
            FROM borrow_request_items i
            JOIN books b ON i.book_id = b.id
            WHERE i.borrow_request_id = $1
            ORDER BY i.id
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// A user's borrow requests, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM borrow_requests WHERE user_id = $1 ORDER BY request_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
