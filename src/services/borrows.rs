//! Borrow request service: checkout and reservation history

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{MostBorrowedQuery, RankedBook},
        borrow::{BorrowRequest, BorrowRequestDetails, Cart, CheckoutRequest},
        user::UserClaims,
    },
    repository::Repository,
};

const DEFAULT_RANKING_LIMIT: i64 = 10;
const MAX_RANKING_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Convert the cart into a persisted borrow request. All-or-nothing:
    /// any unsatisfiable line rolls the whole checkout back.
    pub async fn checkout(
        &self,
        user_id: i32,
        cart: Cart,
        request: &CheckoutRequest,
    ) -> AppResult<BorrowRequestDetails> {
        if cart.is_empty() {
            return Err(AppError::BadRequest("Borrow cart is empty".to_string()));
        }

        let today = Utc::now().date_naive();
        if request.start_date < today {
            return Err(AppError::Validation(
                "Start date cannot be in the past".to_string(),
            ));
        }
        if request.end_date < request.start_date {
            return Err(AppError::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }

        self.repository
            .borrows
            .create_request(
                user_id,
                today,
                request.start_date,
                request.end_date,
                &cart.entries,
            )
            .await
    }

    /// A user's borrow requests, newest first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowRequest>> {
        self.repository.borrows.list_for_user(user_id).await
    }

    /// One borrow request with its items; owners and admins only
    pub async fn get_details(
        &self,
        claims: &UserClaims,
        request_id: i32,
    ) -> AppResult<BorrowRequestDetails> {
        let header = self.repository.borrows.get_by_id(request_id).await?;
        if header.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Authorization(
                "Borrow requests are visible to their owner only".to_string(),
            ));
        }

        let items = self.repository.borrows.items(request_id).await?;
        Ok(BorrowRequestDetails {
            id: header.id,
            user_id: header.user_id,
            request_date: header.request_date,
            start_date: header.start_date,
            end_date: header.end_date,
            items,
        })
    }

    /// Books ranked by borrowed quantity, optionally windowed by year/month
    pub async fn most_borrowed(&self, query: &MostBorrowedQuery) -> AppResult<Vec<RankedBook>> {
        if let Some(month) = query.month {
            if !(1..=12).contains(&month) {
                return Err(AppError::BadRequest(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                )));
            }
        }

        let limit = query
            .limit
            .unwrap_or(DEFAULT_RANKING_LIMIT)
            .clamp(1, MAX_RANKING_LIMIT);

        self.repository
            .books
            .most_borrowed(query.year, query.month, limit)
            .await
    }
}
