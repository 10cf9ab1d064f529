//! Review service: one opinion per user per book

use validator::Validate;

use crate::{
    error::AppResult,
    models::review::{CreateReview, Review},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a review for a book. Scores outside 1-5 are rejected; a
    /// second review of the same book by the same user conflicts.
    pub async fn create(
        &self,
        book_id: i32,
        user_id: i32,
        review: CreateReview,
    ) -> AppResult<Review> {
        review.validate()?;
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.create(book_id, user_id, &review).await
    }

    /// Delete the caller's review of a book. The (book, user) scoping makes
    /// this owner-only; other users' reviews are unreachable.
    pub async fn delete(&self, book_id: i32, user_id: i32) -> AppResult<()> {
        self.repository.reviews.delete(book_id, user_id).await
    }

    /// Reviews of a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<Review>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_for_book(book_id).await
    }
}
