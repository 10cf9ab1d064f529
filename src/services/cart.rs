//! Borrow cart service: Redis-backed session state.
//!
//! The cart is keyed by an opaque token carried in its own cookie, not by
//! the authentication token, so signing in or out leaves the cart
//! untouched by construction.

use crate::{
    config::CartConfig,
    error::{AppError, AppResult},
    models::borrow::{Cart, CartDetails, CartEntryDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct CartService {
    repository: Repository,
    redis: crate::services::redis::RedisService,
    ttl_seconds: u64,
}

impl CartService {
    pub fn new(
        repository: Repository,
        redis: crate::services::redis::RedisService,
        config: CartConfig,
    ) -> Self {
        Self {
            repository,
            redis,
            ttl_seconds: config.ttl_days * 24 * 3600,
        }
    }

    /// Add a book to the cart, summing quantities for a book already there.
    /// Availability is deliberately not checked here; the cart is
    /// exploratory and only checkout validates stock.
    pub async fn add(&self, token: &str, book_id: i32, quantity: i32) -> AppResult<CartDetails> {
        if quantity < 1 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        // The book must exist, even though stock is not reserved yet
        self.repository.books.get_by_id(book_id).await?;

        let mut cart = self.redis.get_cart(token).await?;
        cart.add(book_id, quantity);
        self.redis.put_cart(token, &cart, self.ttl_seconds).await?;

        self.hydrate(cart).await
    }

    /// Current cart content with book titles and availability
    pub async fn get(&self, token: &str) -> AppResult<CartDetails> {
        let cart = self.redis.get_cart(token).await?;
        self.hydrate(cart).await
    }

    /// Raw cart entries, used by checkout
    pub async fn entries(&self, token: &str) -> AppResult<Cart> {
        self.redis.get_cart(token).await
    }

    /// Replace the quantity of one line
    pub async fn set_quantity(
        &self,
        token: &str,
        book_id: i32,
        quantity: i32,
    ) -> AppResult<CartDetails> {
        if quantity < 1 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut cart = self.redis.get_cart(token).await?;
        if !cart.set_quantity(book_id, quantity) {
            return Err(AppError::NotFound(format!(
                "Book with id {} is not in the cart",
                book_id
            )));
        }
        self.redis.put_cart(token, &cart, self.ttl_seconds).await?;

        self.hydrate(cart).await
    }

    /// Remove one line
    pub async fn remove(&self, token: &str, book_id: i32) -> AppResult<CartDetails> {
        let mut cart = self.redis.get_cart(token).await?;
        if !cart.remove(book_id) {
            return Err(AppError::NotFound(format!(
                "Book with id {} is not in the cart",
                book_id
            )));
        }
        self.redis.put_cart(token, &cart, self.ttl_seconds).await?;

        self.hydrate(cart).await
    }

    /// Empty the cart
    pub async fn clear(&self, token: &str) -> AppResult<()> {
        self.redis.delete_cart(token).await
    }

    /// Join cart lines with catalog data, preserving cart order. Lines whose
    /// book has disappeared from the catalog are skipped.
    async fn hydrate(&self, cart: Cart) -> AppResult<CartDetails> {
        if cart.is_empty() {
            return Ok(CartDetails { entries: vec![] });
        }

        let ids: Vec<i32> = cart.entries.iter().map(|e| e.book_id).collect();
        let books = self.repository.books.get_by_ids(&ids).await?;

        let entries = cart
            .entries
            .iter()
            .filter_map(|entry| {
                books
                    .iter()
                    .find(|b| b.id == entry.book_id)
                    .map(|book| CartEntryDetails {
                        book_id: entry.book_id,
                        title: book.title.clone(),
                        quantity: entry.quantity,
                        available_quantity: book.available_quantity,
                    })
            })
            .collect();

        Ok(CartDetails { entries })
    }
}
