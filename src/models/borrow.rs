//! Borrow cart and borrow request (reservation) models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One line of a borrow cart: a book and the number of copies wanted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartEntry {
    pub book_id: i32,
    pub quantity: i32,
}

/// A borrow cart: an ordered list of entries, unique per book.
/// Stored JSON-encoded in Redis under the cart token; never persisted to
/// the relational store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub entries: Vec<CartEntry>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a book to the cart. Quantities for a book already present are
    /// summed into the existing entry; new books are appended, so insertion
    /// order is preserved.
    pub fn add(&mut self, book_id: i32, quantity: i32) {
        match self.entries.iter_mut().find(|e| e.book_id == book_id) {
            Some(entry) => entry.quantity += quantity,
            None => self.entries.push(CartEntry { book_id, quantity }),
        }
    }

    /// Replace the quantity of an existing entry. Returns false when the
    /// book is not in the cart.
    pub fn set_quantity(&mut self, book_id: i32, quantity: i32) -> bool {
        match self.entries.iter_mut().find(|e| e.book_id == book_id) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a book from the cart. Returns false when the book is not in
    /// the cart.
    pub fn remove(&mut self, book_id: i32) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.book_id != book_id);
        self.entries.len() < before
    }
}

/// Cart line hydrated with catalog data for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartEntryDetails {
    pub book_id: i32,
    pub title: String,
    pub quantity: i32,
    /// Current availability; the cart itself is not checked against it
    /// until checkout
    pub available_quantity: i32,
}

/// Cart response with hydrated lines
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartDetails {
    pub entries: Vec<CartEntryDetails>,
}

/// Request body for adding a book to the cart
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCart {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Request body for changing one cart line
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCartEntry {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Checkout request: the borrow period for the whole cart
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Borrow request header from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: i32,
    pub user_id: i32,
    pub request_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
}

/// Borrow request line item from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequestItem {
    pub id: i32,
    pub borrow_request_id: i32,
    pub book_id: i32,
    pub quantity: i32,
}

/// Line item hydrated with the book title for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequestItemDetails {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub quantity: i32,
}

/// Borrow request with its line items
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowRequestDetails {
    pub id: i32,
    pub user_id: i32,
    pub request_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub items: Vec<BorrowRequestItemDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_same_book_twice_sums_quantities() {
        let mut cart = Cart::default();
        cart.add(1, 2);
        cart.add(1, 3);
        assert_eq!(cart.entries.len(), 1);
        assert_eq!(cart.entries[0].quantity, 5);
    }

    #[test]
    fn adding_different_books_preserves_insertion_order() {
        let mut cart = Cart::default();
        cart.add(3, 1);
        cart.add(1, 1);
        cart.add(2, 1);
        cart.add(1, 4);
        let ids: Vec<i32> = cart.entries.iter().map(|e| e.book_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(cart.entries[1].quantity, 5);
    }

    #[test]
    fn set_quantity_replaces_instead_of_summing() {
        let mut cart = Cart::default();
        cart.add(1, 2);
        assert!(cart.set_quantity(1, 7));
        assert_eq!(cart.entries[0].quantity, 7);
        assert!(!cart.set_quantity(99, 1));
    }

    #[test]
    fn remove_drops_only_the_matching_entry() {
        let mut cart = Cart::default();
        cart.add(1, 1);
        cart.add(2, 1);
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert_eq!(cart.entries.len(), 1);
        assert_eq!(cart.entries[0].book_id, 2);
    }
}
