//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::category::Category;
use super::review::Review;

/// Search scope for the book search endpoint.
/// Parsing is total: any unrecognized value maps to `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Title,
    Author,
    Publisher,
    Category,
    All,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Title => "title",
            SearchType::Author => "author",
            SearchType::Publisher => "publisher",
            SearchType::Category => "category",
            SearchType::All => "all",
        }
    }
}

impl From<&str> for SearchType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "title" => SearchType::Title,
            "author" => SearchType::Author,
            "publisher" => SearchType::Publisher,
            "category" => SearchType::Category,
            _ => SearchType::All,
        }
    }
}

impl From<Option<&str>> for SearchType {
    fn from(s: Option<&str>) -> Self {
        s.map(SearchType::from).unwrap_or(SearchType::All)
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub author_id: i32,
    pub publisher_id: i32,
    pub publication_year: Option<i32>,
    pub total_quantity: i32,
    pub available_quantity: i32,
    /// Lifetime number of copies borrowed
    pub borrow_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub author_name: String,
    pub publisher_name: String,
    pub publication_year: Option<i32>,
    pub available_quantity: i32,
    pub total_quantity: i32,
}

/// Book detail with relations and computed rating
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub author_name: String,
    pub publisher_name: String,
    pub categories: Vec<Category>,
    /// Mean review score rounded half-up to one decimal; 0.0 with no reviews
    pub average_rating: f64,
    pub reviews: Vec<Review>,
}

/// Book annotated with its borrow count inside a most-borrowed window.
/// `borrow_count` here is the windowed sum, not the lifetime column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RankedBook {
    pub id: i32,
    pub title: String,
    pub author_name: String,
    pub borrow_count: i64,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,
    pub author_id: i32,
    pub publisher_id: i32,
    #[validate(range(min = 1001, message = "Publication year is too old"))]
    pub publication_year: Option<i32>,
    #[validate(range(min = 0))]
    pub total_quantity: i32,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,
    pub author_id: Option<i32>,
    pub publisher_id: Option<i32>,
    #[validate(range(min = 1001, message = "Publication year is too old"))]
    pub publication_year: Option<i32>,
    #[validate(range(min = 0))]
    pub total_quantity: Option<i32>,
    pub category_ids: Option<Vec<i32>>,
}

/// Sort order for book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookSort {
    /// Newest entries first
    Recent,
    /// Most recent publication year first
    Recommended,
}

/// Query parameters for book listings
#[derive(Debug, Deserialize)]
pub struct BookQuery {
    pub author_id: Option<i32>,
    pub sort: Option<BookSort>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for book search
#[derive(Debug, Deserialize)]
pub struct BookSearchQuery {
    pub q: Option<String>,
    pub search_type: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for the most-borrowed ranking
#[derive(Debug, Deserialize)]
pub struct MostBorrowedQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_type_parsing_is_total() {
        assert_eq!(SearchType::from("title"), SearchType::Title);
        assert_eq!(SearchType::from("Publisher"), SearchType::Publisher);
        assert_eq!(SearchType::from("category"), SearchType::Category);
        assert_eq!(SearchType::from("all"), SearchType::All);
        // Unknown values fall back to All rather than failing
        assert_eq!(SearchType::from("invalid_type"), SearchType::All);
        assert_eq!(SearchType::from(""), SearchType::All);
        assert_eq!(SearchType::from(None), SearchType::All);
    }
}
