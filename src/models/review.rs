//! Review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Review row with the reviewer's name joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i16,
    #[validate(length(max = 2000, message = "Comment is too long"))]
    pub comment: Option<String>,
}

/// Round a mean review score half-up to one decimal, the rating shown on
/// book pages. A book with no reviews scores 0.0.
pub fn average_rating(scores: &[i16]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|s| *s as i64).sum();
    let mean = sum as f64 / scores.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_of_no_reviews_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_rating_keeps_exact_halves() {
        assert_eq!(average_rating(&[4, 5]), 4.5);
        assert_eq!(average_rating(&[3]), 3.0);
    }

    #[test]
    fn average_rating_rounds_half_up_to_one_decimal() {
        // (4 + 5 + 2) / 3 = 3.666... -> 3.7
        assert_eq!(average_rating(&[4, 5, 2]), 3.7);
        // (1 + 2) / 2 = 1.5 stays 1.5, (1 + 1 + 2) / 3 = 1.333... -> 1.3
        assert_eq!(average_rating(&[1, 2]), 1.5);
        assert_eq!(average_rating(&[1, 1, 2]), 1.3);
    }
}
