//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Author with aggregate book count for list views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorShort {
    pub id: i32,
    pub name: String,
    pub nationality: Option<String>,
    pub book_count: i64,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "Bio is too long"))]
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Nationality is too long"))]
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

/// Update author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "Bio is too long"))]
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Nationality is too long"))]
    pub nationality: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

/// Liveness filter for author listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LivenessFilter {
    Alive,
    Deceased,
}

/// Query parameters for author listings
#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    pub name: Option<String>,
    pub liveness: Option<LivenessFilter>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Date-consistency rules shared by create and update:
/// birth_date not in the future, death_date after birth and not in the future.
pub fn check_life_dates(
    birth_date: Option<NaiveDate>,
    death_date: Option<NaiveDate>,
) -> Result<(), String> {
    let today = Utc::now().date_naive();
    if let Some(birth) = birth_date {
        if birth > today {
            return Err("Birth date cannot be in the future".to_string());
        }
        if let Some(death) = death_date {
            if death <= birth {
                return Err("Death date must be after birth date".to_string());
            }
        }
    }
    if let Some(death) = death_date {
        if death > today {
            return Err("Death date cannot be in the future".to_string());
        }
        if birth_date.is_none() {
            return Err("Death date requires a birth date".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn accepts_consistent_life_dates() {
        assert!(check_life_dates(Some(d(1900, 1, 1)), Some(d(1950, 1, 1))).is_ok());
        assert!(check_life_dates(Some(d(1990, 1, 1)), None).is_ok());
        assert!(check_life_dates(None, None).is_ok());
    }

    #[test]
    fn rejects_death_before_birth() {
        assert!(check_life_dates(Some(d(2000, 1, 1)), Some(d(1999, 12, 31))).is_err());
        assert!(check_life_dates(Some(d(2000, 1, 1)), Some(d(2000, 1, 1))).is_err());
    }

    #[test]
    fn rejects_future_dates() {
        let future = Utc::now().date_naive() + chrono::Duration::days(1);
        assert!(check_life_dates(Some(future), None).is_err());
        assert!(check_life_dates(Some(d(1900, 1, 1)), Some(future)).is_err());
    }
}
