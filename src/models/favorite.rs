//! Favorite model: a user's bookmark on a book or an author

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Kind of entity a favorite points at. The polymorphic target is a tagged
/// enum resolved via explicit lookup dispatch, not dynamic typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FavorableKind {
    Author,
    Book,
}

impl FavorableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavorableKind::Author => "author",
            FavorableKind::Book => "book",
        }
    }
}

impl std::fmt::Display for FavorableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FavorableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "author" => Ok(FavorableKind::Author),
            "book" => Ok(FavorableKind::Book),
            _ => Err(format!("Invalid favorable type: {}", s)),
        }
    }
}

// SQLx conversion for FavorableKind (stored as a string column)
impl sqlx::Type<Postgres> for FavorableKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for FavorableKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for FavorableKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Favorite row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub favorable_type: FavorableKind,
    pub favorable_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary statistics over a user's favorite books
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoriteBookStats {
    pub total_favorites: i64,
    pub unique_authors: i64,
    pub unique_publishers: i64,
}

/// Summary statistics over a user's followed authors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FollowedAuthorStats {
    pub total_books: i64,
    pub avg_books: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorable_kind_round_trips() {
        assert_eq!("book".parse::<FavorableKind>().unwrap(), FavorableKind::Book);
        assert_eq!(
            "Author".parse::<FavorableKind>().unwrap(),
            FavorableKind::Author
        );
        assert_eq!(FavorableKind::Book.to_string(), "book");
        assert!("publisher".parse::<FavorableKind>().is_err());
    }
}
