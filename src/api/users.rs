//! User favorites and follows listings

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::AuthorShort,
        book::BookShort,
        favorite::{FavoriteBookStats, FollowedAuthorStats},
    },
};

use super::AuthenticatedUser;

/// Favorite books with summary statistics
#[derive(Serialize, ToSchema)]
pub struct FavoriteBooksResponse {
    pub books: Vec<BookShort>,
    pub stats: FavoriteBookStats,
}

/// Followed authors with summary statistics
#[derive(Serialize, ToSchema)]
pub struct FollowedAuthorsResponse {
    pub authors: Vec<AuthorShort>,
    pub stats: FollowedAuthorStats,
}

/// The caller's favorite books
#[utoipa::path(
    get,
    path = "/users/me/favorites",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Favorite books", body = FavoriteBooksResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_favorite_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FavoriteBooksResponse>> {
    let (books, stats) = state.services.favorites.favorite_books(claims.user_id).await?;
    Ok(Json(FavoriteBooksResponse { books, stats }))
}

/// The authors the caller follows
#[utoipa::path(
    get,
    path = "/users/me/follows",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Followed authors", body = FollowedAuthorsResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_followed_authors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FollowedAuthorsResponse>> {
    let (authors, stats) = state
        .services
        .favorites
        .followed_authors(claims.user_id)
        .await?;
    Ok(Json(FollowedAuthorsResponse { authors, stats }))
}
