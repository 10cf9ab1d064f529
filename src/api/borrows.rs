//! Borrow request history endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::borrow::{BorrowRequest, BorrowRequestDetails},
};

use super::AuthenticatedUser;

/// The caller's borrow requests, newest first
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow requests", body = Vec<BorrowRequest>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    let requests = state.services.borrows.list_for_user(claims.user_id).await?;
    Ok(Json(requests))
}

/// One borrow request with its items (owner or admin)
#[utoipa::path(
    get,
    path = "/borrows/{id}",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Borrow request ID")),
    responses(
        (status = 200, description = "Borrow request details", body = BorrowRequestDetails),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Borrow request not found")
    )
)]
pub async fn get_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowRequestDetails>> {
    let details = state.services.borrows.get_details(&claims, id).await?;
    Ok(Json(details))
}
