//! Borrow cart endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::AppResult,
    models::borrow::{BorrowRequestDetails, CartDetails, CheckoutRequest, UpdateCartEntry},
};

use super::{AuthenticatedUser, CartSession, CART_COOKIE};

/// Cookie carrying the cart token. Session-scoped on the client; the
/// server-side Redis TTL governs actual cart lifetime.
pub fn cart_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((CART_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Get the current cart
#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 200, description = "Cart content", body = CartDetails)
    )
)]
pub async fn get_cart(
    State(state): State<crate::AppState>,
    session: CartSession,
) -> AppResult<(CookieJar, Json<CartDetails>)> {
    let details = state.services.cart.get(&session.token).await?;

    let jar = CookieJar::new().add(cart_cookie(&session.token));
    Ok((jar, Json(details)))
}

/// Replace the quantity of one cart line
#[utoipa::path(
    put,
    path = "/cart/items/{book_id}",
    tag = "cart",
    params(("book_id" = i32, Path, description = "Book ID")),
    request_body = UpdateCartEntry,
    responses(
        (status = 200, description = "Updated cart", body = CartDetails),
        (status = 404, description = "Book not in cart"),
        (status = 422, description = "Invalid quantity")
    )
)]
pub async fn update_entry(
    State(state): State<crate::AppState>,
    session: CartSession,
    Path(book_id): Path<i32>,
    Json(request): Json<UpdateCartEntry>,
) -> AppResult<(CookieJar, Json<CartDetails>)> {
    let details = state
        .services
        .cart
        .set_quantity(&session.token, book_id, request.quantity)
        .await?;

    let jar = CookieJar::new().add(cart_cookie(&session.token));
    Ok((jar, Json(details)))
}

/// Remove one book from the cart
#[utoipa::path(
    delete,
    path = "/cart/items/{book_id}",
    tag = "cart",
    params(("book_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Updated cart", body = CartDetails),
        (status = 404, description = "Book not in cart")
    )
)]
pub async fn remove_entry(
    State(state): State<crate::AppState>,
    session: CartSession,
    Path(book_id): Path<i32>,
) -> AppResult<(CookieJar, Json<CartDetails>)> {
    let details = state.services.cart.remove(&session.token, book_id).await?;

    let jar = CookieJar::new().add(cart_cookie(&session.token));
    Ok((jar, Json(details)))
}

/// Empty the cart
#[utoipa::path(
    delete,
    path = "/cart",
    tag = "cart",
    responses(
        (status = 204, description = "Cart cleared")
    )
)]
pub async fn clear_cart(
    State(state): State<crate::AppState>,
    session: CartSession,
) -> AppResult<StatusCode> {
    state.services.cart.clear(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check the cart out into a borrow request. All-or-nothing: if any line
/// exceeds current availability, nothing is reserved. The cart is cleared
/// on success.
#[utoipa::path(
    post,
    path = "/cart/checkout",
    tag = "cart",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Borrow request created", body = BorrowRequestDetails),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Not enough copies available"),
        (status = 422, description = "Invalid borrow period")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    session: CartSession,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<BorrowRequestDetails>)> {
    let cart = state.services.cart.entries(&session.token).await?;

    let details = state
        .services
        .borrows
        .checkout(claims.user_id, cart, &request)
        .await?;

    // Only a committed reservation empties the cart
    state.services.cart.clear(&session.token).await?;

    Ok((StatusCode::CREATED, Json(details)))
}
