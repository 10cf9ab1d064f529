//! Book endpoints: browsing, search, rankings, borrowing, favorites, reviews

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    error::AppResult,
    models::{
        book::{
            Book, BookDetails, BookQuery, BookSearchQuery, BookShort, CreateBook,
            MostBorrowedQuery, RankedBook, UpdateBook,
        },
        borrow::{AddToCart, CartDetails},
        favorite::FavorableKind,
        review::{CreateReview, Review},
    },
};

use super::{cart::cart_cookie, AuthenticatedUser, CartSession, PaginatedResponse};

/// List books with optional author filter and sort order
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("author_id" = Option<i32>, Query, description = "Filter by author"),
        ("sort" = Option<String>, Query, description = "Sort: recent or recommended"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "List of books", body = PaginatedResponse<BookShort>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let (books, total) = state.services.catalog.list_books(&query).await?;

    Ok(Json(PaginatedResponse {
        items: books,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Search books by title, author, publisher or category.
/// An unrecognized search_type behaves as `all`.
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(
        ("q" = Option<String>, Query, description = "Search term"),
        ("search_type" = Option<String>, Query,
            description = "Scope: title, author, publisher, category or all (default)"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Items per page (default: 20)")
    ),
    responses(
        (status = 200, description = "Matching books", body = PaginatedResponse<BookShort>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<PaginatedResponse<BookShort>>> {
    let (books, total) = state.services.catalog.search_books(&query).await?;

    Ok(Json(PaginatedResponse {
        items: books,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Books ranked by borrowed quantity, optionally windowed by year/month
#[utoipa::path(
    get,
    path = "/books/most-borrowed",
    tag = "books",
    params(
        ("year" = Option<i32>, Query, description = "Restrict to this calendar year"),
        ("month" = Option<u32>, Query, description = "Restrict to this month (1-12)"),
        ("limit" = Option<i64>, Query, description = "Number of books (default: 10)")
    ),
    responses(
        (status = 200, description = "Ranked books", body = Vec<RankedBook>),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn most_borrowed(
    State(state): State<crate::AppState>,
    Query(query): Query<MostBorrowedQuery>,
) -> AppResult<Json<Vec<RankedBook>>> {
    let ranked = state.services.borrows.most_borrowed(&query).await?;
    Ok(Json(ranked))
}

/// Get book details with author, publisher, categories, reviews and rating
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let details = state.services.catalog.get_book(id).await?;
    Ok(Json(details))
}

/// Put a book into the borrow cart. Re-borrowing a book already in the
/// cart adds to its quantity. Works without authentication; the cart
/// travels in its own cookie.
#[utoipa::path(
    post,
    path = "/books/{id}/borrow",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = AddToCart,
    responses(
        (status = 200, description = "Updated cart", body = CartDetails),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid quantity")
    )
)]
pub async fn borrow(
    State(state): State<crate::AppState>,
    session: CartSession,
    Path(id): Path<i32>,
    Json(request): Json<AddToCart>,
) -> AppResult<(CookieJar, Json<CartDetails>)> {
    let details = state
        .services
        .cart
        .add(&session.token, id, request.quantity)
        .await?;

    let jar = CookieJar::new().add(cart_cookie(&session.token));
    Ok((jar, Json(details)))
}

/// Favorite a book
#[utoipa::path(
    post,
    path = "/books/{id}/favorite",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 201, description = "Book favorited"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Already a favorite")
    )
)]
pub async fn add_favorite(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .favorites
        .add(claims.user_id, FavorableKind::Book, id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Remove a book from favorites
#[utoipa::path(
    delete,
    path = "/books/{id}/favorite",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "Favorite not found")
    )
)]
pub async fn remove_favorite(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .favorites
        .remove(claims.user_id, FavorableKind::Book, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reviews of a book, newest first
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Reviews", body = Vec<Review>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.services.reviews.list_for_book(id).await?;
    Ok(Json(reviews))
}

/// Review a book (one review per user per book)
#[utoipa::path(
    post,
    path = "/books/{id}/reviews",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book already reviewed"),
        (status = 422, description = "Invalid score or comment")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state
        .services
        .reviews
        .create(id, claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Delete the caller's review of a book
#[utoipa::path(
    delete,
    path = "/books/{id}/reviews",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new book (admin)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Author, publisher or category not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;

    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book (admin)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_admin()?;

    let updated = state.services.catalog.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book (admin); blocked while borrow requests reference it
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Borrow requests reference this book")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
