//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, borrows, cart, categories, health, publishers, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "1.0.0",
        description = "Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        auth::update_profile,
        auth::oauth_exchange,
        auth::oauth_register,
        // Books
        books::list_books,
        books::search_books,
        books::most_borrowed,
        books::get_book,
        books::borrow,
        books::add_favorite,
        books::remove_favorite,
        books::list_reviews,
        books::create_review,
        books::delete_review,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::follow_author,
        authors::unfollow_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Cart
        cart::get_cart,
        cart::update_entry,
        cart::remove_entry,
        cart::clear_cart,
        cart::checkout,
        // Borrows
        borrows::list_my_borrows,
        borrows::get_borrow,
        // Users
        users::my_favorite_books,
        users::my_followed_authors,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            auth::OAuthExchangeResponse,
            crate::models::user::RegisterRequest,
            crate::models::user::UpdateProfile,
            crate::models::user::OAuthProfile,
            crate::models::user::OAuthRegisterRequest,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::BookShort,
            crate::models::book::BookDetails,
            crate::models::book::RankedBook,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::SearchType,
            // Authors
            authors::AuthorDetails,
            crate::models::author::Author,
            crate::models::author::AuthorShort,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Publishers
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::publisher::UpdatePublisher,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Favorites
            crate::models::favorite::Favorite,
            crate::models::favorite::FavorableKind,
            crate::models::favorite::FavoriteBookStats,
            crate::models::favorite::FollowedAuthorStats,
            users::FavoriteBooksResponse,
            users::FollowedAuthorsResponse,
            // Reviews
            crate::models::review::Review,
            crate::models::review::CreateReview,
            // Cart and borrows
            crate::models::borrow::CartEntry,
            crate::models::borrow::CartEntryDetails,
            crate::models::borrow::CartDetails,
            crate::models::borrow::AddToCart,
            crate::models::borrow::UpdateCartEntry,
            crate::models::borrow::CheckoutRequest,
            crate::models::borrow::BorrowRequest,
            crate::models::borrow::BorrowRequestItem,
            crate::models::borrow::BorrowRequestItemDetails,
            crate::models::borrow::BorrowRequestDetails,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog, borrowing and reviews"),
        (name = "authors", description = "Author browsing and follows"),
        (name = "publishers", description = "Publisher management"),
        (name = "categories", description = "Category management"),
        (name = "cart", description = "Borrow cart"),
        (name = "borrows", description = "Borrow request history"),
        (name = "users", description = "User favorites and follows")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
