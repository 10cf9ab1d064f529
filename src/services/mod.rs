//! Business logic services

pub mod borrows;
pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod redis;
pub mod reviews;
pub mod users;

use crate::{
    config::{AuthConfig, CartConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub cart: cart::CartService,
    pub borrows: borrows::BorrowsService,
    pub favorites: favorites::FavoritesService,
    pub reviews: reviews::ReviewsService,
    pub redis: redis::RedisService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        cart_config: CartConfig,
        redis_service: redis::RedisService,
    ) -> AppResult<Self> {
        Ok(Self {
            users: users::UsersService::new(
                repository.clone(),
                auth_config,
                redis_service.clone(),
            ),
            catalog: catalog::CatalogService::new(repository.clone()),
            cart: cart::CartService::new(repository.clone(), redis_service.clone(), cart_config),
            borrows: borrows::BorrowsService::new(repository.clone()),
            favorites: favorites::FavoritesService::new(repository.clone()),
            reviews: reviews::ReviewsService::new(repository),
            redis: redis_service,
        })
    }
}
