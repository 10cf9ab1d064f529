//! Redis service for borrow carts and transient signup data

use redis::{AsyncCommands, Client};

use crate::{
    error::{AppError, AppResult},
    models::{borrow::Cart, user::OAuthProfile},
};

/// Pending OAuth signups are parked for 15 minutes
const SIGNUP_TTL_SECONDS: u64 = 15 * 60;

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    /// Load a borrow cart; an unknown or expired token yields an empty cart
    pub async fn get_cart(&self, token: &str) -> AppResult<Cart> {
        let mut conn = self.connection().await?;

        let key = format!("cart:{}", token);
        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read cart from Redis: {}", e)))?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::Internal(format!("Corrupt cart payload: {}", e))),
            None => Ok(Cart::default()),
        }
    }

    /// Store a borrow cart, refreshing its idle TTL
    pub async fn put_cart(&self, token: &str, cart: &Cart, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let key = format!("cart:{}", token);
        let json = serde_json::to_string(cart)
            .map_err(|e| AppError::Internal(format!("Failed to encode cart: {}", e)))?;
        conn.set_ex::<_, _, ()>(&key, json, ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store cart in Redis: {}", e)))?;

        Ok(())
    }

    /// Drop a borrow cart (explicit clear or successful checkout)
    pub async fn delete_cart(&self, token: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let key = format!("cart:{}", token);
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete cart from Redis: {}", e)))?;

        Ok(())
    }

    /// Park identity-provider profile data under a one-time signup token
    pub async fn store_signup_profile(
        &self,
        signup_token: &str,
        profile: &OAuthProfile,
    ) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let key = format!("signup:{}", signup_token);
        let json = serde_json::to_string(profile)
            .map_err(|e| AppError::Internal(format!("Failed to encode signup profile: {}", e)))?;
        conn.set_ex::<_, _, ()>(&key, json, SIGNUP_TTL_SECONDS)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to store signup profile in Redis: {}", e))
            })?;

        Ok(())
    }

    /// Fetch and delete the parked profile (one-time use)
    pub async fn consume_signup_profile(
        &self,
        signup_token: &str,
    ) -> AppResult<Option<OAuthProfile>> {
        let mut conn = self.connection().await?;

        let key = format!("signup:{}", signup_token);
        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read signup profile: {}", e)))?;

        match raw {
            Some(json) => {
                let _: () = conn.del(&key).await.map_err(|e| {
                    AppError::Internal(format!("Failed to delete signup profile: {}", e))
                })?;
                let profile = serde_json::from_str(&json)
                    .map_err(|e| AppError::Internal(format!("Corrupt signup payload: {}", e)))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
