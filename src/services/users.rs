//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::{AdminConfig, AuthConfig},
    error::{AppError, AppResult},
    models::user::{
        OAuthProfile, OAuthRegisterRequest, RegisterRequest, Role, UpdateProfile, User, UserClaims,
    },
    repository::{users::NewUser, Repository},
};

/// Result of an OAuth exchange: either a signed-in user or pre-fill data
/// for a registration form
pub enum OAuthExchange {
    SignedIn { token: String, user: User },
    NeedsRegistration { signup_token: String, profile: OAuthProfile },
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
    redis: crate::services::redis::RedisService,
}

impl UsersService {
    pub fn new(
        repository: Repository,
        config: AuthConfig,
        redis: crate::services::redis::RedisService,
    ) -> Self {
        Self {
            repository,
            config,
            redis,
        }
    }

    /// Register a new member account
    pub async fn register(&self, request: RegisterRequest) -> AppResult<(String, User)> {
        request.validate()?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .repository
            .users
            .create(NewUser {
                name: request.name,
                email: request.email,
                password_hash: Some(password_hash),
                role: Role::Member,
                gender: request.gender,
                date_of_birth: request.date_of_birth,
                provider: None,
                provider_uid: None,
            })
            .await?;

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Authenticate by email and password, returning a JWT token
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        let valid = user
            .password_hash
            .as_deref()
            .map(|hash| Self::verify_password(hash, password))
            .unwrap_or(false);
        if !valid {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Identity-provider boundary: a provider-verified profile either signs
    /// an existing user in, or is parked under a one-time signup token for
    /// the registration form
    pub async fn oauth_exchange(&self, profile: OAuthProfile) -> AppResult<OAuthExchange> {
        profile.validate()?;

        if let Some(user) = self.repository.users.get_by_email(&profile.email).await? {
            let token = self.create_token_for_user(&user)?;
            return Ok(OAuthExchange::SignedIn { token, user });
        }

        let signup_token = Uuid::new_v4().to_string();
        self.redis
            .store_signup_profile(&signup_token, &profile)
            .await?;

        Ok(OAuthExchange::NeedsRegistration {
            signup_token,
            profile,
        })
    }

    /// Complete a registration started by an OAuth exchange; consumes the
    /// signup token
    pub async fn oauth_register(&self, request: OAuthRegisterRequest) -> AppResult<(String, User)> {
        request.validate()?;

        let profile = self
            .redis
            .consume_signup_profile(&request.signup_token)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Signup token is invalid or has expired".to_string())
            })?;

        if self.repository.users.email_exists(&profile.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let user = self
            .repository
            .users
            .create(NewUser {
                name: request.name,
                email: profile.email,
                password_hash: None,
                role: Role::Member,
                gender: request.gender,
                date_of_birth: request.date_of_birth,
                provider: Some(profile.provider),
                provider_uid: Some(profile.uid),
            })
            .await?;

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create the bootstrap administrator account unless it already exists
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> AppResult<()> {
        if self.repository.users.email_exists(&admin.email).await? {
            return Ok(());
        }

        let password_hash = self.hash_password(&admin.password)?;
        self.repository
            .users
            .create(NewUser {
                name: admin.name.clone(),
                email: admin.email.clone(),
                password_hash: Some(password_hash),
                role: Role::Admin,
                gender: None,
                date_of_birth: None,
                provider: None,
                provider_uid: None,
            })
            .await?;

        tracing::info!("Created bootstrap admin account {}", admin.email);
        Ok(())
    }

    /// Update the caller's profile. Blank password fields leave the
    /// password unchanged; a non-blank password must match its confirmation.
    pub async fn update_profile(&self, user_id: i32, update: UpdateProfile) -> AppResult<User> {
        update.validate()?;

        let password = update.password.as_deref().filter(|p| !p.is_empty());
        let password_hash = match password {
            Some(password) => {
                let confirmation = update
                    .password_confirmation
                    .as_deref()
                    .filter(|p| !p.is_empty());
                if confirmation != Some(password) {
                    return Err(AppError::Validation(
                        "Password confirmation does not match".to_string(),
                    ));
                }
                Some(self.hash_password(password)?)
            }
            None => None,
        };

        self.repository
            .users
            .update_profile(
                user_id,
                update.name.as_deref(),
                update.gender.as_deref(),
                update.date_of_birth,
                password_hash.as_deref(),
            )
            .await
    }

    /// Create a JWT token for a user
    pub fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(hash: &str, password: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
