//! Authentication and profile endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{
        OAuthProfile, OAuthRegisterRequest, RegisterRequest, Role, UpdateProfile, User,
    },
    services::users::OAuthExchange,
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User profile returned by auth endpoints
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            gender: user.gender,
            date_of_birth: user.date_of_birth,
        }
    }
}

/// Login / registration response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

impl LoginResponse {
    fn new(token: String, user: User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            user: user.into(),
        }
    }
}

/// Outcome of an OAuth exchange
#[derive(Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OAuthExchangeResponse {
    /// Email already known: the user is signed in
    SignedIn { token: String, user: UserInfo },
    /// Unknown email: complete registration with the pre-filled profile
    RegistrationRequired {
        signup_token: String,
        profile: OAuthProfile,
    },
}

/// Register a new member account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = LoginResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let (token, user) = state.services.users.register(request).await?;
    Ok((StatusCode::CREATED, Json(LoginResponse::new(token, user))))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .users
        .authenticate(&request.email, &request.password)
        .await?;
    Ok(Json(LoginResponse::new(token, user)))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user.into()))
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/auth/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserInfo),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<UserInfo>> {
    let user = state
        .services
        .users
        .update_profile(claims.user_id, request)
        .await?;
    Ok(Json(user.into()))
}

/// Exchange a provider-verified OAuth profile for a session or a
/// registration pre-fill
#[utoipa::path(
    post,
    path = "/auth/oauth/exchange",
    tag = "auth",
    request_body = OAuthProfile,
    responses(
        (status = 200, description = "Signed in or registration required", body = OAuthExchangeResponse),
        (status = 422, description = "Invalid profile data")
    )
)]
pub async fn oauth_exchange(
    State(state): State<crate::AppState>,
    Json(profile): Json<OAuthProfile>,
) -> AppResult<Json<OAuthExchangeResponse>> {
    let response = match state.services.users.oauth_exchange(profile).await? {
        OAuthExchange::SignedIn { token, user } => OAuthExchangeResponse::SignedIn {
            token,
            user: user.into(),
        },
        OAuthExchange::NeedsRegistration {
            signup_token,
            profile,
        } => OAuthExchangeResponse::RegistrationRequired {
            signup_token,
            profile,
        },
    };
    Ok(Json(response))
}

/// Complete a registration started by an OAuth exchange
#[utoipa::path(
    post,
    path = "/auth/register/oauth",
    tag = "auth",
    request_body = OAuthRegisterRequest,
    responses(
        (status = 201, description = "Account created", body = LoginResponse),
        (status = 400, description = "Signup token invalid or expired"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn oauth_register(
    State(state): State<crate::AppState>,
    Json(request): Json<OAuthRegisterRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let (token, user) = state.services.users.oauth_register(request).await?;
    Ok((StatusCode::CREATED, Json(LoginResponse::new(token, user))))
}
