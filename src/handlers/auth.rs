//! Token handlers
//!
//! Clients obtain an access/refresh JWT pair with their credentials and send
//! the access token as `Authorization: Bearer <access>`.

use axum::{extract::State, Json};
use crate::{
    error::{Error, Result},
    handlers::extract::JsonBody,
    models::users::{LoginUser, RefreshTokenRequest, TokenPair},
    services::users,
    state::AppState,
};

/// POST /api/token
///
/// Authenticates a user with username and password.
///
/// # Request Body
/// - `username`: User's username
/// - `password`: User's password
///
/// # Returns
/// JSON response containing:
/// - `access`: JWT access token (5 minute expiration by default)
/// - `refresh`: JWT refresh token (1 day expiration by default)
///
/// # HTTP Status Codes
/// - `200 OK`: Authentication successful
/// - `400 BAD_REQUEST`: Missing username or password
/// - `401 UNAUTHORIZED`: Invalid username or password
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn obtain_token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginUser>,
) -> Result<Json<TokenPair>> {
    let mut conn = state.pool.acquire().await.map_err(|e| {
        Error::Internal(format!("Failed to acquire database connection: {}", e))
    })?;

    let tokens = users::login_user(&mut conn, request, &state.config.jwt).await?;

    Ok(Json(tokens))
}

/// POST /api/token/refresh
///
/// Exchanges a refresh token for a new access/refresh pair. The old refresh
/// token stays valid until it expires.
///
/// # HTTP Status Codes
/// - `200 OK`: New token pair issued
/// - `400 BAD_REQUEST`: Missing `refresh`
/// - `401 UNAUTHORIZED`: Refresh token invalid, expired, or of a deleted user
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> Result<Json<TokenPair>> {
    let mut conn = state.pool.acquire().await.map_err(|e| {
        Error::Internal(format!("Failed to acquire database connection: {}", e))
    })?;

    let tokens = users::refresh_tokens(&mut conn, request, &state.config.jwt).await?;

    Ok(Json(tokens))
}
