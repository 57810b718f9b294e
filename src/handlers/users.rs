//! User handlers
//!
//! Registration and the public user directory. None of these routes need a
//! logged-in user.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use crate::{
    error::{Error, Result},
    handlers::extract::{IdPath, JsonBody},
    models::users::{PublicUser, RegisterUser, UserListParams},
    services::users,
    state::AppState,
};

/// GET /api/users
///
/// Lists all users, newest first unless `?ordering=` says otherwise
/// (`first_name`, `last_name`, `created`, each optionally prefixed with `-`).
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> Result<Json<Vec<PublicUser>>> {
    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let users = users::list_users(&mut conn, &params).await?;

    Ok(Json(users))
}

/// POST /api/users
///
/// Registers a new user.
///
/// # Request Body
/// - `first_name`, `last_name`: Required, at most 150 characters
/// - `username`: Unique, letters, digits and `@ . + - _`
/// - `email`: Unique, valid email address
/// - `password`: Required, stored as an Argon2 hash
///
/// # HTTP Status Codes
/// - `201 CREATED`: User registered
/// - `400 BAD_REQUEST`: One or more invalid fields, all reported together
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let user = users::register_user(&mut conn, request).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{id}
///
/// # HTTP Status Codes
/// - `200 OK`: User found
/// - `404 NOT_FOUND`: No user with this id
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<Json<PublicUser>> {
    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let user = users::get_user(&mut conn, user_id).await?;

    Ok(Json(user))
}
