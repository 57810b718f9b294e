//! Movie handlers

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use crate::{
    error::{Error, Result},
    handlers::extract::JsonBody,
    middleware::auth::Requester,
    models::movies::{CreateMovie, MovieListParams, MovieWithStats},
    services::movies,
    state::AppState,
};

/// GET /api/movies
///
/// Lists movies with their like and hate counts. For an authenticated
/// requester each movie also carries their own `vote`.
///
/// # Query Parameters
/// - `ordering`: `created` (default `-created`), `title`, `likes`, `hates`
/// - `user_id`: Only movies submitted by this user
///
/// # HTTP Status Codes
/// - `200 OK`: Movies retrieved
/// - `400 BAD_REQUEST`: `user_id` is not a number
pub async fn list_movies(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Query(params): Query<MovieListParams>,
) -> Result<Json<Vec<MovieWithStats>>> {
    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let movies = movies::list_movies(&mut conn, requester.user_id(), &params).await?;

    Ok(Json(movies))
}

/// POST /api/movies
///
/// Submits a movie owned by the authenticated user.
///
/// # Request Body
/// - `title`: Unique, at most 150 characters
/// - `description`: Optional
///
/// # HTTP Status Codes
/// - `201 CREATED`: Movie submitted
/// - `400 BAD_REQUEST`: Invalid or duplicate title
/// - `401 UNAUTHORIZED`: Not logged in
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    JsonBody(request): JsonBody<CreateMovie>,
) -> Result<(StatusCode, Json<MovieWithStats>)> {
    let user_id = requester.require_user_id()?;

    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let movie = movies::create_movie(&mut conn, user_id, request).await?;

    Ok((StatusCode::CREATED, Json(movie)))
}
