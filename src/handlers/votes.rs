//! Vote handlers
//!
//! A requester has at most one vote per movie, so update and delete address
//! it by movie id alone. Every route here requires authentication.

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use crate::{
    error::{Error, Result},
    handlers::extract::{IdPath, JsonBody},
    middleware::auth::Requester,
    models::votes::{VoteListParams, VoteRequest, VoteWithUser},
    services::votes,
    state::AppState,
};

/// GET /api/movies/{movie_id}/votes
///
/// # Query Parameters
/// - `reaction`: `like` or `hate`
/// - `ordering`: `created` or `-created` (default)
pub async fn list_votes(
    State(state): State<AppState>,
    IdPath(movie_id): IdPath,
    Query(params): Query<VoteListParams>,
) -> Result<Json<Vec<VoteWithUser>>> {
    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let votes = votes::list_votes(&mut conn, movie_id, &params).await?;

    Ok(Json(votes))
}

/// POST /api/movies/{movie_id}/votes
///
/// # HTTP Status Codes
/// - `201 CREATED`: Vote cast
/// - `400 BAD_REQUEST`: Invalid reaction, own movie, or already voted
/// - `404 NOT_FOUND`: Movie not found
pub async fn create_vote(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    IdPath(movie_id): IdPath,
    JsonBody(request): JsonBody<VoteRequest>,
) -> Result<(StatusCode, Json<VoteWithUser>)> {
    let user_id = requester.require_user_id()?;

    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let vote = votes::create_vote(&mut conn, movie_id, user_id, request).await?;

    Ok((StatusCode::CREATED, Json(vote)))
}

/// PUT /api/movies/{movie_id}/votes
///
/// Replaces the requester's reaction. `reaction` is required.
///
/// # HTTP Status Codes
/// - `200 OK`: Vote updated
/// - `400 BAD_REQUEST`: Invalid reaction or own movie
/// - `404 NOT_FOUND`: The requester has not voted on this movie
pub async fn update_vote(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    IdPath(movie_id): IdPath,
    JsonBody(request): JsonBody<VoteRequest>,
) -> Result<Json<VoteWithUser>> {
    let user_id = requester.require_user_id()?;

    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let vote = votes::update_vote(&mut conn, movie_id, user_id, request, false).await?;

    Ok(Json(vote))
}

/// PATCH /api/movies/{movie_id}/votes
///
/// Like PUT, but `reaction` may be omitted.
pub async fn partial_update_vote(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    IdPath(movie_id): IdPath,
    JsonBody(request): JsonBody<VoteRequest>,
) -> Result<Json<VoteWithUser>> {
    let user_id = requester.require_user_id()?;

    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    let vote = votes::update_vote(&mut conn, movie_id, user_id, request, true).await?;

    Ok(Json(vote))
}

/// DELETE /api/movies/{movie_id}/votes
///
/// # HTTP Status Codes
/// - `204 NO_CONTENT`: Vote withdrawn
/// - `404 NOT_FOUND`: The requester has not voted on this movie
pub async fn delete_vote(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    IdPath(movie_id): IdPath,
) -> Result<StatusCode> {
    let user_id = requester.require_user_id()?;

    let mut conn = state.pool.acquire().await
        .map_err(|e| Error::Internal(format!("Failed to acquire database connection: {}", e)))?;

    votes::delete_vote(&mut conn, movie_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
