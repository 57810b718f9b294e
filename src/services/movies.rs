use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::movies::{CreateMovie, MovieListParams, MovieWithStats, NewMovie},
    queries::movies,
    validation::{sanitize_string, validate_title},
};

/// Lists movies with vote statistics as seen by `requester_id`
///
/// `requester_id` is `None` for anonymous requests; every `vote` is then
/// `null`.
pub async fn list_movies(
    conn: &mut DbConn,
    requester_id: Option<i64>,
    params: &MovieListParams,
) -> Result<Vec<MovieWithStats>> {
    let filter = params.filter()?;
    let ordering = params.ordering();

    movies::list_movies_with_stats(conn, requester_id, &filter, &ordering).await
}

/// Submits a new movie owned by `requester_id`
///
/// Returns the movie in its list shape, with no votes yet.
pub async fn create_movie(
    conn: &mut DbConn,
    requester_id: i64,
    create_movie: CreateMovie,
) -> Result<MovieWithStats> {
    let title = validate_title(create_movie.title.as_deref())?;
    let description = create_movie
        .description
        .as_deref()
        .map(sanitize_string)
        .unwrap_or_default();

    let new_movie = NewMovie {
        title,
        description,
        user_id: Some(requester_id),
    };

    let movie = movies::create_movie(conn, new_movie).await?;
    tracing::info!(movie_id = movie.id, user_id = requester_id, "Movie submitted");

    movies::get_movie_with_stats(conn, movie.id, Some(requester_id))
        .await?
        .ok_or_else(|| Error::Internal("Created movie disappeared".to_string()))
}
