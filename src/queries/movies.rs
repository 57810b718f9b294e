use sqlx::QueryBuilder;

use crate::{
    database::{Db, DbConn},
    error::{Error, Result},
    listing::OrderingParam,
    models::movies::{
        Movie, MovieFilter, MovieOrderField, MovieStatsRow, MovieWithStats, NewMovie,
    },
};

use super::unique_violation;

const MOVIE_COLUMNS: &str = "id, title, description, user_id, created, updated";

/// Creates a new movie in the database.
pub async fn create_movie(conn: &mut DbConn, new_movie: NewMovie) -> Result<Movie> {
    let movie = sqlx::query_as::<_, Movie>(&format!(
        r#"
        INSERT INTO movies (title, description, user_id)
        VALUES (?, ?, ?)
        RETURNING {MOVIE_COLUMNS}
        "#
    ))
    .bind(new_movie.title)
    .bind(new_movie.description)
    .bind(new_movie.user_id)
    .fetch_one(conn)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some(msg) if msg.contains("movies.title") => {
            Error::field("title", "movie with this title already exists.")
        }
        _ => Error::Sqlx(e),
    })?;

    Ok(movie)
}

/// Gets a single movie by its ID. The movie may not exist.
pub async fn get_movie_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Movie>> {
    let movie = sqlx::query_as::<_, Movie>(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(movie)
}

/// Starts the movie read model: each movie with its submitter, like and
/// hate counts, and the requester's own reaction.
///
/// The requester's reaction is a correlated scalar subquery limited to one
/// row, so it can never multiply movie rows.
fn movie_stats_query(requester_id: Option<i64>) -> QueryBuilder<'static, Db> {
    let mut builder = QueryBuilder::<Db>::new(
        r#"
        SELECT m.id, m.title, m.description, m.created, m.user_id,
               u.first_name AS submitter_first_name,
               u.last_name AS submitter_last_name,
               u.username AS submitter_username,
               u.email AS submitter_email,
               (SELECT COUNT(*) FROM votes v WHERE v.movie_id = m.id AND v.reaction = 'like') AS likes,
               (SELECT COUNT(*) FROM votes v WHERE v.movie_id = m.id AND v.reaction = 'hate') AS hates,
        "#,
    );

    match requester_id {
        Some(user_id) => {
            builder
                .push("(SELECT v.reaction FROM votes v WHERE v.movie_id = m.id AND v.user_id = ")
                .push_bind(user_id)
                .push(" LIMIT 1) AS vote");
        }
        None => {
            builder.push("NULL AS vote");
        }
    }

    builder.push(
        r#"
        FROM movies m
        LEFT JOIN users u ON u.id = m.user_id
        WHERE 1 = 1
        "#,
    );

    builder
}

/// Lists movies with vote statistics, filtered and ordered as requested.
///
/// `requester_id` is the authenticated user whose own reaction fills the
/// `vote` field; `None` for anonymous requests.
pub async fn list_movies_with_stats(
    conn: &mut DbConn,
    requester_id: Option<i64>,
    filter: &MovieFilter,
    ordering: &OrderingParam<MovieOrderField>,
) -> Result<Vec<MovieWithStats>> {
    let mut builder = movie_stats_query(requester_id);

    if let Some(user_id) = filter.user_id {
        builder.push(" AND m.user_id = ").push_bind(user_id);
    }

    ordering.push_order_by(&mut builder, "m.id");

    let rows = builder
        .build_query_as::<MovieStatsRow>()
        .fetch_all(conn)
        .await?;

    rows.into_iter().map(MovieWithStats::try_from).collect()
}

/// Gets one movie with vote statistics as seen by `requester_id`.
pub async fn get_movie_with_stats(
    conn: &mut DbConn,
    id: i64,
    requester_id: Option<i64>,
) -> Result<Option<MovieWithStats>> {
    let mut builder = movie_stats_query(requester_id);
    builder.push(" AND m.id = ").push_bind(id);

    let row = builder
        .build_query_as::<MovieStatsRow>()
        .fetch_optional(conn)
        .await?;

    row.map(MovieWithStats::try_from).transpose()
}

/// Deletes a movie; its votes go with it.
pub async fn delete_movie(conn: &mut DbConn, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM movies WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

