use sqlx::QueryBuilder;

use crate::{
    database::{Db, DbConn},
    error::{Error, Result},
    listing::OrderingParam,
    models::votes::{NewVote, Reaction, Vote, VoteFilter, VoteOrderField, VoteWithUser},
};

use super::unique_violation;

const VOTE_COLUMNS: &str = "id, user_id, movie_id, reaction, created";

const VOTE_WITH_USER_SELECT: &str = r#"
    SELECT v.reaction, v.created,
           u.id, u.first_name, u.last_name, u.username, u.email
    FROM votes v
    JOIN users u ON u.id = v.user_id
"#;

pub const DUPLICATE_VOTE_MESSAGE: &str = "You can not vote for this movie twice.";

/// Creates a new vote. A second vote by the same user on the same movie
/// violates the `(user_id, movie_id)` constraint and is reported as a
/// duplicate vote.
pub async fn create_vote(conn: &mut DbConn, new_vote: NewVote) -> Result<Vote> {
    let vote = sqlx::query_as::<_, Vote>(&format!(
        r#"
        INSERT INTO votes (user_id, movie_id, reaction)
        VALUES (?, ?, ?)
        RETURNING {VOTE_COLUMNS}
        "#
    ))
    .bind(new_vote.user_id)
    .bind(new_vote.movie_id)
    .bind(new_vote.reaction.to_string())
    .fetch_one(conn)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some(_) => Error::non_field(DUPLICATE_VOTE_MESSAGE),
        None => Error::Sqlx(e),
    })?;

    Ok(vote)
}

/// Gets the vote `user_id` cast on `movie_id`, if any.
pub async fn get_vote(conn: &mut DbConn, movie_id: i64, user_id: i64) -> Result<Option<Vote>> {
    let vote = sqlx::query_as::<_, Vote>(&format!(
        "SELECT {VOTE_COLUMNS} FROM votes WHERE movie_id = ? AND user_id = ?"
    ))
    .bind(movie_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;

    Ok(vote)
}

/// Gets the vote `user_id` cast on `movie_id` with the voter embedded.
pub async fn get_vote_with_user(
    conn: &mut DbConn,
    movie_id: i64,
    user_id: i64,
) -> Result<Option<VoteWithUser>> {
    let vote = sqlx::query_as::<_, VoteWithUser>(&format!(
        "{VOTE_WITH_USER_SELECT} WHERE v.movie_id = ? AND v.user_id = ?"
    ))
    .bind(movie_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;

    Ok(vote)
}

/// Lists the votes on a movie, filtered and ordered as requested.
pub async fn list_votes(
    conn: &mut DbConn,
    movie_id: i64,
    filter: &VoteFilter,
    ordering: &OrderingParam<VoteOrderField>,
) -> Result<Vec<VoteWithUser>> {
    let mut builder = QueryBuilder::<Db>::new(VOTE_WITH_USER_SELECT);
    builder.push(" WHERE v.movie_id = ").push_bind(movie_id);

    if let Some(reaction) = filter.reaction {
        builder.push(" AND v.reaction = ").push_bind(reaction.to_string());
    }

    ordering.push_order_by(&mut builder, "v.id");

    let votes = builder
        .build_query_as::<VoteWithUser>()
        .fetch_all(conn)
        .await?;

    Ok(votes)
}

/// Changes the reaction of an existing vote.
pub async fn update_vote_reaction(conn: &mut DbConn, id: i64, reaction: Reaction) -> Result<Vote> {
    let vote = sqlx::query_as::<_, Vote>(&format!(
        "UPDATE votes SET reaction = ? WHERE id = ? RETURNING {VOTE_COLUMNS}"
    ))
    .bind(reaction.to_string())
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| Error::NotFound("Vote not found".to_string()))?;

    Ok(vote)
}

/// Deletes the vote `user_id` cast on `movie_id`. Returns the number of
/// removed rows (0 or 1).
pub async fn delete_vote(conn: &mut DbConn, movie_id: i64, user_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM votes WHERE movie_id = ? AND user_id = ?")
        .bind(movie_id)
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Counts all votes on a movie regardless of reaction.
pub async fn count_votes(conn: &mut DbConn, movie_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes WHERE movie_id = ?")
        .bind(movie_id)
        .fetch_one(conn)
        .await?;

    Ok(count)
}
