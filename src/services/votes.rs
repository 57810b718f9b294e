use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::{
        movies::Movie,
        votes::{NewVote, Reaction, VoteListParams, VoteRequest, VoteWithUser},
    },
    queries::{
        movies,
        votes::{self, DUPLICATE_VOTE_MESSAGE},
    },
    validation::REQUIRED_MESSAGE,
};

pub const OWN_MOVIE_MESSAGE: &str = "You can not vote for movies you submitted.";

/// Parses the `reaction` body field. Values are matched exactly.
fn parse_reaction(raw: Option<&str>) -> Result<Reaction> {
    let raw = raw.ok_or_else(|| Error::field("reaction", REQUIRED_MESSAGE))?;
    raw.parse::<Reaction>()
        .map_err(|_| Error::field("reaction", format!("\"{}\" is not a valid choice.", raw)))
}

/// Rejects votes by the movie's own submitter
fn ensure_not_own_movie(movie: &Movie, requester_id: i64) -> Result<()> {
    if movie.user_id == Some(requester_id) {
        return Err(Error::non_field(OWN_MOVIE_MESSAGE));
    }
    Ok(())
}

async fn require_movie(conn: &mut DbConn, movie_id: i64) -> Result<Movie> {
    movies::get_movie_by_id(conn, movie_id)
        .await?
        .ok_or_else(|| Error::NotFound("Movie not found".to_string()))
}

async fn load_vote(conn: &mut DbConn, movie_id: i64, user_id: i64) -> Result<VoteWithUser> {
    votes::get_vote_with_user(conn, movie_id, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Vote not found".to_string()))
}

/// Lists the votes cast on a movie. An unknown movie has no votes.
pub async fn list_votes(
    conn: &mut DbConn,
    movie_id: i64,
    params: &VoteListParams,
) -> Result<Vec<VoteWithUser>> {
    let filter = params.filter()?;
    let ordering = params.ordering();

    votes::list_votes(conn, movie_id, &filter, &ordering).await
}

/// Casts the requester's vote on a movie
///
/// Checks run in order: the reaction is valid, the movie exists, the
/// requester did not submit it, and has not voted on it yet.
pub async fn create_vote(
    conn: &mut DbConn,
    movie_id: i64,
    requester_id: i64,
    request: VoteRequest,
) -> Result<VoteWithUser> {
    let reaction = parse_reaction(request.reaction.as_deref())?;
    let movie = require_movie(conn, movie_id).await?;

    ensure_not_own_movie(&movie, requester_id)?;

    if votes::get_vote(conn, movie_id, requester_id).await?.is_some() {
        return Err(Error::non_field(DUPLICATE_VOTE_MESSAGE));
    }

    // A concurrent duplicate still trips the (user_id, movie_id) constraint
    let vote = votes::create_vote(
        conn,
        NewVote {
            user_id: requester_id,
            movie_id,
            reaction,
        },
    )
    .await?;
    tracing::info!(vote_id = vote.id, movie_id, user_id = requester_id, reaction = %reaction, "Vote cast");

    load_vote(conn, movie_id, requester_id).await
}

/// Changes the requester's own vote on a movie
///
/// With `partial` set the reaction may be omitted and the vote is returned
/// unchanged.
pub async fn update_vote(
    conn: &mut DbConn,
    movie_id: i64,
    requester_id: i64,
    request: VoteRequest,
    partial: bool,
) -> Result<VoteWithUser> {
    let vote = votes::get_vote(conn, movie_id, requester_id)
        .await?
        .ok_or_else(|| Error::NotFound("Vote not found".to_string()))?;

    let movie = require_movie(conn, movie_id).await?;
    ensure_not_own_movie(&movie, requester_id)?;

    let reaction = match (request.reaction.as_deref(), partial) {
        (None, true) => None,
        (raw, _) => Some(parse_reaction(raw)?),
    };

    if let Some(reaction) = reaction {
        votes::update_vote_reaction(conn, vote.id, reaction).await?;
        tracing::info!(vote_id = vote.id, reaction = %reaction, "Vote updated");
    }

    load_vote(conn, movie_id, requester_id).await
}

/// Withdraws the requester's own vote on a movie
pub async fn delete_vote(conn: &mut DbConn, movie_id: i64, requester_id: i64) -> Result<()> {
    let removed = votes::delete_vote(conn, movie_id, requester_id).await?;
    if removed == 0 {
        return Err(Error::NotFound("Vote not found".to_string()));
    }

    tracing::info!(movie_id, user_id = requester_id, "Vote withdrawn");
    Ok(())
}
