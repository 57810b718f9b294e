use movierama::{
    error::{Error, NON_FIELD_ERRORS},
    models::votes::{Reaction, VoteRequest},
    services::votes::{create_vote, delete_vote, update_vote},
};

use crate::common::TestDb;

fn request(reaction: Option<&str>) -> VoteRequest {
    VoteRequest {
        reaction: reaction.map(str::to_string),
    }
}

fn non_field_message(result: Result<impl std::fmt::Debug, Error>) -> String {
    match result {
        Err(Error::Validation(errors)) => errors
            .into_fields()
            .remove(NON_FIELD_ERRORS)
            .unwrap_or_default(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submitter_can_never_vote() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let mut conn = test_db.get_connection().await;

    let result = create_vote(&mut conn, movie.id, alice.id, request(Some("like"))).await;
    assert_eq!(non_field_message(result), "You can not vote for movies you submitted.");
}

#[tokio::test]
async fn test_self_vote_check_runs_before_duplicate_check() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    // A vote that predates the rule
    test_db.create_vote(alice.id, movie.id, Reaction::Like).await;
    let mut conn = test_db.get_connection().await;

    let result = create_vote(&mut conn, movie.id, alice.id, request(Some("hate"))).await;
    assert_eq!(non_field_message(result), "You can not vote for movies you submitted.");

    let result = update_vote(&mut conn, movie.id, alice.id, request(Some("hate")), false).await;
    assert_eq!(non_field_message(result), "You can not vote for movies you submitted.");
}

#[tokio::test]
async fn test_duplicate_vote_rejected() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let mut conn = test_db.get_connection().await;

    let vote = create_vote(&mut conn, movie.id, bob.id, request(Some("like"))).await.unwrap();
    assert_eq!(vote.reaction, Reaction::Like);
    assert_eq!(vote.user.id, bob.id);

    let result = create_vote(&mut conn, movie.id, bob.id, request(Some("like"))).await;
    assert_eq!(non_field_message(result), "You can not vote for this movie twice.");
}

#[tokio::test]
async fn test_unknown_movie_is_not_found() {
    let test_db = TestDb::new().await;
    let bob = test_db.create_user("bob").await;
    let mut conn = test_db.get_connection().await;

    assert!(matches!(
        create_vote(&mut conn, 404, bob.id, request(Some("like"))).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        update_vote(&mut conn, 404, bob.id, request(Some("like")), true).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        delete_vote(&mut conn, 404, bob.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_partial_update_without_reaction() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    test_db.create_vote(bob.id, movie.id, Reaction::Hate).await;
    let mut conn = test_db.get_connection().await;

    let vote = update_vote(&mut conn, movie.id, bob.id, request(None), true).await.unwrap();
    assert_eq!(vote.reaction, Reaction::Hate);

    assert!(matches!(
        update_vote(&mut conn, movie.id, bob.id, request(None), false).await,
        Err(Error::Validation(_))
    ));

    let vote = update_vote(&mut conn, movie.id, bob.id, request(Some("like")), false).await.unwrap();
    assert_eq!(vote.reaction, Reaction::Like);
}
