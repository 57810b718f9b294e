use movierama::{
    error::{Error, NON_FIELD_ERRORS},
    listing::{OrderingParam, SortDirection},
    models::votes::{NewVote, Reaction, VoteFilter, VoteOrderField},
    queries::votes::{
        count_votes, create_vote, delete_vote, get_vote, get_vote_with_user, list_votes,
        update_vote_reaction,
    },
};

use crate::common::TestDb;

#[tokio::test]
async fn test_create_and_get_vote() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let mut conn = test_db.get_connection().await;

    let vote = create_vote(
        &mut conn,
        NewVote {
            user_id: bob.id,
            movie_id: movie.id,
            reaction: Reaction::Hate,
        },
    )
    .await
    .unwrap();
    assert_eq!(vote.reaction, Reaction::Hate);

    let fetched = get_vote(&mut conn, movie.id, bob.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, vote.id);

    let with_user = get_vote_with_user(&mut conn, movie.id, bob.id).await.unwrap().unwrap();
    assert_eq!(with_user.user.username, "bob");
    assert_eq!(with_user.reaction, Reaction::Hate);

    assert!(get_vote(&mut conn, movie.id, alice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_one_vote_per_user_and_movie() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    test_db.create_vote(bob.id, movie.id, Reaction::Like).await;
    let mut conn = test_db.get_connection().await;

    let result = create_vote(
        &mut conn,
        NewVote {
            user_id: bob.id,
            movie_id: movie.id,
            reaction: Reaction::Hate,
        },
    )
    .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert_eq!(
                errors.into_fields()[NON_FIELD_ERRORS],
                "You can not vote for this movie twice."
            );
        }
        other => panic!("expected duplicate vote error, got {other:?}"),
    }
    assert_eq!(count_votes(&mut conn, movie.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_votes_filter_and_ordering() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let carol = test_db.create_user("carol").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let other = test_db.create_movie("Cars", Some(alice.id)).await;
    test_db.create_vote(bob.id, movie.id, Reaction::Like).await;
    test_db.create_vote(carol.id, movie.id, Reaction::Hate).await;
    test_db.create_vote(carol.id, other.id, Reaction::Like).await;
    let mut conn = test_db.get_connection().await;

    let newest_first = OrderingParam::parse(None, (VoteOrderField::Created, SortDirection::Desc));
    let votes = list_votes(&mut conn, movie.id, &VoteFilter::default(), &newest_first)
        .await
        .unwrap();
    let voters: Vec<_> = votes.iter().map(|v| v.user.username.as_str()).collect();
    assert_eq!(voters, vec!["carol", "bob"]);

    let likes = VoteFilter { reaction: Some(Reaction::Like) };
    let votes = list_votes(&mut conn, movie.id, &likes, &newest_first).await.unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].user.id, bob.id);

    let votes = list_votes(&mut conn, 9999, &VoteFilter::default(), &newest_first)
        .await
        .unwrap();
    assert!(votes.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_vote() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let vote = test_db.create_vote(bob.id, movie.id, Reaction::Like).await;
    let mut conn = test_db.get_connection().await;

    let updated = update_vote_reaction(&mut conn, vote.id, Reaction::Hate).await.unwrap();
    assert_eq!(updated.id, vote.id);
    assert_eq!(updated.reaction, Reaction::Hate);

    assert!(matches!(
        update_vote_reaction(&mut conn, vote.id + 100, Reaction::Like).await,
        Err(Error::NotFound(_))
    ));

    // Deleting is scoped to the voter
    assert_eq!(delete_vote(&mut conn, movie.id, alice.id).await.unwrap(), 0);
    assert_eq!(delete_vote(&mut conn, movie.id, bob.id).await.unwrap(), 1);
    assert_eq!(count_votes(&mut conn, movie.id).await.unwrap(), 0);
}
