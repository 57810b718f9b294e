use movierama::{
    error::Error,
    listing::{OrderingParam, SortDirection},
    models::{
        users::{NewUser, UserOrderField},
        votes::Reaction,
    },
    queries::users::{
        create_user, delete_user, get_user_by_email, get_user_by_id, get_user_by_username,
        list_users,
    },
};

use crate::common::TestDb;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "test_hash_12345".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_read_user() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.get_connection().await;

    let created = create_user(&mut conn, new_user("john", "john@mr.com")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.username, "john");
    assert_eq!(created.password, "test_hash_12345");
    assert!(created.created <= chrono::Utc::now());

    let by_id = get_user_by_id(&mut conn, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "john@mr.com");

    let by_username = get_user_by_username(&mut conn, "john").await.unwrap().unwrap();
    assert_eq!(by_username.id, created.id);

    let by_email = get_user_by_email(&mut conn, "john@mr.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(get_user_by_id(&mut conn, created.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_username_constraint() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.get_connection().await;

    create_user(&mut conn, new_user("john", "john@mr.com")).await.unwrap();
    let result = create_user(&mut conn, new_user("john", "other@mr.com")).await;

    match result {
        Err(Error::Validation(errors)) => {
            let fields = errors.into_fields();
            assert_eq!(fields["username"], "A user with that username already exists.");
        }
        other => panic!("expected username validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unique_email_constraint() {
    let test_db = TestDb::new().await;
    let mut conn = test_db.get_connection().await;

    create_user(&mut conn, new_user("john", "john@mr.com")).await.unwrap();
    let result = create_user(&mut conn, new_user("johnny", "john@mr.com")).await;

    match result {
        Err(Error::Validation(errors)) => {
            let fields = errors.into_fields();
            assert_eq!(fields["email"], "A user with that email already exists.");
        }
        other => panic!("expected email validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_users_ordering() {
    let test_db = TestDb::new().await;
    test_db.create_named_user("u1", "Zoe", "Adams").await;
    test_db.create_named_user("u2", "Anna", "Young").await;
    let mut conn = test_db.get_connection().await;

    let ordering = OrderingParam::parse(
        Some("first_name"),
        (UserOrderField::Created, SortDirection::Desc),
    );
    let users = list_users(&mut conn, &ordering).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Zoe"]);

    let ordering = OrderingParam::parse(None, (UserOrderField::Created, SortDirection::Desc));
    let users = list_users(&mut conn, &ordering).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["u2", "u1"]);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let test_db = TestDb::new().await;
    let alice = test_db.create_user("alice").await;
    let bob = test_db.create_user("bob").await;
    let movie = test_db.create_movie("Madagascar", Some(alice.id)).await;
    let other = test_db.create_movie("Cars", Some(bob.id)).await;
    test_db.create_vote(bob.id, movie.id, Reaction::Like).await;
    test_db.create_vote(alice.id, other.id, Reaction::Hate).await;

    {
        let mut conn = test_db.get_connection().await;
        assert_eq!(delete_user(&mut conn, alice.id).await.unwrap(), 1);
        assert_eq!(delete_user(&mut conn, alice.id).await.unwrap(), 0);
    }

    // Alice's movie took Bob's vote with it; Alice's own vote is gone too
    assert_eq!(test_db.count_votes().await, 0);
    assert_eq!(test_db.count_users().await, 1);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(&test_db.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}
