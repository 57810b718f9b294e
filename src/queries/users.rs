use sqlx::QueryBuilder;

use crate::{
    database::{Db, DbConn},
    error::{Error, Result},
    listing::OrderingParam,
    models::users::{NewUser, User, UserOrderField},
};

use super::unique_violation;

const USER_COLUMNS: &str =
    "id, first_name, last_name, username, email, password, created, updated";

/// Creates a new user in the database.
pub async fn create_user(conn: &mut DbConn, new_user: NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (first_name, last_name, username, email, password)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(new_user.first_name)
    .bind(new_user.last_name)
    .bind(new_user.username)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .fetch_one(conn)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some(msg) if msg.contains("users.username") => {
            Error::field("username", "A user with that username already exists.")
        }
        Some(msg) if msg.contains("users.email") => {
            Error::field("email", "A user with that email already exists.")
        }
        _ => Error::Sqlx(e),
    })?;

    Ok(user)
}

/// Gets a single user by their ID. The user may not exist.
pub async fn get_user_by_id(conn: &mut DbConn, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Gets a single user by username. The user may not exist.
pub async fn get_user_by_username(conn: &mut DbConn, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Gets a single user by email. The user may not exist.
pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Lists all users in the requested order.
pub async fn list_users(
    conn: &mut DbConn,
    ordering: &OrderingParam<UserOrderField>,
) -> Result<Vec<User>> {
    let mut builder = QueryBuilder::<Db>::new(format!("SELECT {USER_COLUMNS} FROM users"));
    ordering.push_order_by(&mut builder, "id");

    let users = builder.build_query_as::<User>().fetch_all(conn).await?;
    Ok(users)
}

/// Deletes a user; their movies and votes go with them.
pub async fn delete_user(conn: &mut DbConn, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
