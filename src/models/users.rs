use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::listing::{OrderField, OrderingParam, SortDirection};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    /// Argon2 PHC hash, never serialized
    #[serde(skip_serializing)]
    pub password: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// The user fields exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration body. Every field is optional at the wire level so missing
/// fields are reported per field instead of as a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Fields `GET /users` can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOrderField {
    FirstName,
    LastName,
    Created,
}

impl OrderField for UserOrderField {
    fn from_param(name: &str) -> Option<Self> {
        match name {
            "first_name" => Some(UserOrderField::FirstName),
            "last_name" => Some(UserOrderField::LastName),
            "created" => Some(UserOrderField::Created),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            UserOrderField::FirstName => "first_name",
            UserOrderField::LastName => "last_name",
            UserOrderField::Created => "created",
        }
    }
}

/// Raw query string of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListParams {
    pub ordering: Option<String>,
}

impl UserListParams {
    pub fn ordering(&self) -> OrderingParam<UserOrderField> {
        OrderingParam::parse(
            self.ordering.as_deref(),
            (UserOrderField::Created, SortDirection::Desc),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginUser {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh: Option<String>,
}

/// Access and refresh JWTs issued together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,  // short-lived, sent as `Authorization: Bearer <access>`
    pub refresh: String, // long-lived, exchanged at /token/refresh
}
