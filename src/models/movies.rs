use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{Error, Result},
    listing::{self, OrderField, OrderingParam, SortDirection},
    models::{users::PublicUser, votes::Reaction},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Submitter; `None` for movies not owned by any user
    pub user_id: Option<i64>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub user_id: Option<i64>,
}

/// HTTP API request for submitting a movie (submitter taken from the token)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMovie {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A movie annotated with its vote counts and the requester's own vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieWithStats {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub user: Option<PublicUser>,
    pub likes: i64,
    pub hates: i64,
    pub vote: Option<Reaction>,
}

/// Flat row produced by the movie listing query.
#[derive(Debug, Clone, FromRow)]
pub struct MovieStatsRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub submitter_first_name: Option<String>,
    pub submitter_last_name: Option<String>,
    pub submitter_username: Option<String>,
    pub submitter_email: Option<String>,
    pub likes: i64,
    pub hates: i64,
    pub vote: Option<String>,
}

impl TryFrom<MovieStatsRow> for MovieWithStats {
    type Error = Error;

    fn try_from(row: MovieStatsRow) -> Result<Self> {
        let user = match (
            row.user_id,
            row.submitter_first_name,
            row.submitter_last_name,
            row.submitter_username,
            row.submitter_email,
        ) {
            (Some(id), Some(first_name), Some(last_name), Some(username), Some(email)) => {
                Some(PublicUser {
                    id,
                    first_name,
                    last_name,
                    username,
                    email,
                })
            }
            _ => None,
        };

        let vote = row
            .vote
            .map(|reaction| reaction.parse::<Reaction>())
            .transpose()
            .map_err(|e| Error::Internal(format!("Invalid stored reaction: {}", e)))?;

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created: row.created,
            user,
            likes: row.likes,
            hates: row.hates,
            vote,
        })
    }
}

/// Fields `GET /movies` can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrderField {
    Created,
    Title,
    Likes,
    Hates,
}

impl OrderField for MovieOrderField {
    fn from_param(name: &str) -> Option<Self> {
        match name {
            "created" => Some(MovieOrderField::Created),
            "title" => Some(MovieOrderField::Title),
            "likes" => Some(MovieOrderField::Likes),
            "hates" => Some(MovieOrderField::Hates),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            MovieOrderField::Created => "m.created",
            MovieOrderField::Title => "m.title",
            // Result-column aliases of the listing query
            MovieOrderField::Likes => "likes",
            MovieOrderField::Hates => "hates",
        }
    }
}

/// Raw query string of `GET /movies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieListParams {
    pub ordering: Option<String>,
    pub user_id: Option<String>,
}

/// Recognised filters of `GET /movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Only movies submitted by this user
    pub user_id: Option<i64>,
}

impl MovieListParams {
    pub fn filter(&self) -> Result<MovieFilter> {
        Ok(MovieFilter {
            user_id: listing::parse_id_filter(self.user_id.as_deref(), "user_id")?,
        })
    }

    pub fn ordering(&self) -> OrderingParam<MovieOrderField> {
        OrderingParam::parse(
            self.ordering.as_deref(),
            (MovieOrderField::Created, SortDirection::Desc),
        )
    }
}
