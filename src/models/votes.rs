use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumString};

use crate::{
    error::Result,
    listing::{self, OrderField, OrderingParam, SortDirection},
    models::users::PublicUser,
};

/// A user's reaction to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Reaction {
    Like,
    Hate,
}

impl TryFrom<String> for Reaction {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    #[sqlx(try_from = "String")]
    pub reaction: Reaction,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVote {
    pub user_id: i64,
    pub movie_id: i64,
    pub reaction: Reaction,
}

/// Body of vote create/update requests. `reaction` stays a raw string so an
/// unknown value is reported against the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    pub reaction: Option<String>,
}

/// A vote as returned by the API, with its voter embedded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VoteWithUser {
    #[sqlx(try_from = "String")]
    pub reaction: Reaction,
    #[sqlx(flatten)]
    pub user: PublicUser,
    pub created: DateTime<Utc>,
}

/// Fields the vote list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOrderField {
    Created,
}

impl OrderField for VoteOrderField {
    fn from_param(name: &str) -> Option<Self> {
        match name {
            "created" => Some(VoteOrderField::Created),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            VoteOrderField::Created => "v.created",
        }
    }
}

/// Raw query string of `GET /movies/{id}/votes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteListParams {
    pub ordering: Option<String>,
    pub reaction: Option<String>,
}

/// Recognised filters of the vote list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteFilter {
    pub reaction: Option<Reaction>,
}

impl VoteListParams {
    pub fn filter(&self) -> Result<VoteFilter> {
        Ok(VoteFilter {
            reaction: listing::parse_choice_filter(self.reaction.as_deref(), "reaction")?,
        })
    }

    pub fn ordering(&self) -> OrderingParam<VoteOrderField> {
        OrderingParam::parse(
            self.ordering.as_deref(),
            (VoteOrderField::Created, SortDirection::Desc),
        )
    }
}
