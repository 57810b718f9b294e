//! Query-string parameters shared by the list endpoints.
//!
//! Each list endpoint recognises a fixed set of parameters (`ordering`,
//! `user_id`, `reaction`). They are parsed here into typed values and only
//! whitelisted column names ever reach the SQL text.

use std::str::FromStr;

use sqlx::QueryBuilder;

use crate::{
    database::Db,
    error::{Error, Result},
};

/// Sort direction of one ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A field a list endpoint allows ordering by.
pub trait OrderField: Copy + PartialEq + std::fmt::Debug {
    /// Maps the public parameter name (without `-`) to a field.
    fn from_param(name: &str) -> Option<Self>;

    /// SQL expression the field sorts on.
    fn column(self) -> &'static str;
}

/// Parsed `?ordering=` parameter.
///
/// Accepts a comma-separated list of field names, each optionally prefixed
/// with `-` for descending order. Unknown names are ignored; when nothing
/// valid remains the endpoint default applies.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingParam<F: OrderField> {
    terms: Vec<(F, SortDirection)>,
}

impl<F: OrderField> OrderingParam<F> {
    pub fn parse(raw: Option<&str>, default: (F, SortDirection)) -> Self {
        let terms: Vec<(F, SortDirection)> = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter_map(|term| {
                let (name, direction) = match term.strip_prefix('-') {
                    Some(name) => (name, SortDirection::Desc),
                    None => (term, SortDirection::Asc),
                };
                F::from_param(name).map(|field| (field, direction))
            })
            .collect();

        if terms.is_empty() {
            Self { terms: vec![default] }
        } else {
            Self { terms }
        }
    }

    pub fn terms(&self) -> &[(F, SortDirection)] {
        &self.terms
    }

    /// Appends `ORDER BY ...` plus a `tiebreak` column sorted in the
    /// direction of the first term, so equal keys come back in a stable order.
    pub fn push_order_by(&self, builder: &mut QueryBuilder<'_, Db>, tiebreak: &str) {
        builder.push(" ORDER BY ");
        for (index, (field, direction)) in self.terms.iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(field.column()).push(" ").push(direction.as_sql());
        }

        let primary = self.terms[0].1;
        builder.push(", ").push(tiebreak).push(" ").push(primary.as_sql());
    }
}

/// Parses an optional integer filter such as `?user_id=`. An empty value
/// means no filter.
pub fn parse_id_filter(raw: Option<&str>, field: &str) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::field(field, "Enter a number.")),
    }
}

/// Parses an optional choice filter such as `?reaction=`. An empty value
/// means no filter.
pub fn parse_choice_filter<T: FromStr>(raw: Option<&str>, field: &str) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            Error::field(
                field,
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    value
                ),
            )
        }),
    }
}
