pub mod movies;
pub mod users;
pub mod votes;

/// Returns the lowercased driver message when `err` is a unique-constraint
/// violation, e.g. `unique constraint failed: users.username`.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.message().to_lowercase())
        }
        _ => None,
    }
}
