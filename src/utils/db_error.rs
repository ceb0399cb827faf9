//! Helpers for classifying database errors.

/// Name of the unique constraint guarding `links.short_token`.
pub const SHORT_TOKEN_CONSTRAINT: &str = "links_short_token_key";

/// Returns true if `e` is a unique violation on the short token column.
///
/// Other unique violations (e.g. a duplicated primary key) are not treated
/// as token collisions.
pub fn is_unique_violation_on_token(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_TOKEN_CONSTRAINT))
}
