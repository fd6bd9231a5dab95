//! Substring search support for `LIKE` filters.
//!
//! SQLite's `LIKE` and `lower()` only fold ASCII letters, so every pooled
//! connection registers `fold_case`, which lower-cases with Rust's Unicode
//! rules. Filters compare `fold_case(column)` against a pattern built by
//! [`contains_pattern`].

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

/// Escape character used by [`contains_pattern`].
pub const LIKE_ESCAPE: char = '\\';

diesel::define_sql_function! {
    /// Unicode-aware lower-casing, registered on every connection.
    fn fold_case(value: Text) -> Text;
}

pub fn register_functions(conn: &mut SqliteConnection) -> QueryResult<()> {
    fold_case_utils::register_impl(conn, |value: String| value.to_lowercase())
}

/// `%keyword%` with the keyword case-folded and its `LIKE` wildcards escaped,
/// so user text always matches literally.
pub fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
