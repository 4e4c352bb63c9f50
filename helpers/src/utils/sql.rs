//! SQL pattern escaping

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Pair the result with `ESCAPE '\'` in the rendered clause.
///
/// # Example
///
/// ```
/// use query_helpers::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Escape SQLite GLOB metacharacters (*, ?, [) in user input
///
/// GLOB has no ESCAPE clause, so each metacharacter is wrapped in a
/// single-character class instead.
pub fn escape_glob_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => out.push_str("[*]"),
            '?' => out.push_str("[?]"),
            '[' => out.push_str("[[]"),
            _ => out.push(c),
        }
    }
    out
}
