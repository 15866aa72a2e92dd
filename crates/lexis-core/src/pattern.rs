use crate::types::SearchType;

/// Escape character understood by stores in `LIKE` patterns
pub const LIKE_ESCAPE: char = '\\';

/// Turn candidate terms into storage-query patterns for `search_type`.
///
/// | type | pattern |
/// |---|---|
/// | forward, pronunciation | `t%` |
/// | backward | `%_t` (at least one character before `t`) |
/// | anywhere, definition | `%t%` |
/// | example | `%「%t%」%` |
/// | exact | `t` |
pub fn apply_pattern(terms: &[String], search_type: SearchType) -> Vec<String> {
    terms
        .iter()
        .map(|term| match search_type {
            SearchType::Exact => term.clone(),
            SearchType::Forward | SearchType::Pronunciation => format!("{}%", escape_like(term)),
            SearchType::Backward => format!("%_{}", escape_like(term)),
            SearchType::Anywhere | SearchType::Definition => format!("%{}%", escape_like(term)),
            SearchType::Example => format!("%「%{}%」%", escape_like(term)),
        })
        .collect()
}

/// Escape `LIKE` wildcards occurring in user text
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
