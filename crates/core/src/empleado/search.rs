//! Free-text search helpers.
//!
//! A search query is a list of terms separated by `+`. Every term must appear
//! as a substring of the employee's `busqueda` field for the employee to match.

/// Splits a search query into lowercase terms.
///
/// Terms are separated by `+`; whitespace around each term is ignored and
/// empty terms are dropped, so `""`, `"  "` and `" + "` all yield no terms.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split('+')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns true if `busqueda` contains every term.
///
/// An empty term list matches everything.
pub fn matches(busqueda: &str, terms: &[String]) -> bool {
    terms.iter().all(|term| busqueda.contains(term.as_str()))
}

/// Builds the lowercase searchable blob from the given field values.
///
/// Missing and blank values are skipped; the rest are joined with a single
/// space.
pub fn searchable_text<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
