// crates/timelord-core/src/text.rs

//! Text normalization shared by the index builder and the query path.

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use timelord_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("MÜNCHEN"), "munchen");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Folds `s` and splits it into alphanumeric tokens.
///
/// Duplicates are kept; callers that need a set dedupe themselves.
///
/// ```rust
/// use timelord_core::text::tokenize;
///
/// assert_eq!(tokenize("São Paulo"), vec!["sao", "paulo"]);
/// assert_eq!(tokenize("  toronto, "), vec!["toronto"]);
/// assert!(tokenize(" - ").is_empty());
/// ```
pub fn tokenize(s: &str) -> Vec<String> {
    fold_key(s)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses a decimal-degree coordinate stored as text.
///
/// Trims surrounding whitespace; returns `None` for anything unparsable or
/// non-finite.
pub fn parse_coord(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Turns a country display name into the flag asset stem
/// (`"United States"` → `"united_states"`).
pub fn flag_stem(country_name: &str) -> String {
    country_name.replace(' ', "_").to_lowercase()
}
