use regex::Captures;

/// Return capture group `i`, if it participated in the match.
pub fn group<'t>(caps: &Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str())
}

/// Parse a matched digit run into a count. `\d` also matches non-ASCII
/// digits, which do not parse and drop the match.
pub fn parse_count(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

/// Lowercase, trim, and collapse internal whitespace to single spaces.
pub fn normalize_phrase(s: &str) -> String {
    s.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ")
}
