// Title search pattern construction

/// Turns a user-supplied search phrase into a regex source for a
/// case-insensitive substring match on event titles.
///
/// The phrase is treated as literal text, not as a regex: each token is
/// escaped, and tokens are allowed to be separated by any run of whitespace
/// in the title. Returns `None` when the phrase contains no tokens at all.
pub fn title_pattern(phrase: &str) -> Option<String> {
    let tokens: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join(r"\s+"))
}
