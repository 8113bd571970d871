use std::collections::HashSet;

/// Share of distinct sentences among all sentences of `text`.
///
/// Sentences are split on `.`, `!` and `?`, trimmed, and blanks dropped.
/// Returns 1.0 when there are fewer than two sentences.
#[must_use]
pub fn repetition_ratio(text: &str) -> f64 {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() < 2 {
        return 1.0;
    }

    let unique: HashSet<&str> = sentences.iter().copied().collect();
    unique.len() as f64 / sentences.len() as f64
}
