use strsim::levenshtein;

/// Closest candidate by edit distance, if it is close enough to be a likely typo.
pub fn closest<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    if needle.is_empty() {
        return None;
    }

    let max_dist = match needle.chars().count() {
        0..=3 => 1,
        4..=6 => 2,
        7..=10 => 3,
        _ => 4,
    };

    candidates
        .into_iter()
        .filter(|c| !c.is_empty() && *c != needle)
        .map(|c| (levenshtein(needle, c), c))
        .filter(|(d, _)| *d <= max_dist)
        .min_by(|(da, a), (db, b)| da.cmp(db).then(a.len().cmp(&b.len())).then(a.cmp(b)))
        .map(|(_, c)| c.to_string())
}
