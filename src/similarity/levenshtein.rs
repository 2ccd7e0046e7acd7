// ============================================================================
// Levenshtein edit distance
// ============================================================================

/// Classic edit distance: minimum number of single-character inserts,
/// deletes, and substitutions (each cost 1) to turn `a` into `b`.
///
/// Two-row dynamic programming over chars, O(len(a) * len(b)) time and
/// O(len(b)) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in [0, 1]: 1 minus distance normalized by the longer input.
/// Two empty strings are defined as identical (1.0).
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}
