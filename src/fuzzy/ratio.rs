// File: src/fuzzy/ratio.rs
//! Token-order-insensitive string similarity on a 0-100 scale.
//!
//! Both strings are split on whitespace, their tokens sorted and re-joined
//! with single spaces, and the results compared with normalized Levenshtein
//! similarity: `100 * (1 - distance / max_len)` counted in chars.
//! So `"tomatoe"` vs `"tomato"` scores `100 * (1 - 1/7) = 85.71`, and
//! `"oil olive"` vs `"olive oil"` scores 100.

use strsim::normalized_levenshtein;

/// Similarity of `a` and `b` in `[0, 100]`. Two empty strings score 0 so an
/// empty query never fuzzy-matches anything.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let a = sort_tokens(a);
    let b = sort_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    100.0 * normalized_levenshtein(&a, &b)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Returns the best-scoring candidate and its score. Ties keep the earliest
/// candidate in iteration order.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = token_sort_ratio(query, candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best
}
