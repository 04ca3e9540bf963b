// File: src/core/normalize.rs
//! Text normalization for ingredient names and user input.
//!
//! Both variants trim, lowercase, fold diacritics (NFD decomposition followed
//! by removal of combining marks), drop characters outside the allowed
//! alphabet and collapse whitespace runs. The result may be empty; callers
//! treat an empty result as "no input".

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Latin-1 Supplement through Latin Extended-B. Letters in this range that do
/// not decompose (`ø`, `ß`, `æ`, `ł`, ...) are kept by [`normalize_key`].
const EXTENDED_LATIN: std::ops::RangeInclusive<char> = '\u{00C0}'..='\u{024F}';

/// Strict normalization: the output alphabet is `[a-z0-9 -]`.
///
/// ```
/// use pantry_core::core::normalize::normalize;
/// assert_eq!(normalize("  Crème   Fraîche! "), "creme fraiche");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(s: &str) -> String {
    fold(s, false)
}

/// Normalization used for alias-index keys and for the inputs looked up
/// against them. Same as [`normalize`] but keeps extended Latin letters that
/// survive folding, so `"smørrebrød"` stays distinguishable from `"smrrebrd"`.
pub fn normalize_key(s: &str) -> String {
    fold(s, true)
}

fn fold(s: &str, keep_extended: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.trim().to_lowercase().nfd() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if is_combining_mark(c) || !is_allowed(c, keep_extended) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

fn is_allowed(c: char, keep_extended: bool) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c == '-'
        || (keep_extended && EXTENDED_LATIN.contains(&c))
}
