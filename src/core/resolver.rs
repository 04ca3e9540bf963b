// File: src/core/resolver.rs
//! Maps noisy user-typed ingredient strings to canonical ingredient names.
//!
//! Each raw input runs through a cascade of strategies and stops at the first
//! one that yields a match:
//!
//! 1. exact key lookup,
//! 2. keys containing the input as a substring,
//! 3. best fuzzy match above the threshold,
//! 4. substring match on the longest tokens of the input.
//!
//! Inputs that match nothing are dropped silently.

use crate::core::index::AliasIndex;
use crate::core::normalize::normalize_key;
use crate::core::types::{MatchStage, Resolution, ResolvedQuery};
use crate::fuzzy::ratio::best_match;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PER_INPUT: usize = 5;
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 85;

/// Tokens this short are too ambiguous for the token fallback.
const MIN_TOKEN_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Cap on names contributed by one input in the substring and token stages.
    pub max_per_input: usize,
    /// Minimum similarity (0-100) for the fuzzy stage.
    pub fuzzy_threshold: u8,
    /// When false the fuzzy stage is skipped.
    pub fuzzy: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_per_input: DEFAULT_MAX_PER_INPUT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            fuzzy: true,
        }
    }
}

/// A cascade stage. Receives the normalized input; returns `None` or a
/// non-empty list of canonical names.
type Strategy = fn(&str, &AliasIndex, &ResolveOptions) -> Option<Vec<String>>;

const CASCADE: &[(MatchStage, Strategy)] = &[
    (MatchStage::Exact, exact),
    (MatchStage::Substring, substring),
    (MatchStage::Fuzzy, fuzzy),
    (MatchStage::Token, token_fallback),
];

/// Resolves raw inputs into an ordered, de-duplicated list of canonical names.
pub fn resolve<I, S>(raw_inputs: I, index: &AliasIndex, options: &ResolveOptions) -> ResolvedQuery
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    resolve_detailed(raw_inputs, index, options)
        .iter()
        .flat_map(|resolution| resolution.names.iter())
        .collect()
}

/// Like [`resolve`] but reports, per input, which stage matched and what it
/// produced before cross-input de-duplication. Inputs that normalize to the
/// empty string are not reported.
pub fn resolve_detailed<I, S>(
    raw_inputs: I,
    index: &AliasIndex,
    options: &ResolveOptions,
) -> Vec<Resolution>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let options = ResolveOptions {
        max_per_input: options.max_per_input.max(1),
        ..*options
    };

    let mut out = Vec::new();
    for raw in raw_inputs {
        let raw = raw.as_ref();
        let normalized = normalize_key(raw);
        if normalized.is_empty() {
            continue;
        }
        out.push(resolve_one(raw, &normalized, index, &options));
    }
    out
}

fn resolve_one(raw: &str, normalized: &str, index: &AliasIndex, options: &ResolveOptions) -> Resolution {
    for &(stage, strategy) in CASCADE {
        if let Some(names) = strategy(normalized, index, options) {
            tracing::debug!(input = raw, ?stage, ?names, "resolved ingredient input");
            return Resolution {
                input: raw.to_string(),
                stage: Some(stage),
                names,
            };
        }
    }

    tracing::debug!(input = raw, "no ingredient matched input");
    Resolution {
        input: raw.to_string(),
        stage: None,
        names: Vec::new(),
    }
}

fn exact(normalized: &str, index: &AliasIndex, _: &ResolveOptions) -> Option<Vec<String>> {
    index
        .lookup_exact(normalized)
        .map(|ingredient| vec![ingredient.canonical_name.clone()])
}

fn substring(normalized: &str, index: &AliasIndex, options: &ResolveOptions) -> Option<Vec<String>> {
    non_empty(keys_containing(normalized, index, options.max_per_input))
}

fn fuzzy(normalized: &str, index: &AliasIndex, options: &ResolveOptions) -> Option<Vec<String>> {
    if !options.fuzzy {
        return None;
    }
    let (key, score) = best_match(normalized, index.keys())?;
    if score < f64::from(options.fuzzy_threshold) {
        return None;
    }
    index
        .lookup_exact(key)
        .map(|ingredient| vec![ingredient.canonical_name.clone()])
}

fn token_fallback(normalized: &str, index: &AliasIndex, options: &ResolveOptions) -> Option<Vec<String>> {
    let mut tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .collect();
    // Stable: equally long tokens keep input order.
    tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

    tokens
        .into_iter()
        .find_map(|token| non_empty(keys_containing(token, index, options.max_per_input)))
}

/// Distinct canonical names of keys containing `needle`, in key order.
fn keys_containing(needle: &str, index: &AliasIndex, limit: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (key, ingredient) in index.entries() {
        if names.len() >= limit {
            break;
        }
        if key.contains(needle) && !names.contains(&ingredient.canonical_name) {
            names.push(ingredient.canonical_name.clone());
        }
    }
    names
}

fn non_empty(names: Vec<String>) -> Option<Vec<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
