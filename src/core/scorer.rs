// File: src/core/scorer.rs
use crate::core::types::{Recipe, ResolvedQuery, ScoredRecipe};
use std::collections::HashSet;

/// The match fields of a [`ScoredRecipe`], independent of recipe identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub score: f64,
    pub match_count: usize,
    pub total: usize,
    pub have: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores a recipe's ingredient list against the resolved names.
///
/// Comparison is case-insensitive; `have` and `missing` keep the recipe's own
/// spelling (first occurrence wins for case-insensitive duplicates) and are
/// sorted by that spelling. The denominator is the length of the recipe's
/// list, at least 1, and the score is rounded half away from zero to three
/// decimals.
pub fn score(recipe_ingredient_names: &[String], resolved: &ResolvedQuery) -> MatchScore {
    let wanted: HashSet<String> = resolved.names().iter().map(|n| n.to_lowercase()).collect();

    let mut seen = HashSet::new();
    let mut have = Vec::new();
    let mut missing = Vec::new();
    for name in recipe_ingredient_names {
        let folded = name.to_lowercase();
        if !seen.insert(folded.clone()) {
            continue;
        }
        if wanted.contains(&folded) {
            have.push(name.clone());
        } else {
            missing.push(name.clone());
        }
    }
    have.sort();
    missing.sort();

    let match_count = have.len();
    let total = recipe_ingredient_names.len().max(1);

    MatchScore {
        score: round3(match_count as f64 / total as f64),
        match_count,
        total,
        have,
        missing,
    }
}

/// Scores a whole recipe.
pub fn score_recipe(recipe: &Recipe, resolved: &ResolvedQuery) -> ScoredRecipe {
    let m = score(&recipe.ingredient_names, resolved);
    ScoredRecipe {
        recipe_id: recipe.id,
        title: recipe.title.clone(),
        score: m.score,
        match_count: m.match_count,
        have: m.have,
        missing: m.missing,
        ingredient_names: recipe.ingredient_names.clone(),
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn query(items: &[&str]) -> ResolvedQuery {
        items.iter().collect()
    }

    #[test]
    fn one_of_three() {
        let m = score(&strings(&["egg", "butter", "salt"]), &query(&["egg"]));
        assert_eq!(m.match_count, 1);
        assert_eq!(m.total, 3);
        assert_eq!(m.score, 0.333);
        assert_eq!(m.have, vec!["egg"]);
        assert_eq!(m.missing, vec!["butter", "salt"]);
    }

    #[test]
    fn two_of_three_rounds_up() {
        let m = score(&strings(&["egg", "butter", "salt"]), &query(&["salt", "egg"]));
        assert_eq!(m.score, 0.667);
        assert_eq!(m.have, vec!["egg", "salt"]);
    }

    #[test]
    fn half_rounds_away_from_zero() {
        assert_eq!(round3(0.0005), 0.001);
        assert_eq!(round3(0.0625), 0.063);
        assert_eq!(round3(1.0), 1.0);
    }

    #[test]
    fn empty_recipe_scores_zero() {
        let m = score(&[], &query(&["egg"]));
        assert_eq!(m.score, 0.0);
        assert_eq!(m.match_count, 0);
        assert_eq!(m.total, 1);
        assert!(m.have.is_empty() && m.missing.is_empty());
    }

    #[test]
    fn empty_query_misses_everything() {
        let m = score(&strings(&["rice", "peas"]), &ResolvedQuery::new());
        assert_eq!(m.score, 0.0);
        assert_eq!(m.missing, vec!["peas", "rice"]);
    }

    #[test]
    fn comparison_ignores_case_but_display_keeps_it() {
        let m = score(&strings(&["Olive Oil", "Garlic", "pasta"]), &query(&["olive oil", "GARLIC"]));
        assert_eq!(m.have, vec!["Garlic", "Olive Oil"]);
        assert_eq!(m.missing, vec!["pasta"]);
        assert_eq!(m.score, 0.667);
    }

    #[test]
    fn full_match_scores_one() {
        let recipe = Recipe::new(7, "Buttered Rice", &["rice", "butter"]);
        let scored = score_recipe(&recipe, &query(&["butter", "rice", "salt"]));
        assert_eq!(scored.recipe_id, 7);
        assert_eq!(scored.title, "Buttered Rice");
        assert_eq!(scored.score, 1.0);
        assert_eq!(scored.match_count, 2);
        assert_eq!(scored.ingredient_names, vec!["rice", "butter"]);
    }
}
