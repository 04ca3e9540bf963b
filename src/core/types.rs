// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A unique identifier for a catalog ingredient.
pub type IngredientId = u64;

/// A unique identifier for a recipe.
pub type RecipeId = u64;

/// A catalog ingredient with its authoritative display name and the
/// alternate spellings known to mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub canonical_name: String,
    /// Order matters: later aliases are inserted into the index later.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Ingredient {
    pub fn new(id: IngredientId, canonical_name: &str) -> Self {
        Self {
            id,
            canonical_name: canonical_name.to_string(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// The recipe's own ingredient labels, normally canonical names.
    #[serde(default)]
    pub ingredient_names: Vec<String>,
}

impl Recipe {
    pub fn new(id: RecipeId, title: &str, ingredient_names: &[&str]) -> Self {
        Self {
            id,
            title: title.to_string(),
            ingredient_names: ingredient_names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Ordered, de-duplicated canonical names. Order is the order in which each
/// raw input was first resolved, so the most relevant input comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedQuery {
    names: Vec<String>,
}

impl ResolvedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for ResolvedQuery {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut query = ResolvedQuery::new();
        for name in iter {
            query.push(name.as_ref());
        }
        query
    }
}

/// A recipe annotated with how well it matches a resolved query.
/// Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub recipe_id: RecipeId,
    pub title: String,
    /// In `[0, 1]`, rounded to three decimals.
    pub score: f64,
    pub match_count: usize,
    pub have: Vec<String>,
    pub missing: Vec<String>,
    pub ingredient_names: Vec<String>,
}

/// Which cascade stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStage {
    Exact,
    Substring,
    Fuzzy,
    Token,
}

/// The outcome of resolving a single raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub input: String,
    /// `None` when no stage matched; `names` is then empty.
    pub stage: Option<MatchStage>,
    pub names: Vec<String>,
}
