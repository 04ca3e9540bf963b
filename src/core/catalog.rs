// File: src/core/catalog.rs
use crate::core::index::AliasIndex;
use crate::core::normalize::normalize_key;
use crate::core::types::{Ingredient, Recipe, ResolvedQuery};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const MAX_NAME_LISTING: usize = 5000;

/// A flat snapshot of the ingredient and recipe catalogs, as handed over by
/// the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> Self {
        Self { ingredients, recipes }
    }

    /// Checks that every canonical name is non-empty and unique after
    /// normalization, and that no alias normalizes to another ingredient's
    /// canonical name. Aliases may overlap with each other.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut canonical: HashMap<String, &Ingredient> = HashMap::new();
        for ingredient in &self.ingredients {
            let key = normalize_key(&ingredient.canonical_name);
            if key.is_empty() {
                return Err(CatalogError::EmptyCanonical { id: ingredient.id });
            }
            if let Some(first) = canonical.insert(key.clone(), ingredient) {
                return Err(CatalogError::DuplicateCanonical {
                    key,
                    first: first.canonical_name.clone(),
                    second: ingredient.canonical_name.clone(),
                });
            }
        }

        for ingredient in &self.ingredients {
            for alias in &ingredient.aliases {
                let key = normalize_key(alias);
                match canonical.get(&key) {
                    Some(owner) if owner.id != ingredient.id => {
                        return Err(CatalogError::AliasShadowsCanonical {
                            key,
                            canonical: owner.canonical_name.clone(),
                            alias_of: ingredient.canonical_name.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn alias_index(&self) -> AliasIndex {
        AliasIndex::build(&self.ingredients)
    }

    /// Recipes listing at least one resolved ingredient (case-insensitive),
    /// in catalog order.
    pub fn candidates<'a>(&'a self, resolved: &ResolvedQuery) -> Vec<&'a Recipe> {
        let wanted: HashSet<String> = resolved.names().iter().map(|n| n.to_lowercase()).collect();
        self.recipes
            .iter()
            .filter(|recipe| {
                recipe
                    .ingredient_names
                    .iter()
                    .any(|name| wanted.contains(&name.to_lowercase()))
            })
            .collect()
    }

    /// Distinct canonical names, optionally filtered by a case-insensitive
    /// prefix, ordered by their lowercase form. `limit` is clamped to
    /// `[1, 5000]`.
    pub fn ingredient_names(&self, prefix: Option<&str>, limit: usize) -> Vec<String> {
        let prefix = prefix.map(str::to_lowercase).unwrap_or_default();
        let mut names: Vec<&str> = self
            .ingredients
            .iter()
            .map(|i| i.canonical_name.as_str())
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .collect();
        names.sort_by_cached_key(|name| name.to_lowercase());
        names.dedup();
        names
            .into_iter()
            .take(limit.clamp(1, MAX_NAME_LISTING))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Ingredient::new(1, "egg"),
                Ingredient::new(2, "Butter"),
                Ingredient::new(3, "bread"),
                Ingredient::new(4, "salt"),
            ],
            vec![
                Recipe::new(1, "Scrambled Eggs", &["egg", "butter", "salt"]),
                Recipe::new(2, "Toast", &["bread", "Butter"]),
                Recipe::new(3, "Plain Rice", &["rice"]),
            ],
        )
    }

    #[test]
    fn candidates_contain_any_resolved_ingredient() {
        let catalog = catalog();
        let resolved: ResolvedQuery = ["Butter"].into_iter().collect();
        let ids: Vec<u64> = catalog.candidates(&resolved).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn no_candidates_for_empty_query() {
        assert!(catalog().candidates(&ResolvedQuery::new()).is_empty());
    }

    #[test]
    fn ingredient_names_by_prefix() {
        let catalog = catalog();
        assert_eq!(catalog.ingredient_names(Some("B"), 10), vec!["bread", "Butter"]);
        assert_eq!(catalog.ingredient_names(None, 2), vec!["bread", "Butter"]);
        assert_eq!(catalog.ingredient_names(None, 0), vec!["bread"]);
        assert!(catalog.ingredient_names(Some("z"), 10).is_empty());
    }

    #[test]
    fn valid_catalog_passes() {
        assert_eq!(catalog().validate(), Ok(()));
    }

    #[test]
    fn duplicate_canonical_after_normalization_is_rejected() {
        let catalog = Catalog::new(
            vec![Ingredient::new(1, "Jalapeño"), Ingredient::new(2, "jalapeno")],
            Vec::new(),
        );
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateCanonical {
                key: "jalapeno".to_string(),
                first: "Jalapeño".to_string(),
                second: "jalapeno".to_string(),
            })
        );
    }

    #[test]
    fn alias_matching_another_canonical_is_rejected() {
        let catalog = Catalog::new(
            vec![
                Ingredient::new(1, "green onion").with_aliases(&["spring onion"]),
                Ingredient::new(2, "scallion").with_aliases(&["Green Onion"]),
            ],
            Vec::new(),
        );
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::AliasShadowsCanonical {
                key: "green onion".to_string(),
                canonical: "green onion".to_string(),
                alias_of: "scallion".to_string(),
            })
        );
    }

    #[test]
    fn overlapping_aliases_and_self_aliases_are_allowed() {
        let catalog = Catalog::new(
            vec![
                Ingredient::new(1, "scallion").with_aliases(&["green onion", "Scallion"]),
                Ingredient::new(2, "spring onion").with_aliases(&["green onion"]),
            ],
            Vec::new(),
        );
        assert_eq!(catalog.validate(), Ok(()));
    }

    #[test]
    fn empty_canonical_is_rejected() {
        let catalog = Catalog::new(vec![Ingredient::new(9, " ?! ")], Vec::new());
        assert_eq!(catalog.validate(), Err(CatalogError::EmptyCanonical { id: 9 }));
    }

    #[test]
    fn catalog_deserializes_without_optional_fields() {
        let catalog: Catalog = serde_json::from_str(
            r#"{ "ingredients": [ { "id": 1, "canonical_name": "egg" } ] }"#,
        )
        .unwrap();
        assert!(catalog.ingredients[0].aliases.is_empty());
        assert!(catalog.recipes.is_empty());
    }
}
