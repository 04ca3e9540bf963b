// --- File: src/core/index.rs
use crate::core::normalize::normalize_key;
use crate::core::types::Ingredient;
use indexmap::IndexMap;

/// Immutable map from normalized name/alias to the ingredient it stands for.
///
/// Keys iterate in first-insertion order: catalog order, canonical name before
/// its aliases. When two ingredients claim the same key the later one in
/// catalog order wins, but the key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    ingredients: Vec<Ingredient>,
    keys: IndexMap<String, usize>,
}

impl AliasIndex {
    /// Builds the index from a catalog snapshot. O(catalog size).
    pub fn build<'a, I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = &'a Ingredient>,
    {
        let mut index = Self::default();

        for ingredient in catalog {
            let slot = index.ingredients.len();
            index.ingredients.push(ingredient.clone());

            let names = std::iter::once(&ingredient.canonical_name).chain(ingredient.aliases.iter());
            for name in names {
                let key = normalize_key(name);
                if key.is_empty() {
                    continue;
                }
                if let Some(previous) = index.keys.insert(key.clone(), slot) {
                    let previous = &index.ingredients[previous];
                    if previous.id != ingredient.id {
                        tracing::warn!(
                            key = %key,
                            replaced = %previous.canonical_name,
                            by = %ingredient.canonical_name,
                            "alias key collision, later ingredient wins"
                        );
                    }
                }
            }
        }

        tracing::debug!(
            ingredients = index.ingredients.len(),
            keys = index.keys.len(),
            "alias index built"
        );
        index
    }

    /// Looks up an already-normalized key.
    pub fn lookup_exact(&self, normalized_key: &str) -> Option<&Ingredient> {
        self.keys
            .get(normalized_key)
            .map(|&slot| &self.ingredients[slot])
    }

    /// All keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// All `(key, ingredient)` pairs in iteration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Ingredient)> {
        self.keys
            .iter()
            .map(|(key, &slot)| (key.as_str(), &self.ingredients[slot]))
    }

    /// The ingredients the index was built from, in catalog order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
