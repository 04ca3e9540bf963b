use crate::config::EngineConfig;
use crate::core::catalog::Catalog;
use crate::core::index::AliasIndex;
use crate::core::ranker::{paginate, Page, PageRequest};
use crate::core::resolver::{resolve, resolve_detailed, ResolveOptions};
use crate::core::scorer::score_recipe;
use crate::core::types::{Recipe, Resolution, ResolvedQuery};
use crate::error::{CatalogError, Result};
use crate::persistence::{load_snapshot, save_snapshot};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// An immutable catalog together with the alias index built from it.
#[derive(Debug)]
pub struct Snapshot {
    pub version: u64,
    pub catalog: Catalog,
    pub index: AliasIndex,
}

/// Versioned handle to the current [`Snapshot`].
///
/// Readers take the current `Arc` without locking and keep using it for the
/// whole request. A reload builds the new index first and only then swaps the
/// pointer, so in-flight reads never see a partially built index. Writers are
/// serialized so versions only ever increase.
#[derive(Debug)]
pub struct IndexHandle {
    current: ArcSwap<Snapshot>,
    writer: Mutex<()>,
}

impl IndexHandle {
    pub fn new(catalog: Catalog) -> Self {
        let index = catalog.alias_index();
        Self {
            current: ArcSwap::from_pointee(Snapshot {
                version: 1,
                catalog,
                index,
            }),
            writer: Mutex::new(()),
        }
    }

    pub fn load(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Builds a snapshot for `catalog` and makes it current. Returns the new version.
    pub fn swap(&self, catalog: Catalog) -> u64 {
        let index = catalog.alias_index();

        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let version = self.current.load().version + 1;
        self.current.store(Arc::new(Snapshot {
            version,
            catalog,
            index,
        }));
        tracing::info!(version, "alias index swapped");
        version
    }

    pub fn version(&self) -> u64 {
        self.current.load().version
    }
}

/// Scores `candidates` against `resolved` and returns the requested page.
/// The candidate set is whatever the storage layer considers relevant.
pub fn rank_candidates<'a, I>(resolved: &ResolvedQuery, candidates: I, request: &PageRequest) -> Page
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if resolved.is_empty() {
        return Page::empty(request);
    }
    let scored = candidates
        .into_iter()
        .map(|recipe| score_recipe(recipe, resolved))
        .collect();
    paginate(scored, request)
}

/// The full pipeline over an in-memory catalog: resolve, pick candidates,
/// score, rank, page.
pub struct SearchEngine {
    handle: IndexHandle,
    options: ResolveOptions,
    snapshot_path: Option<PathBuf>,
}

impl SearchEngine {
    pub fn new(catalog: Catalog, config: &EngineConfig) -> std::result::Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self {
            handle: IndexHandle::new(catalog),
            options: config.resolve_options(),
            snapshot_path: None,
        })
    }

    /// Loads a saved snapshot from `path`, or starts from `fallback` when
    /// there is none yet. Either way, [`SearchEngine::save_snapshot`] later
    /// writes back to `path`.
    pub fn from_snapshot_or(path: &Path, fallback: Catalog, config: &EngineConfig) -> Result<Self> {
        let catalog = if path.exists() {
            load_snapshot(path)?
        } else {
            tracing::info!(path = %path.display(), "no snapshot yet, using supplied catalog");
            fallback
        };
        let mut engine = Self::new(catalog, config)?;
        engine.snapshot_path = Some(path.to_path_buf());
        Ok(engine)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.handle.load()
    }

    pub fn version(&self) -> u64 {
        self.handle.version()
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn resolve<I, S>(&self, raw_inputs: I) -> ResolvedQuery
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve(raw_inputs, &self.snapshot().index, &self.options)
    }

    pub fn explain<I, S>(&self, raw_inputs: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        resolve_detailed(raw_inputs, &self.snapshot().index, &self.options)
    }

    pub fn search<I, S>(&self, raw_inputs: I, request: &PageRequest) -> Page
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let snapshot = self.snapshot();
        let resolved = resolve(raw_inputs, &snapshot.index, &self.options);
        if resolved.is_empty() {
            tracing::debug!("nothing resolved, empty page");
            return Page::empty(request);
        }

        let candidates = snapshot.catalog.candidates(&resolved);
        tracing::debug!(
            resolved = resolved.len(),
            candidates = candidates.len(),
            version = snapshot.version,
            "scoring candidates"
        );
        rank_candidates(&resolved, candidates, request)
    }

    /// Validates and swaps in a new catalog. On error the current snapshot
    /// keeps serving.
    pub fn reload(&self, catalog: Catalog) -> std::result::Result<u64, CatalogError> {
        if let Err(e) = catalog.validate() {
            tracing::warn!(error = %e, "rejected catalog reload");
            return Err(e);
        }
        Ok(self.handle.swap(catalog))
    }

    /// Writes the current catalog to the snapshot path, if the engine has one.
    pub fn save_snapshot(&self) -> Result<()> {
        match &self.snapshot_path {
            Some(path) => save_snapshot(&self.snapshot().catalog, path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Ingredient;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Ingredient::new(1, "egg").with_aliases(&["eggs"]),
                Ingredient::new(2, "butter"),
                Ingredient::new(3, "salt"),
                Ingredient::new(4, "potato").with_aliases(&["potatoes"]),
            ],
            vec![
                Recipe::new(1, "Scrambled Eggs", &["egg", "butter", "salt"]),
                Recipe::new(2, "Boiled Potatoes with Butter", &["potato", "butter", "salt"]),
                Recipe::new(3, "Plain Potatoes", &["potato"]),
            ],
        )
    }

    fn engine() -> SearchEngine {
        SearchEngine::new(catalog(), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn search_ranks_candidates() {
        let page = engine().search(["Eggs", "butter"], &PageRequest::default());
        let titles: Vec<&str> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Scrambled Eggs", "Boiled Potatoes with Butter"]);
        assert_eq!(page.items[0].score, 0.667);
        assert_eq!(page.items[1].score, 0.333);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn unresolved_search_is_an_empty_page() {
        let page = engine().search(["zzzz"], &PageRequest::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn reload_swaps_snapshot_and_bumps_version() {
        let engine = engine();
        let before = engine.snapshot();
        assert_eq!(engine.version(), 1);

        let mut next = catalog();
        next.ingredients.push(Ingredient::new(5, "rice"));
        assert_eq!(engine.reload(next).unwrap(), 2);

        assert_eq!(engine.resolve(["rice"]).into_names(), vec!["rice"]);
        // A reader holding the old snapshot is unaffected.
        assert!(before.index.lookup_exact("rice").is_none());
        assert_eq!(before.version, 1);
    }

    #[test]
    fn invalid_reload_keeps_current_snapshot() {
        let engine = engine();
        let mut bad = catalog();
        bad.ingredients.push(Ingredient::new(9, "EGG"));
        assert!(engine.reload(bad).is_err());
        assert_eq!(engine.version(), 1);
    }

    #[test]
    fn alias_shadowing_a_canonical_is_rejected() {
        let shadowing = Catalog::new(
            vec![
                Ingredient::new(1, "green onion").with_aliases(&["spring onion"]),
                Ingredient::new(2, "scallion").with_aliases(&["green onion"]),
            ],
            Vec::new(),
        );
        assert!(matches!(
            SearchEngine::new(shadowing.clone(), &EngineConfig::default()),
            Err(CatalogError::AliasShadowsCanonical { .. })
        ));

        let engine = engine();
        assert!(engine.reload(shadowing).is_err());
        assert_eq!(engine.version(), 1);
    }

    #[test]
    fn explain_reports_stages() {
        let resolutions = engine().explain(["potatos", "xyzzy"]);
        assert_eq!(resolutions.len(), 2);
        assert!(resolutions[0].stage.is_some());
        assert_eq!(resolutions[0].names, vec!["potato"]);
        assert_eq!(resolutions[1].stage, None);
    }

    #[test]
    fn concurrent_reads_during_reload() {
        let engine = Arc::new(engine());
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let page = engine.search(["egg"], &PageRequest::default());
                        assert_eq!(page.items[0].title, "Scrambled Eggs");
                    }
                })
            })
            .collect();
        for _ in 0..10 {
            engine.reload(catalog()).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(engine.version(), 11);
    }

    #[test]
    fn concurrent_swaps_never_move_version_backwards() {
        for _ in 0..50 {
            let handle = Arc::new(IndexHandle::new(catalog()));
            let writers: Vec<_> = (0..8u64)
                .map(|i| {
                    let handle = Arc::clone(&handle);
                    std::thread::spawn(move || {
                        let mut next = catalog();
                        next.ingredients.push(Ingredient::new(100 + i, &format!("spice {i}")));
                        handle.swap(next)
                    })
                })
                .collect();
            let mut versions: Vec<u64> = writers.into_iter().map(|w| w.join().unwrap()).collect();
            versions.sort_unstable();

            assert_eq!(versions, (2..=9).collect::<Vec<u64>>());
            assert_eq!(handle.version(), 9);
            // The current snapshot is the one from the last swap.
            assert_eq!(handle.load().catalog.ingredients.len(), catalog().ingredients.len() + 1);
        }
    }

    #[test]
    fn snapshot_round_trip_through_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.bin");
        let config = EngineConfig::default();

        let engine = SearchEngine::from_snapshot_or(&path, catalog(), &config).unwrap();
        engine.save_snapshot().unwrap();

        let restored = SearchEngine::from_snapshot_or(&path, Catalog::default(), &config).unwrap();
        assert_eq!(restored.snapshot().catalog, catalog());
    }
}
