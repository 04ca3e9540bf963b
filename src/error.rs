// File: src/error.rs
//! Errors for the fallible edges of the crate: loading configuration, reading
//! the catalog feed and reading or writing snapshots. Normalization,
//! resolution, scoring and ranking never fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PantryError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl PantryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// A catalog snapshot that breaks the uniqueness rules the alias index
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("ingredient {id} has an empty canonical name")]
    EmptyCanonical { id: u64 },

    #[error("canonical names {first:?} and {second:?} both normalize to {key:?}")]
    DuplicateCanonical {
        key: String,
        first: String,
        second: String,
    },

    #[error("alias {key:?} of {alias_of:?} shadows the canonical name {canonical:?}")]
    AliasShadowsCanonical {
        key: String,
        canonical: String,
        alias_of: String,
    },
}

pub type Result<T> = std::result::Result<T, PantryError>;
