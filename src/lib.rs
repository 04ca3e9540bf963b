// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod persistence;

pub use crate::config::EngineConfig;
pub use crate::core::catalog::Catalog;
pub use crate::core::engine::SearchEngine;
pub use crate::core::ranker::{Page, PageRequest};
pub use crate::core::types::{Ingredient, Recipe, ResolvedQuery, ScoredRecipe};
pub use crate::error::{CatalogError, PantryError};
