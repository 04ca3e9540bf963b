// src/core/mod.rs
pub mod catalog;
pub mod engine;
pub mod index;
pub mod normalize;
pub mod ranker;
pub mod resolver;
pub mod scorer;
pub mod types;
