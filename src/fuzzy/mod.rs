// File: src/fuzzy/mod.rs
pub mod ratio;
