// File: src/persistence.rs
use crate::core::catalog::Catalog;
use crate::error::{PantryError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the catalog as a bincode snapshot. The file is written next to the
/// target and renamed over it, so readers never see a partial snapshot.
pub fn save_snapshot(catalog: &Catalog, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| PantryError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| PantryError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, catalog)?;
        writer.flush().map_err(|e| PantryError::io(temp_file.path(), e))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| PantryError::io(path, e.error))?;
    tracing::info!(
        path = %path.display(),
        ingredients = catalog.ingredients.len(),
        recipes = catalog.recipes.len(),
        "catalog snapshot saved"
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Catalog> {
    let file = File::open(path).map_err(|e| PantryError::io(path, e))?;
    let reader = BufReader::new(file);
    let catalog: Catalog = bincode::deserialize_from(reader)?;
    Ok(catalog)
}

/// Reads the JSON catalog feed: `{ "ingredients": [...], "recipes": [...] }`.
pub fn load_catalog_json(path: &Path) -> Result<Catalog> {
    let file = File::open(path).map_err(|e| PantryError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PantryError::json(path, e))
}
