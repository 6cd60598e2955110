//! The category -> titles data file.
//!
//! Gameplay cannot proceed without any titles, so a missing or unparseable
//! catalog is the one error in the program that aborts startup instead of
//! being absorbed.

use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::path::Path;

pub type Catalog = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read catalog: {e}"),
            Self::Parse(e) => write!(f, "could not parse catalog: {e}"),
            Self::Empty => write!(f, "catalog contains no titles"),
        }
    }
}

impl Error for CatalogError {}

pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(CatalogError::Io)?;
    let catalog: Catalog = serde_json::from_str(&raw).map_err(CatalogError::Parse)?;
    let title_count: usize = catalog.values().map(Vec::len).sum();
    if title_count == 0 {
        return Err(CatalogError::Empty);
    }
    info!(
        "Loaded catalog '{}': {} categories, {} titles.",
        path.display(),
        catalog.len(),
        title_count
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_categories() {
        let dir = std::env::temp_dir().join("reelrunner_catalog_test.json");
        std::fs::write(&dir, r#"{"Sci-Fi": ["The Matrix", "Inception"], "Drama": ["Parasite"]}"#)
            .unwrap();
        let catalog = load(&dir).unwrap();
        assert_eq!(catalog["Sci-Fi"], vec!["The Matrix", "Inception"]);
        assert_eq!(catalog.len(), 2);
        let _ = std::fs::remove_file(dir);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(matches!(
            load(Path::new("no/such/catalog.json")),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let dir = std::env::temp_dir().join("reelrunner_catalog_empty.json");
        std::fs::write(&dir, r#"{"Drama": []}"#).unwrap();
        assert!(matches!(load(&dir), Err(CatalogError::Empty)));
        let _ = std::fs::remove_file(dir);
    }
}
