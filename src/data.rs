//! Dataset models and loading.
//!
//! Two JSON inputs: the hierarchy dataset (root → action family → object
//! type with a count) and the flat detail dataset (object-type name → list
//! of catalog records). Both are loaded once at startup and read-only after.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::hierarchy::norm;

/// Error while loading a dataset.
pub struct DataError {
    pub message: String,
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Root of the hierarchy dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHierarchy {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<RawCategory>,
}

/// An action family: one level below the root, holds object-type leaves.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<RawLeaf>,
}

/// An object type with its count. Missing counts read as zero.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLeaf {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// A single catalog record backing one object in the detail panel.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "unitCode")]
    pub unit_code: String,
    #[serde(default, rename = "collectionsURL")]
    pub collections_url: String,
    #[serde(default, rename = "EDANurl")]
    pub edan_url: String,
    #[serde(default)]
    pub action_family: String,
}

/// Flat detail dataset: object-type name → records.
///
/// The backing JSON may key entries by the raw display name or by an
/// already-normalized name; [`DetailStore::records_for`] tolerates both.
#[derive(Debug, Default)]
pub struct DetailStore {
    by_type: HashMap<String, Vec<DetailRecord>>,
}

impl DetailStore {
    pub fn new(by_type: HashMap<String, Vec<DetailRecord>>) -> Self {
        Self { by_type }
    }

    /// All records for an object type. Tries the raw key, then the normalized
    /// key, then a normalized comparison against every stored key. A miss is
    /// an empty slice, never an error.
    pub fn records_for(&self, object_type: &str) -> &[DetailRecord] {
        if let Some(rows) = self.by_type.get(object_type) {
            return rows;
        }
        let key = norm(object_type);
        if let Some(rows) = self.by_type.get(&key) {
            return rows;
        }
        for (k, rows) in &self.by_type {
            if norm(k) == key {
                return rows;
            }
        }
        &[]
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

/// Load the hierarchy dataset from a JSON file.
pub fn load_hierarchy(path: &Path) -> Result<RawHierarchy, DataError> {
    let bytes = std::fs::read(path).map_err(|e| DataError {
        message: format!("Cannot read {}: {}", path.display(), e),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| DataError {
        message: format!("Bad hierarchy data in {}: {}", path.display(), e),
    })
}

/// Load the detail dataset from a JSON file.
pub fn load_details(path: &Path) -> Result<DetailStore, DataError> {
    let bytes = std::fs::read(path).map_err(|e| DataError {
        message: format!("Cannot read {}: {}", path.display(), e),
    })?;
    let by_type: HashMap<String, Vec<DetailRecord>> =
        serde_json::from_slice(&bytes).map_err(|e| DataError {
            message: format!("Bad detail data in {}: {}", path.display(), e),
        })?;
    Ok(DetailStore::new(by_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(key: &str) -> DetailStore {
        let mut map = HashMap::new();
        map.insert(
            key.to_string(),
            vec![DetailRecord {
                title: "Copper kettle".into(),
                unit_code: "NMAH".into(),
                collections_url: String::new(),
                edan_url: "edanmdm:nmah_1".into(),
                action_family: "Eat, Cook & Drink".into(),
            }],
        );
        DetailStore::new(map)
    }

    #[test]
    fn lookup_raw_key() {
        let store = store_with("Kettles");
        assert_eq!(store.records_for("Kettles").len(), 1);
    }

    #[test]
    fn lookup_falls_back_to_normalized_key() {
        // Store keyed by normalized name, queried with display casing.
        let store = store_with("kettles");
        assert_eq!(store.records_for("Kettles").len(), 1);
    }

    #[test]
    fn lookup_matches_differently_cased_store_key() {
        // Store keyed by raw casing, queried differently-cased.
        let store = store_with("KETTLES");
        assert_eq!(store.records_for("kettles").len(), 1);
    }

    #[test]
    fn lookup_miss_is_empty() {
        let store = store_with("Kettles");
        assert!(store.records_for("Teapots").is_empty());
    }

    #[test]
    fn partial_record_defaults() {
        let rec: DetailRecord = serde_json::from_str(r#"{"title": "Spoon"}"#).unwrap();
        assert_eq!(rec.title, "Spoon");
        assert!(rec.edan_url.is_empty());
        assert!(rec.action_family.is_empty());
    }

    #[test]
    fn missing_leaf_value_reads_zero() {
        let leaf: RawLeaf = serde_json::from_str(r#"{"name": "Trivets"}"#).unwrap();
        assert_eq!(leaf.value, 0.0);
    }
}
