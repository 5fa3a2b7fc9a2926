//! # Class index → name/remedy lookup tables
//!
//! Two static JSON files describe the classifier's output classes:
//!
//! - `class_indices.json` — stringified index → disease name,
//!   e.g. `{"3": "Apple___healthy"}`.
//! - `disease_info.json` — stringified index → object with at least a
//!   `solution` field (remedy text); `name` and `description` are optional.
//!
//! Both tables are loaded once at startup and never mutated afterwards, so
//! they are safe to share across concurrent readers. A missing or malformed
//! file degrades to an empty table with an operator warning; lookups then
//! fall back to generated placeholders.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Per-class entry from `disease_info.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiseaseInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
}

/// The two lookup tables, immutable for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct LabelTables {
    class_map: HashMap<String, String>,
    disease_info: HashMap<String, DiseaseInfo>,
}

impl LabelTables {
    pub fn new(
        class_map: HashMap<String, String>,
        disease_info: HashMap<String, DiseaseInfo>,
    ) -> Self {
        Self {
            class_map,
            disease_info,
        }
    }

    /// Load both tables, degrading each to empty on any failure.
    pub fn load(class_path: &Path, info_path: &Path) -> Self {
        Self {
            class_map: load_table(class_path),
            disease_info: load_table(info_path),
        }
    }

    /// Display name for a class index; `Class_<idx>` when unknown.
    pub fn display_name(&self, idx: usize) -> String {
        self.class_map
            .get(&idx.to_string())
            .cloned()
            .unwrap_or_else(|| format!("Class_{idx}"))
    }

    /// Remedy text for a class index; a fixed placeholder when unknown.
    pub fn remedy(&self, idx: usize) -> String {
        self.disease_info
            .get(&idx.to_string())
            .and_then(|info| info.solution.clone())
            .unwrap_or_else(|| "No remedy available".to_string())
    }

    pub fn class_count(&self) -> usize {
        self.class_map.len()
    }
}

fn load_table<T>(path: &Path) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(
                    "label table {} is malformed, using an empty table: {e}",
                    path.display()
                );
                T::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "label table {} is missing, lookups will use placeholders",
                path.display()
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!(
                "label table {} is unreadable, using an empty table: {e}",
                path.display()
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tables() -> LabelTables {
        let class_map = HashMap::from([("0".to_string(), "Tomato___healthy".to_string())]);
        let disease_info = HashMap::from([(
            "0".to_string(),
            DiseaseInfo {
                solution: Some("No action needed".to_string()),
                ..Default::default()
            },
        )]);
        LabelTables::new(class_map, disease_info)
    }

    #[test]
    fn known_index_resolves_name_and_remedy() {
        let tables = sample_tables();
        assert_eq!(tables.display_name(0), "Tomato___healthy");
        assert_eq!(tables.remedy(0), "No action needed");
    }

    #[test]
    fn unknown_index_falls_back_to_placeholders() {
        let tables = LabelTables::default();
        assert_eq!(tables.display_name(5), "Class_5");
        assert_eq!(tables.remedy(5), "No remedy available");
    }

    #[test]
    fn entry_without_solution_uses_placeholder_remedy() {
        let disease_info = HashMap::from([("1".to_string(), DiseaseInfo::default())]);
        let tables = LabelTables::new(HashMap::new(), disease_info);
        assert_eq!(tables.remedy(1), "No remedy available");
    }

    #[test]
    fn missing_and_malformed_files_load_empty() {
        let dir = std::env::temp_dir().join(format!("cropsense_labels_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("class_indices.json");
        std::fs::write(&good, r#"{"0": "Tomato___healthy"}"#).unwrap();
        let bad = dir.join("disease_info.json");
        std::fs::write(&bad, "not json at all").unwrap();

        let tables = LabelTables::load(&good, &bad);
        assert_eq!(tables.display_name(0), "Tomato___healthy");
        assert_eq!(tables.remedy(0), "No remedy available");

        let tables = LabelTables::load(&dir.join("absent.json"), &dir.join("also_absent.json"));
        assert_eq!(tables.class_count(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
