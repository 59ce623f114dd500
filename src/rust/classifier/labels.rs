use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::artifact_store::ArtifactError;

/// Maps classifier class ids to human-readable class names for one level.
#[derive(Debug, Clone, Default)]
pub struct ClassLabelTable {
    names: HashMap<i64, String>,
}

impl ClassLabelTable {
    pub fn new(names: HashMap<i64, String>) -> Self {
        Self { names }
    }

    /// Loads a `labels.json` artifact of the form `{"0": "Petição", "1": "Manifestação"}`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.display().to_string()));
        }
        let names: HashMap<i64, String> = serde_json::from_slice(&fs::read(path)?)?;
        log::info!("Loaded {} class labels from {:?}", names.len(), path);
        Ok(Self::new(names))
    }

    pub fn lookup(&self, class_id: i64) -> Option<&str> {
        self.names.get(&class_id).map(String::as_str)
    }

    /// Class name for `class_id`, or `fallback` when the id is not in the table.
    pub fn name_of<'a>(&'a self, class_id: i64, fallback: &'a str) -> &'a str {
        self.lookup(class_id).unwrap_or(fallback)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.values().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for ClassLabelTable {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(id, name)| (id, name.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UNKNOWN_CLASS_NAME;

    #[test]
    fn test_known_and_unknown_ids() {
        let table: ClassLabelTable = [(0, "Petição"), (1, "Manifestação")].into_iter().collect();
        assert_eq!(table.name_of(1, UNKNOWN_CLASS_NAME), "Manifestação");
        assert_eq!(table.name_of(42, UNKNOWN_CLASS_NAME), "Unknown");
        assert_eq!(table.name_of(-1, UNKNOWN_CLASS_NAME), "Unknown");
        assert_eq!(table.name_of(42, "Desconhecida"), "Desconhecida");
        assert!(table.contains_name("Petição"));
        assert!(!table.contains_name("Sentença"));
    }

    #[test]
    fn test_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"0": "Petição", "3": "Recurso"}"#)?;

        let table = ClassLabelTable::from_file(&path)?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.name_of(3, UNKNOWN_CLASS_NAME), "Recurso");
        assert_eq!(table.name_of(1, UNKNOWN_CLASS_NAME), "Unknown");
        Ok(())
    }

    #[test]
    fn test_from_file_with_non_numeric_id() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"zero": "Petição"}"#)?;
        assert!(matches!(ClassLabelTable::from_file(&path), Err(ArtifactError::Parse(_))));
        Ok(())
    }
}
