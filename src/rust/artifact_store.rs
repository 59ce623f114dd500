use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::classifier::Level;

const VOCABULARY_FILE: &str = "vocabulary.json";
const MODEL_FILE: &str = "model.onnx";
const LABELS_FILE: &str = "labels.json";
const LEXICON_FILE: &str = "lexicon.json";
const CHECKSUMS_FILE: &str = "checksums.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Locates the immutable artifacts (vocabularies, models, label tables, lexicon) on disk.
///
/// Layout under the root directory:
/// ```text
/// lexicon.json          optional
/// checksums.json        optional, {"n1/model.onnx": "<sha256 hex>", ...}
/// n1/vocabulary.json
/// n1/model.onnx
/// n1/labels.json
/// n2/...
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Creates a store rooted at the default artifacts directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("LEXCLASS_ARTIFACTS") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("lexclass").join("artifacts");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".local").join("share").join("lexclass").join("artifacts");
        }

        env::temp_dir().join("lexclass").join("artifacts")
    }

    /// Opens a store rooted at `root`, which must exist.
    pub fn new<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("artifacts directory {:?} does not exist", root),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn level_dir(&self, level: Level) -> PathBuf {
        self.root.join(level.as_str())
    }

    pub fn vocabulary_path(&self, level: Level) -> PathBuf {
        self.level_dir(level).join(VOCABULARY_FILE)
    }

    pub fn model_path(&self, level: Level) -> PathBuf {
        self.level_dir(level).join(MODEL_FILE)
    }

    pub fn labels_path(&self, level: Level) -> PathBuf {
        self.level_dir(level).join(LABELS_FILE)
    }

    /// Path of the lexicon override, if one is present.
    pub fn lexicon_path(&self) -> Option<PathBuf> {
        let path = self.root.join(LEXICON_FILE);
        path.exists().then_some(path)
    }

    pub fn is_level_available(&self, level: Level) -> bool {
        let paths = [
            self.vocabulary_path(level),
            self.model_path(level),
            self.labels_path(level),
        ];
        for path in &paths {
            log::debug!("  {:?} (exists: {})", path, path.exists());
        }
        paths.iter().all(|p| p.exists())
    }

    /// Checks every file listed in `checksums.json` against its SHA-256 digest.
    ///
    /// A store without `checksums.json` passes trivially.
    pub fn verify_checksums(&self) -> Result<(), ArtifactError> {
        let manifest_path = self.root.join(CHECKSUMS_FILE);
        if !manifest_path.exists() {
            log::info!("No {} in {:?}, skipping verification", CHECKSUMS_FILE, self.root);
            return Ok(());
        }

        let manifest: BTreeMap<String, String> = serde_json::from_slice(&fs::read(&manifest_path)?)?;
        for (relative, expected) in &manifest {
            let path = self.root.join(relative);
            if !path.exists() {
                return Err(ArtifactError::NotFound(path.display().to_string()));
            }
            let actual = Self::hash_file(&path)?;
            if !actual.eq_ignore_ascii_case(expected) {
                log::error!("{} hash mismatch: expected {}, got {}", relative, expected, actual);
                return Err(ArtifactError::HashMismatch {
                    path: relative.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
            log::debug!("Verified {}", relative);
        }

        log::info!("Verified {} artifact checksums", manifest.len());
        Ok(())
    }

    fn hash_file(path: &Path) -> Result<String, ArtifactError> {
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256_hex(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    #[test]
    fn test_paths() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;

        assert!(store.vocabulary_path(Level::N1).ends_with("n1/vocabulary.json"));
        assert!(store.model_path(Level::N2).ends_with("n2/model.onnx"));
        assert!(store.labels_path(Level::N2).ends_with("n2/labels.json"));
        assert!(store.lexicon_path().is_none());
        assert!(!store.is_level_available(Level::N1));
        Ok(())
    }

    #[test]
    fn test_missing_root() {
        assert!(ArtifactStore::new("/nonexistent/lexclass/artifacts").is_err());
    }

    #[test]
    fn test_level_available() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        fs::create_dir_all(store.level_dir(Level::N1))?;
        for path in [
            store.vocabulary_path(Level::N1),
            store.model_path(Level::N1),
            store.labels_path(Level::N1),
        ] {
            fs::write(path, b"{}")?;
        }
        assert!(store.is_level_available(Level::N1));
        assert!(!store.is_level_available(Level::N2));
        Ok(())
    }

    #[test]
    fn test_verify_checksums() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;

        // no manifest: nothing to verify
        store.verify_checksums()?;

        fs::create_dir_all(store.level_dir(Level::N1))?;
        fs::write(store.labels_path(Level::N1), br#"{"0": "Outros"}"#)?;
        let manifest = format!(
            r#"{{"n1/labels.json": "{}"}}"#,
            sha256_hex(br#"{"0": "Outros"}"#)
        );
        fs::write(dir.path().join(CHECKSUMS_FILE), manifest)?;
        store.verify_checksums()?;

        // corrupt the file
        fs::write(store.labels_path(Level::N1), b"corrupted data")?;
        let result = store.verify_checksums();
        assert!(matches!(result, Err(ArtifactError::HashMismatch { .. })));
        Ok(())
    }

    #[test]
    fn test_verify_checksums_missing_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let store = ArtifactStore::new(dir.path())?;
        fs::write(dir.path().join(CHECKSUMS_FILE), r#"{"n2/model.onnx": "00"}"#)?;
        assert!(matches!(store.verify_checksums(), Err(ArtifactError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn test_default_artifacts_dir() {
        env::set_var("LEXCLASS_ARTIFACTS", "/tmp/lexclass-test-artifacts");
        let path = ArtifactStore::default_artifacts_dir();
        assert_eq!(path, PathBuf::from("/tmp/lexclass-test-artifacts"));
        env::remove_var("LEXCLASS_ARTIFACTS");

        let path = ArtifactStore::default_artifacts_dir();
        assert!(path.to_string_lossy().contains("lexclass"));
    }
}
