use crate::error::{BumpError, Result};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const COLLECTIONS_KEY: &str = "collections";

/// Typed view of one entry under `collections`; other keys are ignored.
#[derive(Debug, Deserialize)]
struct CollectionEntry {
    name: String,
}

impl CollectionEntry {
    fn from_value(index: usize, entry: &Value) -> Result<Self> {
        serde_yaml::from_value(entry.clone()).map_err(|e| {
            BumpError::Manifest(format!(
                "Invalid entry #{} under '{}': {}",
                index + 1,
                COLLECTIONS_KEY,
                e
            ))
        })
    }
}

/// A requirements.yml document loaded for in-place editing
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: PathBuf,
    root: Value,
}

impl ManifestDocument {
    /// Read and parse the manifest at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BumpError::Manifest(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::parse(path, &content)
    }

    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref();
        let root: Value = serde_yaml::from_str(content).map_err(|e| {
            BumpError::Manifest(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        let doc = Self {
            path: path.to_path_buf(),
            root,
        };
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<()> {
        self.collection_names().map(|_| ())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn collections(&self) -> Result<&Vec<Value>> {
        self.root
            .get(COLLECTIONS_KEY)
            .ok_or_else(|| missing_collections(&self.path))?
            .as_sequence()
            .ok_or_else(|| not_a_sequence(&self.path))
    }

    pub fn collections_mut(&mut self) -> Result<&mut Vec<Value>> {
        let path = self.path.clone();
        self.root
            .get_mut(COLLECTIONS_KEY)
            .ok_or_else(|| missing_collections(&path))?
            .as_sequence_mut()
            .ok_or_else(|| not_a_sequence(&path))
    }

    /// Collection names in document order
    pub fn collection_names(&self) -> Result<Vec<String>> {
        self.collections()?
            .iter()
            .enumerate()
            .map(|(index, entry)| CollectionEntry::from_value(index, entry).map(|e| e.name))
            .collect()
    }

    /// Serialize the document in block style
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Write the document back to its path.
    ///
    /// The content goes to a temporary file next to the manifest which is then
    /// renamed over it. A symlinked manifest is written through to its target.
    pub fn save(&self) -> Result<()> {
        let content = self.to_yaml_string()?;
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut staged = tempfile::NamedTempFile::new_in(&dir)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        if let Ok(meta) = fs::metadata(&target) {
            fs::set_permissions(staged.path(), meta.permissions())?;
        }
        staged.persist(&target).map_err(|e| {
            BumpError::Manifest(format!(
                "Failed to write '{}': {}",
                target.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

fn missing_collections(path: &Path) -> BumpError {
    BumpError::Manifest(format!(
        "'{}' has no top-level '{}' key",
        path.display(),
        COLLECTIONS_KEY
    ))
}

fn not_a_sequence(path: &Path) -> BumpError {
    BumpError::Manifest(format!(
        "'{}' in '{}' is not a list",
        COLLECTIONS_KEY,
        path.display()
    ))
}
