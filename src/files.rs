// 🗂  File Store - all filesystem access for schemas and JSON documents
//
// Directory layout mirrors the app config directory:
//   <data_dir>/manyjson/schemas/           schema documents + associations file
//   <data_dir>/manyjson/schemas/<schema>/  JSON files owned by one schema

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the persisted schema↔file associations, kept out of schema
/// listings
pub const ASSOCIATIONS_FILE: &str = "schema-associations.json";

// ============================================================================
// FILE INFO
// ============================================================================

/// One JSON file found in a listing, with its parsed content
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub content: Value,
}

// ============================================================================
// FILE STORE
// ============================================================================

pub struct FileStore {
    config_dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the per-user data directory
    pub fn new() -> Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| anyhow!("no user data directory available"))?;
        Ok(FileStore {
            config_dir: base.join("manyjson").join("schemas"),
        })
    }

    /// Store rooted at an explicit directory (tests, CLI override)
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        FileStore {
            config_dir: dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Create the config directory if needed and return its path
    pub fn ensure_config_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "failed to create config directory {}",
                self.config_dir.display()
            )
        })?;
        Ok(&self.config_dir)
    }

    /// Write a file into the config directory (schemas, associations)
    pub fn write_config_file(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(file_name);
        fs::write(&path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(path)
    }

    /// Write a JSON file at an arbitrary path
    pub fn write_json_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
            .with_context(|| format!("failed to write JSON file {}", path.display()))
    }

    /// Write a JSON file into a schema's own subdirectory, creating it
    pub fn write_schema_json_file(
        &self,
        schema_name: &str,
        file_name: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let dir = self.create_schema_json_directory(schema_name)?;
        let path = dir.join(file_name);
        fs::write(&path, content)
            .with_context(|| format!("failed to write schema JSON file {}", path.display()))?;
        Ok(path)
    }

    pub fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read file {}", path.display()))
    }

    pub fn delete_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .with_context(|| format!("failed to delete file {}", path.display()))
    }

    /// All parseable *.json files directly in the config directory
    pub fn list_config_files(&self) -> Result<Vec<FileInfo>> {
        self.ensure_config_dir()?;
        Self::list_json_files(&self.config_dir)
    }

    /// All parseable *.json files in a schema's subdirectory.
    /// A schema without a subdirectory simply has no files yet.
    pub fn list_schema_json_files(&self, schema_name: &str) -> Result<Vec<FileInfo>> {
        let dir = self.schema_dir(schema_name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        Self::list_json_files(&dir)
    }

    /// Create the subdirectory that holds one schema's JSON files
    pub fn create_schema_json_directory(&self, schema_name: &str) -> Result<PathBuf> {
        let dir = self.schema_dir(schema_name);
        fs::create_dir_all(&dir).with_context(|| {
            format!("failed to create schema directory {}", dir.display())
        })?;
        Ok(dir)
    }

    /// Subdirectory for a schema: the schema file name minus its .json suffix
    fn schema_dir(&self, schema_name: &str) -> PathBuf {
        let stem = schema_name.strip_suffix(".json").unwrap_or(schema_name);
        self.config_dir.join(stem)
    }

    fn list_json_files(dir: &Path) -> Result<Vec<FileInfo>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to list directory {}", dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) if n.ends_with(".json") => n.to_string(),
                _ => continue,
            };

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read file {}", path.display()))?;

            // Files that are not JSON at all are skipped, not fatal
            match serde_json::from_str::<Value>(&raw) {
                Ok(content) => files.push(FileInfo {
                    name,
                    path,
                    content,
                }),
                Err(_) => continue,
            }
        }

        // read_dir order is platform-dependent
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

// ============================================================================
// TESTS
// ============================================================================
