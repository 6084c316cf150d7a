// 🧩 Schema Manager - schema lifecycle + schema↔file associations
//
// Schemas are JSON Schema documents stored in the config directory. Each
// schema owns a subdirectory of JSON files that are validated against it.
// Associations survive restarts via schema-associations.json, written in the
// same camelCase shape the original config files use.

use crate::files::{FileInfo, FileStore, ASSOCIATIONS_FILE};
use crate::logging::Logger;
use crate::validation::{FileKind, ValidationIssue, ValidationReport, ValidationService};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// SCHEMA TYPES
// ============================================================================

/// One JSON file associated with a schema, with its last validation verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFileEntry {
    pub name: String,
    pub path: String,
    pub content: Value,
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
}

/// A managed schema and the files currently associated with it
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    pub name: String,
    pub path: String,
    pub content: Value,
    pub associated_files: Vec<JsonFileEntry>,
}

/// On-disk record inside schema-associations.json
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaAssociation {
    schema_path: String,
    schema_name: String,
    associated_files: Vec<JsonFileEntry>,
}

// ============================================================================
// SCHEMA MANAGER
// ============================================================================

pub struct SchemaManager {
    store: FileStore,
    validator: ValidationService,
    logger: Logger,
}

impl SchemaManager {
    pub fn new(store: FileStore) -> Self {
        Self::with_logger(store, Logger::default())
    }

    pub fn with_logger(store: FileStore, logger: Logger) -> Self {
        SchemaManager {
            store,
            validator: ValidationService::new(),
            logger,
        }
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Create a new schema in the config directory.
    ///
    /// The name gets a .json extension if missing; the content must compile
    /// as a JSON Schema.
    pub fn create_schema(&self, name: &str, content: Value) -> Result<SchemaInfo> {
        self.logger.info(&format!("Creating schema \"{}\"", name));

        if let Err(issue) = self.validator.validate_file_name(name, FileKind::Schema) {
            bail!("{}", issue.message);
        }

        let schema_name = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.json", name)
        };

        let compile = self.validator.validate_schema(&content);
        if !compile.is_valid {
            let reason = compile
                .errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Invalid schema content".to_string());
            bail!("{}", reason);
        }

        let serialized = serde_json::to_string_pretty(&content)?;
        let path = self.store.write_config_file(&schema_name, &serialized)?;

        self.logger
            .info(&format!("Schema created successfully: {}", path.display()));

        Ok(SchemaInfo {
            name: schema_name,
            path: path.display().to_string(),
            content,
            associated_files: Vec::new(),
        })
    }

    /// Load every valid schema from the config directory.
    /// The associations file and documents that do not compile are skipped.
    pub fn load_schemas(&self) -> Result<Vec<SchemaInfo>> {
        let files = self.store.list_config_files()?;

        let mut schemas = Vec::new();
        for file in files {
            if file.name == ASSOCIATIONS_FILE {
                continue;
            }

            let compile = self.validator.validate_schema(&file.content);
            if !compile.is_valid {
                self.logger
                    .warn(&format!("Invalid schema file skipped: {}", file.name));
                continue;
            }

            schemas.push(SchemaInfo {
                name: file.name,
                path: file.path.display().to_string(),
                content: file.content,
                associated_files: Vec::new(),
            });
        }

        self.logger
            .info(&format!("Schemas loaded successfully: {}", schemas.len()));
        Ok(schemas)
    }

    /// Delete a schema's backing file
    pub fn delete_schema(&self, schema: &SchemaInfo) -> Result<()> {
        self.store.delete_file(schema.path.as_ref())?;
        self.logger
            .info(&format!("Schema deleted successfully: {}", schema.name));
        Ok(())
    }

    /// Persist all schema↔file associations
    pub fn save_associations(&self, schemas: &[SchemaInfo]) -> Result<()> {
        let associations: Vec<SchemaAssociation> = schemas
            .iter()
            .map(|schema| SchemaAssociation {
                schema_path: schema.path.clone(),
                schema_name: schema.name.clone(),
                associated_files: schema.associated_files.clone(),
            })
            .collect();

        let serialized = serde_json::to_string_pretty(&associations)?;
        self.store.write_config_file(ASSOCIATIONS_FILE, &serialized)?;

        self.logger.info("Schema associations saved successfully");
        Ok(())
    }

    /// Restore associations onto already-loaded schemas.
    ///
    /// Each associated file is re-read from disk when possible (falling back
    /// to the cached content) and re-validated against the current schema.
    pub fn load_associations(&self, schemas: &mut [SchemaInfo]) -> Result<()> {
        let files = self.store.list_config_files()?;
        let Some(assoc_file) = files.into_iter().find(|f| f.name == ASSOCIATIONS_FILE) else {
            self.logger.info("No schema associations file found");
            return Ok(());
        };

        let associations: Vec<SchemaAssociation> =
            serde_json::from_value(assoc_file.content).unwrap_or_default();

        for association in associations {
            let Some(schema) = schemas.iter_mut().find(|s| {
                s.path == association.schema_path || s.name == association.schema_name
            }) else {
                continue;
            };

            for entry in association.associated_files {
                let content = match self.store.read_file(entry.path.as_ref()) {
                    Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                        Ok(value) => value,
                        Err(_) => entry.content.clone(),
                    },
                    // File moved or deleted since the association was saved
                    Err(_) => entry.content.clone(),
                };

                if content.is_null() {
                    continue;
                }

                let report = self
                    .validator
                    .validate_json_with_schema(&content, &schema.content);

                schema.associated_files.push(JsonFileEntry {
                    name: entry.name,
                    path: entry.path,
                    content,
                    is_valid: report.is_valid,
                    errors: report.errors,
                });
            }

            self.logger.info(&format!(
                "Loaded {} associated files for schema {}",
                schema.associated_files.len(),
                schema.name
            ));
        }

        Ok(())
    }

    /// Create a JSON file inside a schema's subdirectory.
    /// The name, size and JSON format are all checked first.
    pub fn create_schema_json_file(
        &self,
        schema_name: &str,
        file_name: &str,
        content: &str,
    ) -> Result<std::path::PathBuf> {
        if let Err(issue) = self.validator.validate_file_name(file_name, FileKind::Json) {
            bail!("{}", issue.message);
        }

        if let Err(issue) = self.validator.validate_content_size(content) {
            bail!("{}", issue.message);
        }

        if self.validator.validate_json_string(content).is_err() {
            bail!("Invalid JSON format");
        }

        let path = self
            .store
            .write_schema_json_file(schema_name, file_name, content)?;

        self.logger.info(&format!(
            "Schema JSON file created successfully: {}",
            path.display()
        ));
        Ok(path)
    }

    /// Load the JSON files in a schema's subdirectory, validating each one
    pub fn load_schema_json_files(
        &self,
        schema_name: &str,
        schema: &SchemaInfo,
    ) -> Result<Vec<JsonFileEntry>> {
        let files = self.store.list_schema_json_files(schema_name)?;

        let entries: Vec<JsonFileEntry> = files
            .into_iter()
            .map(|file| self.entry_from_file(file, schema))
            .collect();

        self.logger.info(&format!(
            "Schema JSON files loaded successfully: {} for {}",
            entries.len(),
            schema_name
        ));
        Ok(entries)
    }

    /// Validate one document against a schema
    pub fn validate_entry(&self, schema: &SchemaInfo, content: &Value) -> ValidationReport {
        self.validator
            .validate_json_with_schema(content, &schema.content)
    }

    fn entry_from_file(&self, file: FileInfo, schema: &SchemaInfo) -> JsonFileEntry {
        let report = self
            .validator
            .validate_json_with_schema(&file.content, &schema.content);

        JsonFileEntry {
            name: file.name,
            path: file.path.display().to_string(),
            content: file.content,
            is_valid: report.is_valid,
            errors: report.errors,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
