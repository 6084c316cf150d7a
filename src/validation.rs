// ✅ Validation Layer - JSON parsing, schema compilation, naming rules
// Collects every instance error instead of stopping at the first

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum accepted content size for a JSON document (1 MiB)
pub const MAX_CONTENT_SIZE: usize = 1024 * 1024;

/// Maximum accepted file name length
pub const MAX_FILE_NAME_LEN: usize = 200;

// ============================================================================
// VALIDATION RESULT TYPES
// ============================================================================

/// One validation problem: where in the instance, and what went wrong
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        ValidationReport {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<ValidationIssue>) -> Self {
        ValidationReport {
            is_valid: false,
            errors,
        }
    }
}

/// What kind of file a name is being checked for (affects error wording only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Schema,
    Json,
}

impl FileKind {
    fn label(&self) -> &'static str {
        match self {
            FileKind::Schema => "Schema",
            FileKind::Json => "File",
        }
    }
}

// ============================================================================
// VALIDATION SERVICE
// ============================================================================

pub struct ValidationService;

impl ValidationService {
    pub fn new() -> Self {
        ValidationService
    }

    /// Parse a JSON string, reporting a format issue on failure
    pub fn validate_json_string(&self, content: &str) -> Result<Value, ValidationIssue> {
        serde_json::from_str(content)
            .map_err(|e| ValidationIssue::new("", format!("Invalid JSON format: {}", e)))
    }

    /// Check that a document is itself a usable JSON Schema (compiles)
    pub fn validate_schema(&self, schema: &Value) -> ValidationReport {
        match jsonschema::validator_for(schema) {
            Ok(_) => ValidationReport::valid(),
            Err(e) => ValidationReport::invalid(vec![ValidationIssue::new(
                "",
                format!("Schema compilation error: {}", e),
            )]),
        }
    }

    /// Validate a JSON instance against a schema, collecting all errors
    pub fn validate_json_with_schema(&self, data: &Value, schema: &Value) -> ValidationReport {
        let validator = match jsonschema::validator_for(schema) {
            Ok(v) => v,
            Err(e) => {
                return ValidationReport::invalid(vec![ValidationIssue::new(
                    "",
                    format!("Schema compilation error: {}", e),
                )])
            }
        };

        let errors: Vec<ValidationIssue> = validator
            .iter_errors(data)
            .map(|err| ValidationIssue::new(err.instance_path().to_string(), err.to_string()))
            .collect();

        if errors.is_empty() {
            ValidationReport::valid()
        } else {
            ValidationReport::invalid(errors)
        }
    }

    /// Validate a file name for a schema or JSON file
    pub fn validate_file_name(&self, name: &str, kind: FileKind) -> Result<(), ValidationIssue> {
        let trimmed = name.trim();
        let label = kind.label();

        if trimmed.is_empty() {
            return Err(ValidationIssue::new(
                "",
                format!("{} name is required", label),
            ));
        }

        if trimmed.chars().any(|c| {
            matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*' | '/' | '\\') || (c as u32) < 0x20
        }) {
            return Err(ValidationIssue::new(
                "",
                format!("{} name contains invalid characters", label),
            ));
        }

        if trimmed.chars().count() > MAX_FILE_NAME_LEN {
            return Err(ValidationIssue::new(
                "",
                format!(
                    "{} name is too long (maximum {} characters)",
                    label, MAX_FILE_NAME_LEN
                ),
            ));
        }

        if Self::is_reserved_name(trimmed) {
            return Err(ValidationIssue::new(
                "",
                format!("{} name uses a reserved name", label),
            ));
        }

        Ok(())
    }

    /// Validate content size against the 1 MiB cap
    pub fn validate_content_size(&self, content: &str) -> Result<(), ValidationIssue> {
        if content.len() > MAX_CONTENT_SIZE {
            return Err(ValidationIssue::new(
                "",
                format!(
                    "Content is too large (maximum {}KB)",
                    MAX_CONTENT_SIZE / 1024
                ),
            ));
        }
        Ok(())
    }

    /// Windows reserved device names, bare or with any extension
    fn is_reserved_name(name: &str) -> bool {
        let base = name.split('.').next().unwrap_or(name).to_ascii_uppercase();

        match base.as_str() {
            "CON" | "PRN" | "AUX" | "NUL" => true,
            _ => {
                if let Some(digit) = base.strip_prefix("COM").or_else(|| base.strip_prefix("LPT")) {
                    digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit() && c != '0')
                } else {
                    false
                }
            }
        }
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name"]
        })
    }

    #[test]
    fn test_validate_json_with_schema_valid() {
        let service = ValidationService::new();
        let data = json!({"name": "John", "age": 30});

        let report = service.validate_json_with_schema(&data, &person_schema());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_validate_json_with_schema_missing_required() {
        let service = ValidationService::new();
        let data = json!({"age": 30});

        let report = service.validate_json_with_schema(&data, &person_schema());
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_validate_json_with_schema_collects_all_errors() {
        let service = ValidationService::new();
        let data = json!({"name": 42, "age": "old"});

        let report = service.validate_json_with_schema(&data, &person_schema());
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
        // Paths point at the offending members
        assert!(report.errors.iter().any(|e| e.path.contains("name")));
        assert!(report.errors.iter().any(|e| e.path.contains("age")));
    }

    #[test]
    fn test_validate_json_with_schema_compilation_error() {
        let service = ValidationService::new();
        let bad_schema = json!({"type": "invalid-type"});
        let data = json!({"test": true});

        let report = service.validate_json_with_schema(&data, &bad_schema);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("Schema compilation error"));
    }

    #[test]
    fn test_validate_schema() {
        let service = ValidationService::new();

        assert!(service.validate_schema(&person_schema()).is_valid);
        assert!(!service.validate_schema(&json!({"type": "invalid-type"})).is_valid);
    }

    #[test]
    fn test_validate_json_string() {
        let service = ValidationService::new();

        let parsed = service.validate_json_string(r#"{"a": 1}"#).unwrap();
        assert_eq!(parsed, json!({"a": 1}));

        let err = service.validate_json_string("{ nope").unwrap_err();
        assert!(err.message.contains("Invalid JSON format"));
    }

    #[test]
    fn test_validate_file_name_ok() {
        let service = ValidationService::new();
        assert!(service.validate_file_name("user.json", FileKind::Json).is_ok());
        assert!(service
            .validate_file_name("  padded.json  ", FileKind::Schema)
            .is_ok());
    }

    #[test]
    fn test_validate_file_name_empty() {
        let service = ValidationService::new();
        let err = service.validate_file_name("   ", FileKind::Schema).unwrap_err();
        assert_eq!(err.message, "Schema name is required");
    }

    #[test]
    fn test_validate_file_name_invalid_chars() {
        let service = ValidationService::new();
        for name in ["a/b.json", "a\\b.json", "a:b.json", "a?.json", "a*.json"] {
            let err = service.validate_file_name(name, FileKind::Json).unwrap_err();
            assert_eq!(err.message, "File name contains invalid characters");
        }
    }

    #[test]
    fn test_validate_file_name_too_long() {
        let service = ValidationService::new();
        let long = "x".repeat(MAX_FILE_NAME_LEN + 1);
        assert!(service.validate_file_name(&long, FileKind::Json).is_err());

        let max = "x".repeat(MAX_FILE_NAME_LEN);
        assert!(service.validate_file_name(&max, FileKind::Json).is_ok());
    }

    #[test]
    fn test_validate_file_name_length_counts_chars_not_bytes() {
        let service = ValidationService::new();

        // 150 characters but 450 bytes; must still be accepted
        let multibyte = "文".repeat(150);
        assert!(multibyte.len() > MAX_FILE_NAME_LEN);
        assert!(service.validate_file_name(&multibyte, FileKind::Json).is_ok());

        let too_many = "文".repeat(MAX_FILE_NAME_LEN + 1);
        assert!(service.validate_file_name(&too_many, FileKind::Json).is_err());
    }

    #[test]
    fn test_validate_file_name_reserved() {
        let service = ValidationService::new();
        for name in ["CON", "con.json", "NUL.txt", "COM1", "lpt9.json"] {
            assert!(
                service.validate_file_name(name, FileKind::Json).is_err(),
                "{} should be reserved",
                name
            );
        }
        // Not reserved: longer device-like names and COM0
        for name in ["CONSOLE.json", "COM10.json", "COM0.json", "LPTX.json"] {
            assert!(
                service.validate_file_name(name, FileKind::Json).is_ok(),
                "{} should be allowed",
                name
            );
        }
    }

    #[test]
    fn test_validate_content_size() {
        let service = ValidationService::new();
        assert!(service.validate_content_size("{}").is_ok());

        let big = "x".repeat(MAX_CONTENT_SIZE + 1);
        let err = service.validate_content_size(&big).unwrap_err();
        assert!(err.message.contains("too large"));
    }
}
