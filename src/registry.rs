// 📂 File Registry - ordered list of managed JSON file paths
//
// Registration is deliberately unconditional: paths are recorded exactly as
// given, in call order, with duplicates kept. Nothing here touches the
// filesystem - the validation and schema layers decide what a path means.

use crate::logging::Logger;

// ============================================================================
// CONFIG
// ============================================================================

/// Registry options.
///
/// `verbose` enables instrumentation (lifecycle and per-operation log lines).
/// Off by default so the registry is silent in contexts where stdout is not
/// appropriate.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub verbose: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig { verbose: false }
    }
}

// ============================================================================
// JSON MANAGER
// ============================================================================

/// Registry of JSON file paths under management.
pub struct JsonManager {
    json_files: Vec<String>,
    logger: Logger,
}

impl JsonManager {
    /// Create an empty registry with default (quiet) options
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit options
    pub fn with_config(config: RegistryConfig) -> Self {
        let logger = Logger::new(config.verbose);
        logger.debug("JsonManager created");

        JsonManager {
            json_files: Vec::new(),
            logger,
        }
    }

    /// Register a JSON file path.
    ///
    /// Always succeeds: the path is not checked for existence, readability
    /// or JSON content, and duplicates are kept.
    pub fn add_json_file(&mut self, path: &str) -> bool {
        self.json_files.push(path.to_string());
        self.logger.info(&format!("Added JSON file: {}", path));
        true
    }

    /// Snapshot of all registered paths, in registration order
    pub fn get_json_files(&self) -> Vec<String> {
        self.json_files.clone()
    }

    /// Number of registered paths
    pub fn len(&self) -> usize {
        self.json_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.json_files.is_empty()
    }

    /// Report on the managed set.
    ///
    /// Relationship inference between the registered files has never been
    /// designed; this reports the count and nothing else.
    pub fn analyze_relationships(&self) {
        self.logger.info(&format!(
            "Analyzing relationships between {} JSON files...",
            self.json_files.len()
        ));
    }
}

impl Default for JsonManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JsonManager {
    fn drop(&mut self) {
        self.logger.debug("JsonManager dropped");
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_empty() {
        let manager = JsonManager::new();
        assert_eq!(manager.get_json_files().len(), 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_add_json_file() {
        let mut manager = JsonManager::new();

        let result = manager.add_json_file("test1.json");
        assert!(result);

        let files = manager.get_json_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], "test1.json");

        manager.add_json_file("test2.json");
        let files = manager.get_json_files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1], "test2.json");
    }

    #[test]
    fn test_add_preserves_call_order() {
        let mut manager = JsonManager::new();
        let paths = ["c.json", "a.json", "b.json", "a.json"];

        for path in &paths {
            assert!(manager.add_json_file(path));
        }

        let files = manager.get_json_files();
        assert_eq!(files.len(), paths.len());
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(files[i], *path);
        }
    }

    #[test]
    fn test_add_accepts_any_string() {
        let mut manager = JsonManager::new();

        // Empty, nonexistent and non-JSON paths all register fine
        assert!(manager.add_json_file(""));
        assert!(manager.add_json_file("/no/such/file.json"));
        assert!(manager.add_json_file("notes.txt"));

        assert_eq!(manager.len(), 3);
        assert_eq!(manager.get_json_files()[0], "");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut manager = JsonManager::new();
        manager.add_json_file("same.json");
        manager.add_json_file("same.json");

        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut manager = JsonManager::new();
        manager.add_json_file("test1.json");

        let mut files = manager.get_json_files();
        files.push("injected.json".to_string());

        // Mutating the snapshot must not touch the registry
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_analyze_relationships() {
        let mut manager = JsonManager::new();
        manager.add_json_file("test1.json");
        manager.add_json_file("test2.json");

        // Count report only; must not panic for any registry state
        manager.analyze_relationships();

        let empty = JsonManager::new();
        empty.analyze_relationships();
    }

    #[test]
    fn test_verbose_config() {
        let mut manager = JsonManager::with_config(RegistryConfig { verbose: true });
        assert!(manager.add_json_file("test1.json"));
        manager.analyze_relationships();
    }
}
