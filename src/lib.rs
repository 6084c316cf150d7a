// ManyJSON - JSON Schema Manager Core Library
// Exposes all modules for use in the CLI and tests

pub mod files;
pub mod logging;
pub mod registry;
pub mod schema;
pub mod share;
pub mod validation;

// Re-export commonly used types
pub use files::{FileInfo, FileStore, ASSOCIATIONS_FILE};
pub use logging::{LogLevel, Logger};
pub use registry::{JsonManager, RegistryConfig};
pub use schema::{JsonFileEntry, SchemaInfo, SchemaManager};
pub use share::{
    build_share_link_token, create_share_payload, decode_token, encode_payload,
    extract_share_token, ShareFileItem, SharePayload, ShareSchema,
};
pub use validation::{
    FileKind, ValidationIssue, ValidationReport, ValidationService, MAX_CONTENT_SIZE,
    MAX_FILE_NAME_LEN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
