use anyhow::{bail, Result};
use std::env;
use std::path::Path;
use std::process;

use manyjson::{
    create_share_payload, encode_payload, FileStore, JsonManager, Logger, RegistryConfig,
    SchemaInfo, SchemaManager, ValidationService,
};

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    // --verbose anywhere enables instrumentation
    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");

    let Some(command) = args.first().cloned() else {
        print_usage();
        process::exit(1);
    };

    match command.as_str() {
        "analyze" => run_analyze(&args[1..], verbose),
        "schemas" => run_schemas(verbose),
        "validate" => run_validate(&args[1..], verbose),
        "share" => run_share(&args[1..], verbose),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("manyjson {} - JSON schema manager", manyjson::VERSION);
    eprintln!();
    eprintln!("Usage: manyjson [--verbose] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  analyze <file>...                 register files and report on the set");
    eprintln!("  schemas                           list schemas in the config directory");
    eprintln!("  validate <schema> <file>...       validate JSON files against a schema");
    eprintln!("  share <schema> <file>...          print a share token for a schema + files");
}

fn run_analyze(paths: &[String], verbose: bool) -> Result<()> {
    if paths.is_empty() {
        bail!("analyze: at least one file path is required");
    }

    let mut manager = JsonManager::with_config(RegistryConfig { verbose });
    for path in paths {
        manager.add_json_file(path);
    }

    println!("📂 Registered {} JSON files", manager.len());
    for (i, path) in manager.get_json_files().iter().enumerate() {
        println!("  {}. {}", i + 1, path);
    }

    manager.analyze_relationships();
    Ok(())
}

fn run_schemas(verbose: bool) -> Result<()> {
    let store = FileStore::new()?;
    println!("🔧 Config directory: {}", store.config_dir().display());

    let manager = SchemaManager::with_logger(store, Logger::new(verbose));
    let schemas = manager.load_schemas()?;

    if schemas.is_empty() {
        println!("No schemas found.");
        return Ok(());
    }

    println!("Found {} schemas:", schemas.len());
    for schema in &schemas {
        println!("  • {} ({})", schema.name, schema.path);
    }
    Ok(())
}

fn run_validate(args: &[String], verbose: bool) -> Result<()> {
    let [schema_path, files @ ..] = args else {
        bail!("validate: usage: manyjson validate <schema> <file>...");
    };
    if files.is_empty() {
        bail!("validate: at least one JSON file is required");
    }

    let logger = Logger::new(verbose);
    let schema = load_schema(Path::new(schema_path))?;
    logger.info(&format!(
        "Validating {} files against schema {}",
        files.len(),
        schema.name
    ));

    let validator = ValidationService::new();
    let mut failures = 0usize;

    println!("📐 Validating against {}", schema.name);
    for file in files {
        let raw = std::fs::read_to_string(file)?;
        let content = match validator.validate_json_string(&raw) {
            Ok(value) => value,
            Err(issue) => {
                println!("  ✗ {} - {}", file, issue.message);
                failures += 1;
                continue;
            }
        };

        logger.debug(&format!("Validating {}", file));
        let report = validator.validate_json_with_schema(&content, &schema.content);
        if report.is_valid {
            println!("  ✓ {}", file);
        } else {
            println!("  ✗ {} - {} errors", file, report.errors.len());
            for error in &report.errors {
                println!("      {}", error);
            }
            failures += 1;
        }
    }

    if failures > 0 {
        println!("❌ {} of {} files failed validation", failures, files.len());
        process::exit(1);
    }

    println!("✅ All {} files valid", files.len());
    Ok(())
}

fn run_share(args: &[String], verbose: bool) -> Result<()> {
    let [schema_path, files @ ..] = args else {
        bail!("share: usage: manyjson share <schema> <file>...");
    };

    let logger = Logger::new(verbose);
    let schema = load_schema(Path::new(schema_path))?;
    let validator = ValidationService::new();

    let mut entries = Vec::new();
    for file in files {
        logger.debug(&format!("Adding {} to share payload", file));
        let raw = std::fs::read_to_string(file)?;
        let content = validator
            .validate_json_string(&raw)
            .map_err(|issue| anyhow::anyhow!("{}: {}", file, issue.message))?;

        let report = validator.validate_json_with_schema(&content, &schema.content);
        entries.push(manyjson::JsonFileEntry {
            name: file_name_of(file),
            path: file.clone(),
            content,
            is_valid: report.is_valid,
            errors: report.errors,
        });
    }

    let payload = create_share_payload(&schema, &entries);
    let token = encode_payload(&payload)?;

    println!("🔗 Share token ({} files):", entries.len());
    println!("share={}", token);
    Ok(())
}

fn load_schema(path: &Path) -> Result<SchemaInfo> {
    let raw = std::fs::read_to_string(path)?;
    let content: serde_json::Value = serde_json::from_str(&raw)?;

    let validator = ValidationService::new();
    let compile = validator.validate_schema(&content);
    if !compile.is_valid {
        bail!(
            "{} is not a valid JSON Schema: {}",
            path.display(),
            compile
                .errors
                .first()
                .map(|e| e.message.as_str())
                .unwrap_or("unknown error")
        );
    }

    Ok(SchemaInfo {
        name: file_name_of(&path.display().to_string()),
        path: path.display().to_string(),
        content,
        associated_files: Vec::new(),
    })
}

fn file_name_of(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}
