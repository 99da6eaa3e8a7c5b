use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::{parse_document, Syntax};

/// Read a JSON or YAML file (chosen by extension) into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let syntax = match canonical.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Syntax::Yaml,
        _ => Syntax::Json,
    };
    tracing::debug!(path = %canonical.display(), ?syntax, "reading input file");

    parse_document(&contents, syntax, &format!("'{}'", canonical.display()))
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
