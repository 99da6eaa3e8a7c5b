pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Document syntax of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    /// Piped bodies carry no extension; anything that opens like a JSON
    /// object or array is JSON, the rest is read as YAML.
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('{') | Some('[') => Syntax::Json,
            _ => Syntax::Yaml,
        }
    }
}

/// Parse a request body, naming `origin` in the error message.
pub fn parse_document<T: DeserializeOwned>(
    text: &str,
    syntax: Syntax,
    origin: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let parsed = match syntax {
        Syntax::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Syntax::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| format!("Failed to parse {origin}: {e}").into())
}
