//! Loader for movement config files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::CharacterConfig;

/// A config file that could not be read or parsed.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// RON options shared by every config parse. `IMPLICIT_SOME` lets optional
/// fields be written bare.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text. `file` only names the source in errors.
pub fn parse_ron<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parse JSON text. `file` only names the source in errors.
pub fn parse_json<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    serde_json::from_str(contents).map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Load a single struct, picking the format from the extension.
/// `.json` files go through serde_json, everything else through RON.
pub fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&file_name, &contents),
        _ => parse_ron(&file_name, &contents),
    }
}

pub fn load_character_config(path: &Path) -> Result<CharacterConfig, ContentLoadError> {
    load_single_file(path)
}
