use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, AppResult, SpecError};

use super::types::Document;

/// Loads an OpenAPI document from a YAML or JSON file.
///
/// # Errors
///
/// Returns an error when the file is missing, cannot be read or parsed, has
/// an unsupported extension, or does not look like an OpenAPI object.
pub fn read_openapi(path: &Path) -> AppResult<Document> {
    if !path.exists() {
        return Err(AppError::spec(SpecError::FileNotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::spec(SpecError::ReadDocument {
            path: path.to_path_buf(),
            source: err,
        })
    })?;

    let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::spec(SpecError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::spec(SpecError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::spec(SpecError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::spec(SpecError::MissingExtension)),
    };

    if !is_openapi(&value) {
        return Err(AppError::spec(SpecError::NotOpenApi));
    }

    debug!("Loaded OpenAPI document from {}", path.display());

    serde_json::from_value(value)
        .map_err(|err| AppError::spec(SpecError::InvalidDocument { source: err }))
}

/// Boolean predicate for "is an OpenAPI object": a JSON object carrying an
/// `openapi` version string.
fn is_openapi(value: &Value) -> bool {
    value
        .get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|version| !version.is_empty())
}
