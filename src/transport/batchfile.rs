use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult, BatchError};
use crate::request::SerializedRequest;

/// Loads a sequence of pre-built serialized requests from a YAML or JSON
/// file. A blank file counts as an empty batch.
///
/// # Errors
///
/// Returns an error when the file is missing, unreadable, has an
/// unsupported extension, or does not parse as a request sequence.
pub fn load_requests(path: &Path) -> AppResult<Vec<SerializedRequest>> {
    if !path.exists() {
        return Err(AppError::batch(BatchError::FileNotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::batch(BatchError::ReadBatch {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let requests: Vec<SerializedRequest> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::batch(BatchError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::batch(BatchError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        })?,
        Some(ext) => {
            return Err(AppError::batch(BatchError::UnsupportedExtension {
                ext: ext.to_owned(),
            }));
        }
        None => return Err(AppError::batch(BatchError::MissingExtension)),
    };

    debug!("Loaded {} requests from {}", requests.len(), path.display());
    Ok(requests)
}
