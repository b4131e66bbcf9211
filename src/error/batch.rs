use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("Failed to read batch file '{path}': {source}")]
    ReadBatch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML batch file '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse JSON batch file '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported batch file extension '{ext}', expected yaml/yml/json.")]
    UnsupportedExtension { ext: String },
    #[error("Batch file path has no extension.")]
    MissingExtension,
}
