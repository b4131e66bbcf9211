use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("No servers in specification.")]
    NoServers,
    #[error("No paths in specification.")]
    NoPaths,
    #[error("Not an OpenAPI object.")]
    NotOpenApi,
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("Failed to read specification '{path}': {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML specification '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse JSON specification '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid specification document: {source}")]
    InvalidDocument {
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported specification extension '{ext}', expected yaml/yml/json.")]
    UnsupportedExtension { ext: String },
    #[error("Specification path has no extension.")]
    MissingExtension,
    #[error("No server at index {index} in specification.")]
    ServerIndexOutOfRange { index: usize },
}
