use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Missing required parameter '{name}'.")]
    MissingRequiredParameter { name: String },
    #[error("Invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Server URL '{url}' has no host.")]
    ServerUrlMissingHost { url: String },
}
