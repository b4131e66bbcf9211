use thiserror::Error;

use super::{
    BatchError, ConfigError, DispatchError, HttpError, RequestError, SpecError, ValidationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Specification error: {0}")]
    Spec(#[from] SpecError),
    #[error("Request error: {0}")]
    Request(#[from] RequestError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn spec<E>(error: E) -> Self
    where
        E: Into<SpecError>,
    {
        error.into().into()
    }

    pub fn request<E>(error: E) -> Self
    where
        E: Into<RequestError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn batch<E>(error: E) -> Self
    where
        E: Into<BatchError>,
    {
        error.into().into()
    }

    pub fn dispatch<E>(error: E) -> Self
    where
        E: Into<DispatchError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }
}
