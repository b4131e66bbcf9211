mod app;
mod batch;
mod config;
mod dispatch;
mod http;
mod request;
mod spec;
mod validation;

pub use app::{AppError, AppResult};
pub use batch::BatchError;
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use http::HttpError;
pub use request::RequestError;
pub use spec::SpecError;
pub use validation::ValidationError;
