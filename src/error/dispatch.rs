use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed: {}", .failures.join(", "))]
    DispatchFailed { failures: Vec<String> },
}
