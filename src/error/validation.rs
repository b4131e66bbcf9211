use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value '{value}', expected 'name=value' format.")]
    InvalidKeyValueFormat { value: String },
    #[error("Invalid concurrency '{value}': {source}")]
    InvalidConcurrencyNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Concurrency must be at least 1.")]
    ConcurrencyZero,
    #[error("Duration value was empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration number '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration overflowed.")]
    DurationOverflow,
    #[error("Duration must be greater than zero.")]
    DurationZero,
}
