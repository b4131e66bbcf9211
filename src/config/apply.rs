use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::args::{SendArgs, parse_duration_arg};
use crate::dispatch::{DEFAULT_CONCURRENCY, DispatchOptions};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Effective send settings after layering CLI flags over config defaults.
#[derive(Debug, Clone)]
pub struct SendSettings {
    pub options: DispatchOptions,
    pub timeout: Duration,
    pub dry_run: bool,
    pub values: BTreeMap<String, String>,
}

/// Merges CLI send options with config-file defaults: a flag given on the
/// command line wins, then the config file, then built-in defaults.
///
/// # Errors
///
/// Returns an error when a config value is out of range or fails to parse.
pub fn resolve_send_settings(
    args: &SendArgs,
    cli_values: &[(String, String)],
    config: Option<&ConfigFile>,
) -> AppResult<SendSettings> {
    let concurrency = match args.concurrency {
        Some(value) => value,
        None => match config.and_then(|config| config.concurrency) {
            Some(value) => NonZeroUsize::new(value)
                .ok_or_else(|| AppError::config(ConfigError::InvalidConcurrency { value }))?,
            None => DEFAULT_CONCURRENCY,
        },
    };

    let timeout = match args.timeout {
        Some(value) => value,
        None => match config.and_then(|config| config.timeout.as_deref()) {
            Some(value) => parse_duration_arg(value)?,
            None => DEFAULT_TIMEOUT,
        },
    };

    let dry_run = args.dry_run || config.and_then(|config| config.dry_run).unwrap_or(false);

    // Config values first, CLI values inserted after so they override.
    let mut values = config
        .and_then(|config| config.values.clone())
        .unwrap_or_default();
    for (key, value) in cli_values {
        values.insert(key.clone(), value.clone());
    }

    Ok(SendSettings {
        options: DispatchOptions { concurrency },
        timeout,
        dry_run,
        values,
    })
}
