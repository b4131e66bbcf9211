use std::num::NonZeroUsize;
use std::time::Duration;

use tempfile::tempdir;

use super::loader::load_config_file;
use super::{ConfigFile, resolve_send_settings};
use crate::args::SendArgs;
use crate::error::{AppError, ConfigError};

fn send_args() -> SendArgs {
    SendArgs {
        concurrency: None,
        dry_run: false,
        timeout: None,
        report_failures: false,
    }
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apihit.toml");
    let content = r#"
concurrency = 4
timeout = "2s"
dry_run = true

[values]
petId = "42"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.concurrency != Some(4) {
        return Err(format!("Unexpected concurrency: {:?}", config.concurrency));
    }
    if config.timeout.as_deref() != Some("2s") {
        return Err(format!("Unexpected timeout: {:?}", config.timeout));
    }
    if config.dry_run != Some(true) {
        return Err(format!("Unexpected dry_run: {:?}", config.dry_run));
    }
    let values = config.values.ok_or("Expected values")?;
    if values.get("petId").map(String::as_str) != Some("42") {
        return Err(format!("Unexpected values: {:?}", values));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apihit.json");
    let content = r#"{ "concurrency": 8, "timeout": "500ms" }"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| format!("load failed: {}", err))?;
    if config.concurrency != Some(8) {
        return Err(format!("Unexpected concurrency: {:?}", config.concurrency));
    }
    Ok(())
}

#[test]
fn unsupported_config_extension_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apihit.yaml");
    std::fs::write(&path, "concurrency: 4").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected UnsupportedExtension".to_owned()),
    }
}

#[test]
fn defaults_apply_without_config() -> Result<(), String> {
    let settings = resolve_send_settings(&send_args(), &[], None)
        .map_err(|err| format!("resolve failed: {}", err))?;

    if settings.options.concurrency.get() != 10 {
        return Err(format!(
            "Unexpected default concurrency: {}",
            settings.options.concurrency
        ));
    }
    if settings.timeout != Duration::from_secs(10) {
        return Err(format!("Unexpected default timeout: {:?}", settings.timeout));
    }
    if settings.dry_run {
        return Err("Expected dry_run off by default".to_owned());
    }
    if !settings.values.is_empty() {
        return Err(format!("Unexpected values: {:?}", settings.values));
    }
    Ok(())
}

#[test]
fn cli_flags_win_over_config_values() -> Result<(), String> {
    let config = ConfigFile {
        concurrency: Some(2),
        timeout: Some("1m".to_owned()),
        dry_run: Some(false),
        values: Some(
            [("petId".to_owned(), "1".to_owned())]
                .into_iter()
                .collect(),
        ),
    };
    let mut args = send_args();
    args.concurrency = NonZeroUsize::new(6);
    args.timeout = Some(Duration::from_secs(3));
    args.dry_run = true;

    let cli_values = vec![("petId".to_owned(), "42".to_owned())];
    let settings = resolve_send_settings(&args, &cli_values, Some(&config))
        .map_err(|err| format!("resolve failed: {}", err))?;

    if settings.options.concurrency.get() != 6 {
        return Err(format!(
            "CLI concurrency lost: {}",
            settings.options.concurrency
        ));
    }
    if settings.timeout != Duration::from_secs(3) {
        return Err(format!("CLI timeout lost: {:?}", settings.timeout));
    }
    if !settings.dry_run {
        return Err("CLI dry-run lost".to_owned());
    }
    if settings.values.get("petId").map(String::as_str) != Some("42") {
        return Err(format!("CLI value lost: {:?}", settings.values));
    }
    Ok(())
}

#[test]
fn config_timeout_string_is_parsed() -> Result<(), String> {
    let config = ConfigFile {
        concurrency: None,
        timeout: Some("250ms".to_owned()),
        dry_run: None,
        values: None,
    };
    let settings = resolve_send_settings(&send_args(), &[], Some(&config))
        .map_err(|err| format!("resolve failed: {}", err))?;

    if settings.timeout != Duration::from_millis(250) {
        return Err(format!("Unexpected timeout: {:?}", settings.timeout));
    }
    Ok(())
}

#[test]
fn zero_concurrency_in_config_fails() -> Result<(), String> {
    let config = ConfigFile {
        concurrency: Some(0),
        timeout: None,
        dry_run: None,
        values: None,
    };
    match resolve_send_settings(&send_args(), &[], Some(&config)) {
        Err(AppError::Config(ConfigError::InvalidConcurrency { value: 0 })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected InvalidConcurrency".to_owned()),
    }
}
