//! Optional defaults file: `apihit.toml` or `apihit.json` in the working
//! directory, or an explicit `--config` path. CLI flags always win.
mod apply;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use apply::{SendSettings, resolve_send_settings};
pub use loader::load_config;
pub use types::ConfigFile;
