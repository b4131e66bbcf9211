use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub dry_run: Option<bool>,
    pub values: Option<BTreeMap<String, String>>,
}
