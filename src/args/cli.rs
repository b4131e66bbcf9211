use std::num::NonZeroUsize;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use super::parsers::{parse_concurrency, parse_duration_arg, parse_key_value};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Hit an API with concrete HTTP requests generated from its OpenAPI specification."
)]
pub struct HitterArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable coloured log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to a configuration file (defaults to apihit.toml / apihit.json)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the request templates extracted from an OpenAPI specification
    Scrape(ScrapeArgs),
    /// Generate requests from an OpenAPI specification and send them
    Bombard(BombardArgs),
    /// Send pre-built requests loaded from a YAML/JSON file
    FromFile(FromFileArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ScrapeArgs {
    /// Path to the OpenAPI specification (YAML or JSON)
    pub openapi: String,
}

#[derive(Debug, Args, Clone)]
pub struct BombardArgs {
    /// Path to the OpenAPI specification (YAML or JSON)
    pub openapi: String,

    #[command(flatten)]
    pub send: SendArgs,

    /// Template values in 'name=value' format (repeatable)
    #[arg(long = "value", short = 'V', value_parser = parse_key_value)]
    pub values: Vec<(String, String)>,

    /// Index of the server URL to use when the specification lists several
    #[arg(long = "server-index", default_value_t = 0)]
    pub server_index: usize,
}

#[derive(Debug, Args, Clone)]
pub struct FromFileArgs {
    /// Path to a YAML/JSON file with pre-built requests
    pub path: String,

    #[command(flatten)]
    pub send: SendArgs,
}

/// Options shared by every sending command.
#[derive(Debug, Args, Clone)]
pub struct SendArgs {
    /// Maximum number of in-flight requests
    #[arg(long, short = 'n', value_parser = parse_concurrency)]
    pub concurrency: Option<NonZeroUsize>,

    /// Use the stub transport instead of sending real requests
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Print the full result, failures included, instead of failing the run
    #[arg(long = "report-failures")]
    pub report_failures: bool,
}
