use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;

use crate::args::{BombardArgs, Command, FromFileArgs, HitterArgs, ScrapeArgs};
use crate::config::{self, ConfigFile, SendSettings};
use crate::dispatch;
use crate::error::{AppError, AppResult, SpecError};
use crate::openapi::{extract_ops, read_openapi};
use crate::request::{SerializedRequest, ValueSource, generate_all};
use crate::transport::{HttpSender, RequestSender, StubSender, load_requests};

/// CLI entry point: parses arguments, initializes logging, builds the tokio
/// runtime, and runs the selected command.
///
/// # Errors
///
/// Returns an error when argument parsing, configuration loading, or the
/// command itself fails.
pub fn run() -> AppResult<()> {
    let args = match HitterArgs::try_parse() {
        Ok(args) => args,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(AppError::from(err)),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = config::load_config(args.config.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, config))
}

async fn run_async(args: HitterArgs, config: Option<ConfigFile>) -> AppResult<()> {
    match args.command {
        Command::Scrape(scrape) => run_scrape(&scrape),
        Command::Bombard(bombard) => run_bombard(&bombard, config.as_ref()).await,
        Command::FromFile(from_file) => run_from_file(&from_file, config.as_ref()).await,
    }
}

fn run_scrape(args: &ScrapeArgs) -> AppResult<()> {
    let document = read_openapi(Path::new(&args.openapi))?;
    let templates = extract_ops(&document)?;
    info!("Extracted {} request templates", templates.len());
    println!("{}", serde_json::to_string_pretty(&templates)?);
    Ok(())
}

async fn run_bombard(args: &BombardArgs, config: Option<&ConfigFile>) -> AppResult<()> {
    let settings = config::resolve_send_settings(&args.send, &args.values, config)?;
    let document = read_openapi(Path::new(&args.openapi))?;
    let templates = extract_ops(&document)?;
    let server = document.servers.get(args.server_index).ok_or_else(|| {
        AppError::spec(SpecError::ServerIndexOutOfRange {
            index: args.server_index,
        })
    })?;

    let values = ValueSource::new(settings.values.clone());
    let requests = generate_all(&templates, &server.url, &values)?;

    send_and_report(requests, &settings, args.send.report_failures).await
}

async fn run_from_file(args: &FromFileArgs, config: Option<&ConfigFile>) -> AppResult<()> {
    let settings = config::resolve_send_settings(&args.send, &[], config)?;
    let requests = load_requests(Path::new(&args.path))?;

    send_and_report(requests, &settings, args.send.report_failures).await
}

async fn send_and_report(
    requests: Vec<SerializedRequest>,
    settings: &SendSettings,
    report_failures: bool,
) -> AppResult<()> {
    let sender: Box<dyn RequestSender> = if settings.dry_run {
        Box::new(StubSender)
    } else {
        Box::new(HttpSender::new(settings.timeout)?)
    };

    if report_failures {
        let result = dispatch::dispatch(requests, sender.as_ref(), settings.options).await;
        info!(
            "{} succeeded, {} failed",
            result.succeeded.len(),
            result.failed.len()
        );
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let succeeded = dispatch::bombard(requests, sender.as_ref(), settings.options).await?;
    info!("{} succeeded", succeeded.len());
    println!("{}", serde_json::to_string_pretty(&succeeded)?);
    Ok(())
}
