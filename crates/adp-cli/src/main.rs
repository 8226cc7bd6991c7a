//! ADP CLI - command line access to Workforce Now worker records
//!
//! Authenticates with the client certificate and credential from the
//! configuration file, then fetches one worker or lists them all.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use adp_client::{ClientError, OAuthAuthenticator, WorkerService};
use adp_common::Worker;

mod config;
mod display;

/// Upper bound on workers buffered between the listing and the printer.
const MAX_CHANNEL_BUFFER: usize = 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (default: ~/.config/adp/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base64 encoded `client_id:client_secret`, overriding the configuration file
    #[arg(long, env = "ADP_CREDENTIAL", hide_env_values = true, global = true)]
    credential: Option<String>,

    /// Log progress at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print one worker
    Worker {
        /// Associate OID of the worker
        associate_oid: String,

        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all workers
    List {
        /// Workers requested per page when streaming (default from configuration)
        #[arg(long, requires = "stream")]
        page_size: Option<usize>,

        /// Print workers as they arrive instead of after the last page
        #[arg(long)]
        stream: bool,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
}

/// Initializes logging through `env_logger`.
///
/// `RUST_LOG` always wins; otherwise `--verbose` selects info level for the
/// ADP crates and the default is warnings only.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "adp=info,adp_client=info,adp_common=info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = config::resolve(args.config.as_deref(), args.credential)?;
    debug!("Using API base {}", config.base_url);

    let service = WorkerService::connect(&config)
        .await
        .context("Failed to connect to ADP")?;

    match args.command {
        Command::Worker {
            associate_oid,
            json,
        } => show_worker(&service, &associate_oid, json).await,
        Command::List {
            page_size,
            stream,
            json,
        } => {
            if stream {
                let page_size = page_size.unwrap_or(config.page_size);
                stream_workers(&service, page_size, json).await
            } else {
                list_workers(&service, json).await
            }
        }
    }
}

async fn show_worker(
    service: &WorkerService<OAuthAuthenticator>,
    associate_oid: &str,
    json: bool,
) -> Result<()> {
    let Some(worker) = service.find_worker(associate_oid).await? else {
        bail!("No worker returned for {associate_oid}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&worker)?);
    } else {
        display::print_worker_detail(&worker);
    }
    Ok(())
}

async fn list_workers(service: &WorkerService<OAuthAuthenticator>, json: bool) -> Result<()> {
    let workers = service.list_workers().await?;
    for worker in &workers {
        display::print_worker_line(worker, json)?;
    }
    info!("{} workers", workers.len());
    Ok(())
}

async fn stream_workers(
    service: &WorkerService<OAuthAuthenticator>,
    page_size: usize,
    json: bool,
) -> Result<()> {
    if page_size == 0 {
        bail!("--page-size must be greater than zero");
    }

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, stopping after the current worker");
            ctrl_c_cancel.cancel();
        }
    });

    let (tx, rx) = mpsc::channel(channel_capacity(page_size));
    let (outcome, printed) = tokio::join!(
        service.list_workers_into(tx, page_size, cancel),
        print_stream(rx, json),
    );
    ctrl_c.abort();

    let printed = printed?;
    match outcome {
        Ok(()) => {
            info!("{printed} workers");
            Ok(())
        }
        Err(ClientError::Cancelled) => bail!("Listing cancelled after {printed} workers"),
        Err(e) => Err(e).context(format!("Listing failed after {printed} workers")),
    }
}

/// Buffer one page, up to [`MAX_CHANNEL_BUFFER`] workers.
fn channel_capacity(page_size: usize) -> usize {
    page_size.clamp(1, MAX_CHANNEL_BUFFER)
}

async fn print_stream(mut rx: mpsc::Receiver<Worker>, json: bool) -> Result<usize> {
    let mut printed = 0;
    while let Some(worker) = rx.recv().await {
        display::print_worker_line(&worker, json)?;
        printed += 1;
    }
    Ok(printed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_page_size_requires_stream() {
        let err = Args::try_parse_from(["adp", "list", "--page-size", "5"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = Args::try_parse_from(["adp", "list", "--stream", "--page-size", "5"]).unwrap();
        assert!(matches!(
            args.command,
            Command::List {
                page_size: Some(5),
                stream: true,
                ..
            }
        ));
    }

    #[test]
    fn test_list_without_options() {
        let args = Args::try_parse_from(["adp", "list"]).unwrap();
        assert!(matches!(
            args.command,
            Command::List {
                page_size: None,
                stream: false,
                json: false
            }
        ));
    }

    #[test]
    fn test_channel_capacity_is_bounded() {
        assert_eq!(channel_capacity(200), 200);
        assert_eq!(channel_capacity(MAX_CHANNEL_BUFFER), MAX_CHANNEL_BUFFER);
        assert_eq!(channel_capacity(usize::MAX), MAX_CHANNEL_BUFFER);
        assert_eq!(channel_capacity(0), 1);
    }

    #[tokio::test]
    async fn test_huge_page_size_does_not_panic_channel() {
        let (tx, rx) = mpsc::channel::<Worker>(channel_capacity(usize::MAX));
        drop(tx);
        assert_eq!(print_stream(rx, false).await.unwrap(), 0);
    }
}
