use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use log::info;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use adp_client::WorkerService;
use adp_common::{Config, Worker};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL for the API
    #[arg(long, default_value = "https://api.adp.com")]
    base_url: String,

    /// Token endpoint
    #[arg(
        long,
        default_value = "https://accounts.adp.com/auth/oauth/v2/token?grant_type=client_credentials"
    )]
    token_url: String,

    /// PEM client certificate
    #[arg(long, default_value = "certs/client.crt")]
    cert: String,

    /// PEM private key
    #[arg(long, default_value = "certs/client.key")]
    key: String,

    /// Environment variable holding the base64 `client_id:client_secret`
    #[arg(long, default_value = "ADP_CREDENTIAL")]
    credential_env: String,

    /// Workers requested per page
    #[arg(long, default_value_t = 50)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    info!("Worker Listing Demo");
    info!("===================");
    info!("Base URL: {}", args.base_url);
    info!("Page size: {}", args.page_size);
    info!("");

    let config = Config::new(&args.cert, &args.key)
        .with_base_url(&args.base_url)
        .with_token_url(&args.token_url)
        .with_credential_env(&args.credential_env)
        .with_page_size(args.page_size);

    let service = WorkerService::connect(&config).await?;

    // Pull-based: pages are fetched as the stream is drained
    info!("Lazy stream, first five workers:");
    let mut stream = service.stream_workers(args.page_size).take(5);
    while let Some(worker) = stream.next().await {
        let worker = worker?;
        info!(
            "  {} {} ({})",
            worker.associate_oid(),
            worker.full_name(),
            worker.job_title().unwrap_or("no primary assignment")
        );
    }

    // Push-based: a background task fills the channel
    info!("");
    info!("Channel listing, active workers:");
    let (tx, mut rx) = mpsc::channel::<Worker>(args.page_size.min(1024));
    let consumer = tokio::spawn(async move {
        let mut active = 0usize;
        while let Some(worker) = rx.recv().await {
            if worker.is_active() {
                active += 1;
            }
        }
        active
    });

    service
        .list_workers_into(tx, args.page_size, CancellationToken::new())
        .await?;
    let active = consumer.await?;

    info!("  {active} active workers");
    Ok(())
}
