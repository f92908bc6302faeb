use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;

use shelfmekko::app::router::{AppState, router};
use shelfmekko::config::{DEFAULT_YEAR, DatasetSpec};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8050")]
    addr: SocketAddr,

    /// Goodreads library export (CSV). `SHELFMEKKO_DATASET` wins when set.
    #[arg(long, default_value = "assets/goodreads_library_export.csv")]
    input: PathBuf,

    #[arg(long, default_value_t = DEFAULT_YEAR)]
    year: i32,

    /// Exclusive shelves to include (repeatable).
    #[arg(long = "shelf")]
    shelves: Vec<String>,

    /// Static web assets directory (serve if exists).
    #[arg(long, default_value = "web/dist")]
    web_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    shelfmekko::logging::init(shelfmekko::logging::APP_FILTER)?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting shelfmekko-app");

    let input = std::env::var("SHELFMEKKO_DATASET")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or(args.input);
    let spec = DatasetSpec::new(args.year, &args.shelves)?.with_env_overrides()?;

    let dataset = shelfmekko::dataset::load(&input, &spec).context("load dataset")?;
    if dataset.is_empty() {
        tracing::warn!(input = %input.display(), year = spec.year, "no books matched; the chart will stay empty");
    }

    let app = router(AppState::new(Arc::new(dataset)), Some(&args.web_dir));

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
