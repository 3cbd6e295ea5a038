use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use popcast_core::config::PopcastConfig;
use popcast_core::models::{CountryHistory, TrainingRequest};
use popcast_observability::tracing_setup::events;
use popcast_observability::init_tracing;
use popcast_retrieval::{open_retriever, ContextDocument};
use popcast_server::{router, AppState};
use popcast_service::ForecastService;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "popcast",
    version,
    about = "Population forecasting with context-aware adjustments"
)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true, env = "POPCAST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Address to bind (host:port). Overrides `server.bind`.
        #[arg(long, env = "POPCAST_BIND")]
        bind: Option<String>,
    },
    /// Train from a JSON array of country histories and persist the model.
    Train {
        #[arg(long)]
        histories: PathBuf,
    },
    /// Embed a JSON array of context documents into the index.
    Ingest {
        #[arg(long)]
        documents: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<PopcastConfig> {
    match path {
        Some(p) => PopcastConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(PopcastConfig::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.observability);

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Train { histories } => {
            let histories: Vec<CountryHistory> = read_json(&histories)?;
            let response = tokio::task::spawn_blocking(move || -> Result<_> {
                let service = ForecastService::from_config(config)
                    .context("failed to initialise forecast service")?;
                service
                    .train(&TrainingRequest {
                        countries_data: histories,
                        rows: Vec::new(),
                    })
                    .context("training failed")
            })
            .await
            .context("training task failed")??;
            println!("{}", serde_json::to_string_pretty(&response.metrics)?);
            info!("{}", response.message);
            Ok(())
        }
        Command::Ingest { documents } => {
            let documents: Vec<ContextDocument> = read_json(&documents)?;
            let report = tokio::task::spawn_blocking(move || -> Result<_> {
                let retriever = open_retriever(&config.retrieval, &config.embedding)
                    .context("failed to open context index")?;
                retriever.ingest_batch(&documents).context("ingestion failed")
            })
            .await
            .context("ingestion task failed")??;
            events::documents_ingested(report.inserted, report.replaced);
            Ok(())
        }
    }
}

async fn serve(config: PopcastConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;

    let service = tokio::task::spawn_blocking(move || ForecastService::from_config(config))
        .await
        .context("startup task failed")?
        .context("failed to initialise forecast service")?;
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "popcast listening");
    axum::serve(listener, app).await.context("server shutdown")?;
    Ok(())
}
