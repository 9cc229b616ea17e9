use clap::Parser;
use pr_relay::{config, github, pr, server};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// PR Relay — HTTP service that takes GitHub Pull Request URLs and relays
/// file listings and description updates to the GitHub REST API.
#[derive(Parser, Debug)]
#[command(name = "pr-relay", version, about)]
struct Cli {
    /// Port to listen on (overrides .pr-relay.toml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to a config file (defaults to .pr-relay.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    let token = config.github_token().ok_or(pr::PrError::MissingToken)?;
    let github = github::GitHubClient::new(token, config.api_url());

    let app = server::router(server::AppState { github });

    let port = cli.port.unwrap_or_else(|| config.port());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, api_url = %config.api_url(), "pr-relay listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
