use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use search_server::{Dataset, ServerConfig};

/// Reference user search service.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Token clients must send in the `AccessToken` header.
    #[arg(long, env = "SEARCH_ACCESS_TOKEN")]
    token: String,

    /// JSON dataset, re-read on every request. The default path is relative
    /// to the working directory, so it only resolves from the workspace root.
    #[arg(long, env = "SEARCH_DATASET", default_value = "search-server/fixtures/dataset.json")]
    dataset: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,search_server=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, dataset = %args.dataset.display(), "listening");

    let config = ServerConfig {
        access_token: args.token,
        dataset: Dataset::File(args.dataset),
    };
    search_server::run(listener, config).await
}
