use tracing_subscriber::EnvFilter;

use skywatch_mcp::{Server, WeatherServer};

/// Stdout carries the protocol; all diagnostics go to stderr.
#[tokio::main]
async fn main() -> skywatch_mcp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    Server::new(WeatherServer::new()?).serve_stdio().await
}
