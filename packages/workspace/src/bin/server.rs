use anyhow::Context;
use codepad_workspace::{serve, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cwd = std::env::current_dir()?;
    let mut config = Config::load(&cwd).context("Failed to load config")?;

    // Usage: codepad-server [PORT]
    if let Some(port) = std::env::args().nth(1) {
        config.port = port
            .parse()
            .with_context(|| format!("Invalid port number: {port}"))?;
    }

    serve(&config, &cwd).await.context("Preview server stopped")?;
    Ok(())
}
