use anyhow::{Context, Result};
use clap::Args;
use codepad_workspace::Config;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Persist submitted fragments in this directory
    #[arg(short, long)]
    pub store_dir: Option<String>,
}

/// Config file values with command-line overrides applied
pub fn resolve_config(args: ServeArgs, cwd: &Path) -> Result<Config> {
    let mut config = Config::load(cwd).context("Failed to load config")?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if args.store_dir.is_some() {
        config.store_dir = args.store_dir;
    }

    Ok(config)
}

pub fn serve(args: ServeArgs, cwd: &Path) -> Result<()> {
    let config = resolve_config(args, cwd)?;

    println!(
        "{}",
        "🚀 Starting codepad preview server...".bright_blue().bold()
    );
    println!("   Preview: http://{}/preview", config.addr().cyan());
    if let Some(dir) = config.store_path(cwd) {
        println!("   Store:   {}", dir.display());
    }
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(codepad_workspace::serve(&config, cwd))
        .context("Preview server stopped")
}
