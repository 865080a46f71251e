use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use codepad_workspace::{open_store, Config, PreviewComposer, RenderMode};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Inlined,
    ByReference,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Inlined => RenderMode::Inlined,
            ModeArg::ByReference => RenderMode::ByReference,
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Render mode (defaults to the config file's renderMode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd).context("Failed to load config")?;
    let mode = args.mode.map_or(config.render_mode, RenderMode::from);

    let runtime = tokio::runtime::Runtime::new()?;
    let document = runtime.block_on(async {
        let store = Arc::new(open_store(&config, cwd).await);
        PreviewComposer::new(store, mode).render().await
    });

    print!("{document}");
    Ok(())
}
