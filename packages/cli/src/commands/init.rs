use anyhow::Result;
use clap::Args;
use codepad_workspace::{Config, RenderMode, DEFAULT_CONFIG_NAME};
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Port the preview server listens on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Directory for the persisted preview snapshot
    #[arg(short, long)]
    pub store_dir: Option<String>,

    /// Link styles and script instead of inlining them
    #[arg(long)]
    pub by_reference: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing codepad...".bright_blue().bold());

    let config = Config {
        port: args.port,
        render_mode: if args.by_reference {
            RenderMode::ByReference
        } else {
            RenderMode::Inlined
        },
        store_dir: args.store_dir,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: codepad serve");
    println!("  2. Open http://{}/preview", config.addr());

    Ok(())
}
