mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    highlight, init, render, serve, HighlightArgs, InitArgs, RenderArgs, ServeArgs,
};
use tracing_subscriber::EnvFilter;

/// Codepad - live-coding playground with an instant preview
#[derive(Parser, Debug)]
#[command(name = "codepad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default codepad.config.json
    Init(InitArgs),

    /// Start the preview server
    Serve(ServeArgs),

    /// Print the composed preview document
    Render(RenderArgs),

    /// Print a file with syntax highlighting
    Highlight(HighlightArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().expect("Cannot get current directory");

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Serve(args) => serve(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Highlight(args) => highlight(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
