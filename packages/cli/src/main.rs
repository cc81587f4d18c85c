mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    components, delete, export, import, init, list, render, validate, ComponentsArgs, DeleteArgs,
    ExportArgs, ImportArgs, InitArgs, ListArgs, RenderArgs, ValidateArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Hearth CLI - Page builder for the bakery site
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a site with config and starter pages
    Init(InitArgs),

    /// List bundled and locally saved pages
    List(ListArgs),

    /// Show the component palette
    Components(ComponentsArgs),

    /// Render a page to HTML
    Render(RenderArgs),

    /// Check pages against component schemas
    Validate(ValidateArgs),

    /// Export a page as JSON
    Export(ExportArgs),

    /// Import a page from exported JSON
    Import(ImportArgs),

    /// Delete the local copy of a page
    Delete(DeleteArgs),
}

fn init_tracing(cwd: &str) {
    let level = Config::load(cwd)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    init_tracing(&cwd);

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::List(args) => list(args, &cwd).await,
        Command::Components(args) => components(args, &cwd),
        Command::Render(args) => render(args, &cwd).await,
        Command::Validate(args) => validate(args, &cwd).await,
        Command::Export(args) => export(args, &cwd).await,
        Command::Import(args) => import(args, &cwd).await,
        Command::Delete(args) => delete(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
