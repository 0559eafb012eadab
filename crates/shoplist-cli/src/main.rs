//! shoplist CLI
//!
//! Line-oriented interface to an in-memory shopping list. The list lives
//! for as long as the session does.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use shoplist_core::{Config, ItemStore};

mod commands;
mod logging;
mod output;
mod session;

use output::{Output, OutputFormat};
use session::Session;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "shoplist - an in-memory shopping list")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    let format = OutputFormat::from_flags(cli.json, cli.quiet);
    let mut session = Session::new(ItemStore::with_config(&config), Output::new(format));

    match cli.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script: {:?}", path))?;
            session.run(BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal() && format == OutputFormat::Human;
            session.run(stdin.lock(), interactive)
        }
    }
}
