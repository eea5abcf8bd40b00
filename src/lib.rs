pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod linkpost;
pub mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use auth::BrowserPrompt;
use client::PocketClient;
use config::Config;

#[derive(Parser)]
#[clap(
    name = "pockyll",
    version,
    about = "Generate Jekyll linkposts from Pocket bookmarks"
)]
pub struct Cli {
    /// Path to the YAML config file
    #[clap(long, global = true, default_value = config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a config file with default values
    Init,
    /// Authenticate the application against the Pocket OAuth API
    Auth,
    /// Create Jekyll linkposts from Pocket items
    Sync,
}

/// Shared CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Wrote default configuration to {}.", cli.config.display());
            Ok(())
        }
        Commands::Auth => {
            let mut config = Config::load(&cli.config)?;
            auth::run(&cli.config, &mut config, &PocketClient::new(), &BrowserPrompt)?;
            println!("Authentication complete.");
            Ok(())
        }
        Commands::Sync => {
            let mut config = Config::load(&cli.config)?;
            println!("Requesting new items from Pocket API...");
            let report = sync::run(&cli.config, &mut config, &PocketClient::new())?;
            if report.is_empty() {
                println!("No new bookmarks. Done.");
            } else {
                println!("Done.\nReport:");
                println!("{report:#?}");
            }
            Ok(())
        }
    }
}
