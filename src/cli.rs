use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::AppConfig;
use commands::{list_events, serve};

#[derive(Parser)]
#[command(name = "quakecast")]
#[command(about = "QuakeCast magnitude prediction API with CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        #[command(flatten)]
        config: AppConfig,
    },
    /// Print the strongest recent events of the earthquake feed
    ///
    /// Shows the same three events the prediction form offers as shortcuts,
    /// together with the form values each one would fill in.
    Events {
        #[command(flatten)]
        config: AppConfig,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, config } => {
                serve(&config, &bind_address).await?;
            }
            Commands::Events { config } => {
                list_events(&config).await?;
            }
        }
        Ok(())
    }
}
