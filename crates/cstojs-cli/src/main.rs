//! cstojs CLI
//!
//! Translates the files listed in a `cstojs_options.xml` descriptor, once or
//! continuously.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cstojs_core::DEFAULT_DESCRIPTOR;
use cstojs_runtime::PollInterval;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// cstojs - C# to JavaScript project translator
#[derive(Parser)]
#[command(name = "cstojs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Descriptor file (or directory containing one)
    #[arg(short, long, global = true, env = "CSTOJS_CONFIG", default_value = DEFAULT_DESCRIPTOR)]
    config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter descriptor and output folder
    Init {
        /// Output folder to declare in the descriptor
        folder: String,
    },

    /// Parse the descriptor and show the resolved files without translating
    Validate {
        /// Print the resolved project as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate every file listed in the descriptor
    Translate {
        /// Hand all files to the engine in a single call
        #[arg(long)]
        batch: bool,
    },

    /// Translate, then re-translate files as they change
    Watch {
        /// Milliseconds between checks (1000-10000)
        #[arg(short, long, env = "CSTOJS_WATCH_DELAY", default_value = "1000", value_parser = parse_delay)]
        delay: PollInterval,
    },
}

fn parse_delay(value: &str) -> std::result::Result<PollInterval, String> {
    let millis: u64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of milliseconds", value))?;
    PollInterval::from_millis(millis).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { folder } => {
            commands::init::run(&cli.config, &folder).await?;
        }
        Commands::Validate { json } => {
            commands::validate::run(&cli.config, json).await?;
        }
        Commands::Translate { batch } => {
            commands::translate::run(&cli.config, batch).await?;
        }
        Commands::Watch { delay } => {
            commands::watch::run(&cli.config, delay).await?;
        }
    }

    Ok(())
}
