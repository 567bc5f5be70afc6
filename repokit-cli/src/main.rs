//! # repokit CLI
//!
//! Command-line interface for inspecting the reactive wrapper backends and
//! running values through the wrapper dispatcher.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repokit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "repokit.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective backends and how each wrapper type is classified
    Backends {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Map sample values through the dispatcher
    Map {
        /// Values to emit (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
        values: Vec<i64>,

        /// Factor each value is multiplied by
        #[arg(long, default_value_t = 2)]
        multiply: i64,

        /// Wrapper type carrying the values
        #[arg(long, value_enum, default_value_t = WrapperKind::Flux)]
        wrapper: WrapperKind,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Wrapper types the `map` command can build
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum WrapperKind {
    Flux,
    Mono,
    Publisher,
    Stream,
    Future,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Backends { json } => commands::show_backends(&cli.config, json),
        Commands::Map {
            values,
            multiply,
            wrapper,
            json,
        } => {
            let opts = commands::MapOptions {
                values,
                multiply,
                wrapper,
                json,
            };
            commands::map_values(&cli.config, opts).await
        }
    }
}
