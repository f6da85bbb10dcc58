//! Command-line runner for slotsearch.
//!
//! # Usage
//!
//! ```bash
//! # Start over from the configured start inventory and search
//! slotsearch run --reset
//!
//! # Resume from the checkpoint directory
//! slotsearch run --config slotsearch.toml
//!
//! # Write a fresh checkpoint without searching
//! slotsearch reset
//!
//! # Print the table saved in the checkpoint
//! slotsearch show --heatmap
//!
//! # Replay every saved witness
//! slotsearch verify
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "slotsearch")]
#[command(about = "Minimal move counts between inventory shapes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search until every shape is resolved or the round limit is hit.
    Run {
        /// Configuration file (TOML, or YAML by extension).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Discard the checkpoint and start from the configured inventory.
        #[arg(long)]
        reset: bool,

        /// Only print the final table.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a fresh round-0 checkpoint.
    Reset {
        /// Configuration file (TOML, or YAML by extension).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep searching after the reset instead of quitting.
        #[arg(long)]
        run: bool,
    },

    /// Print the distance table stored in the checkpoint.
    Show {
        /// Configuration file (TOML, or YAML by extension).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Color cells by distance and mark unresolved shapes.
        #[arg(long)]
        heatmap: bool,
    },

    /// Replay every stored witness and report mismatches.
    Verify {
        /// Configuration file (TOML, or YAML by extension).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            reset,
            quiet,
        } => commands::run(config.as_deref(), reset, quiet),
        Commands::Reset { config, run } => commands::reset(config.as_deref(), run),
        Commands::Show { config, heatmap } => commands::show(config.as_deref(), heatmap),
        Commands::Verify { config } => commands::verify(config.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}
