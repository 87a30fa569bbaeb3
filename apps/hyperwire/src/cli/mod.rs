//! # Hyperwire CLI Module
//!
//! This module implements the CLI interface for Hyperwire.
//!
//! ## Available Commands
//!
//! - `status` - Summarize the store file
//! - `triplet` - Present one atom on a triplet port and print the others
//! - `split` - Present one atom on a splitter port and print the others

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use hyperwire_core::HyperwireError;
use hyperwire_core::primitives::{DEFAULT_HIGH_TYPE, DEFAULT_LOW_TYPE};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Hyperwire - direction-inferring queries over a hypergraph store
///
/// Every operator runs from whichever port you feed it.
#[derive(Parser, Debug)]
#[command(name = "hyperwire")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the store file (TOML list of atoms)
    #[arg(short = 'S', long, global = true, default_value = "hyperwire.toml")]
    pub store: PathBuf,

    /// Path to an optional configuration file
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Ports of a triplet decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TripletPort {
    Relation,
    Predicate,
    Arg1,
    Arg2,
}

/// Ports of a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SplitPort {
    Container,
    A,
    B,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show store status
    Status,

    /// Decompose High(predicate, Low(arg1, arg2)) links from any port
    Triplet {
        /// Port receiving the atom
        #[arg(short, long, value_enum)]
        port: TripletPort,

        /// Atom to present: Type:name, or a JSON atom
        #[arg(short, long)]
        atom: String,

        /// Wrapper link type
        #[arg(long, default_value = DEFAULT_HIGH_TYPE)]
        high: String,

        /// Argument list type
        #[arg(long, default_value = DEFAULT_LOW_TYPE)]
        low: String,
    },

    /// Relate containers of one type to two of their components
    Split {
        /// Container link type
        #[arg(short = 't', long, default_value = DEFAULT_LOW_TYPE)]
        container_type: String,

        /// Position of component A
        #[arg(long, default_value = "0")]
        position_a: usize,

        /// Position of component B
        #[arg(long, default_value = "1")]
        position_b: usize,

        /// Port receiving the atom
        #[arg(short, long, value_enum)]
        port: SplitPort,

        /// Atom to present: Type:name, or a JSON atom
        #[arg(short, long)]
        atom: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &AppConfig) -> Result<(), HyperwireError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&cli.store, json_mode),
        Some(Commands::Triplet {
            port,
            atom,
            high,
            low,
        }) => cmd_triplet(&cli.store, config, json_mode, port, &atom, &high, &low),
        Some(Commands::Split {
            container_type,
            position_a,
            position_b,
            port,
            atom,
        }) => {
            let shape = hyperwire_core::SplitterShape::new(container_type, position_a, position_b);
            cmd_split(&cli.store, config, json_mode, &shape, port, &atom)
        }
    }
}
