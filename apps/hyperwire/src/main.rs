//! # Hyperwire
//!
//! The query tool for the Hyperwire dataflow network.
//!
//! Loads a store file into memory, builds a splitter or triplet network
//! over it and presents one atom on the chosen port.
//!
//! ## Usage
//!
//! ```bash
//! # Store summary
//! hyperwire --store facts.toml status
//!
//! # Who does alice like?
//! hyperwire --store facts.toml triplet --port arg1 --atom ConceptNode:alice
//!
//! # Everything paired with bob in second position
//! hyperwire --store facts.toml split --port b --atom ConceptNode:bob
//! ```

use clap::Parser;
use hyperwire::cli;
use hyperwire::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied by `--verbose` when `RUST_LOG` is unset.
const VERBOSE_LOG_FILTER: &str = "hyperwire=debug,hyperwire_core=debug";

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());

    let fallback = match (&config, cli.verbose) {
        (_, true) => VERBOSE_LOG_FILTER,
        (Ok(config), false) => config.log_filter(),
        (Err(_), false) => DEFAULT_LOG_FILTER,
    };
    init_tracing(fallback);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr. HYPERWIRE_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(fallback: &str) {
    let log_format = std::env::var("HYPERWIRE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the Hyperwire startup banner.
fn print_banner() {
    println!(
        r#"
  ┬ ┬┬ ┬┌─┐┌─┐┬─┐┬ ┬┬┬─┐┌─┐
  ├─┤└┬┘├─┘├┤ ├┬┘││││├┬┘├┤
  ┴ ┴ ┴ ┴  └─┘┴└─└┴┘┴┴└─└─┘

  Direction-inferring query network v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
