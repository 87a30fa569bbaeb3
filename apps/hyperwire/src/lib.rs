//! # hyperwire
//!
//! Command-line front end for the Hyperwire network.
//!
//! - `files`: store files and guarded file reads
//! - `config`: optional TOML configuration
//! - `cli`: argument parsing and command implementations

pub mod cli;
pub mod config;
pub mod files;
