//! Integration tests for store files, configuration and CLI queries.
//!
//! Files are written to temporary directories and read back through the
//! same paths the binary uses.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::Parser;
use hyperwire::cli::{Cli, Commands, SplitPort, TripletPort, split_query, triplet_query};
use hyperwire::config::AppConfig;
use hyperwire::files::load_store;
use hyperwire_core::primitives::{DEFAULT_HIGH_TYPE, DEFAULT_LOW_TYPE};
use hyperwire_core::{Atom, HyperwireError, NetworkConfig, SplitterShape};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

const FACTS: &str = r#"
[[atoms]]
type = "EvaluationLink"
outgoing = [
    { type = "PredicateNode", name = "likes" },
    { type = "ListLink", outgoing = [{ type = "ConceptNode", name = "alice" }, { type = "ConceptNode", name = "bob" }] },
]

[[atoms]]
type = "EvaluationLink"
outgoing = [
    { type = "PredicateNode", name = "knows" },
    { type = "ListLink", outgoing = [{ type = "ConceptNode", name = "carol" }, { type = "ConceptNode", name = "alice" }] },
]
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn concept(name: &str) -> Atom {
    Atom::node("ConceptNode", name)
}

// =============================================================================
// STORE FILES
// =============================================================================

#[test]
fn test_store_file_loads() {
    let file = write_temp(FACTS);
    let space = load_store(file.path()).unwrap();
    // 2 predicates, 3 concepts, 2 lists, 2 evaluations.
    assert_eq!(space.len(), 9);
    assert_eq!(space.link_count(), 4);
}

#[test]
fn test_directory_is_not_a_store_file() {
    let dir = TempDir::new().unwrap();
    let result = load_store(dir.path());
    assert!(matches!(result, Err(HyperwireError::IoError(_))));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_config_file_loads() {
    let file = write_temp("[network]\nmax_dispatch_steps = 2048\n");
    let config = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.network.max_dispatch_steps, 2048);
}

#[test]
fn test_missing_config_path_uses_defaults() {
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config.network, NetworkConfig::default());
}

#[test]
fn test_tiny_dispatch_bound_stops_queries() {
    let space = load_store(write_temp(FACTS).path()).unwrap();
    let config = NetworkConfig {
        max_dispatch_steps: 3,
    };
    let result = triplet_query(
        space,
        config,
        DEFAULT_HIGH_TYPE,
        DEFAULT_LOW_TYPE,
        TripletPort::Arg1,
        concept("alice"),
    );
    assert!(matches!(
        result,
        Err(HyperwireError::DispatchLimit { limit: 3 })
    ));
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn test_triplet_from_first_argument() {
    let space = load_store(write_temp(FACTS).path()).unwrap();
    let report = triplet_query(
        space,
        NetworkConfig::default(),
        DEFAULT_HIGH_TYPE,
        DEFAULT_LOW_TYPE,
        TripletPort::Arg1,
        concept("alice"),
    )
    .unwrap();

    assert_eq!(report.source, "arg1");
    assert_eq!(
        report.port("predicate"),
        Some(&[Atom::node("PredicateNode", "likes")][..])
    );
    assert_eq!(report.port("arg2"), Some(&[concept("bob")][..]));
}

#[test]
fn test_triplet_from_predicate() {
    let space = load_store(write_temp(FACTS).path()).unwrap();
    let report = triplet_query(
        space,
        NetworkConfig::default(),
        DEFAULT_HIGH_TYPE,
        DEFAULT_LOW_TYPE,
        TripletPort::Predicate,
        Atom::node("PredicateNode", "knows"),
    )
    .unwrap();

    assert_eq!(report.port("arg1"), Some(&[concept("carol")][..]));
    assert_eq!(report.port("arg2"), Some(&[concept("alice")][..]));
}

#[test]
fn test_split_from_second_component() {
    let space = load_store(write_temp(FACTS).path()).unwrap();
    let report = split_query(
        space,
        NetworkConfig::default(),
        &SplitterShape::new("ListLink", 0, 1),
        SplitPort::B,
        concept("alice"),
    )
    .unwrap();

    assert_eq!(report.port("a"), Some(&[concept("carol")][..]));
    let containers = report.port("container").unwrap();
    assert_eq!(containers.len(), 1);
}

#[test]
fn test_report_serializes_to_json() {
    let space = load_store(write_temp(FACTS).path()).unwrap();
    let report = split_query(
        space,
        NetworkConfig::default(),
        &SplitterShape::new("ListLink", 0, 1),
        SplitPort::A,
        concept("alice"),
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["source"], "a");
    assert_eq!(json["input"]["name"], "alice");
    assert_eq!(json["ports"].as_array().unwrap().len(), 2);
}

// =============================================================================
// ARGUMENT PARSING
// =============================================================================

#[test]
fn test_cli_parses_triplet_command() {
    let cli = Cli::try_parse_from([
        "hyperwire",
        "--store",
        "facts.toml",
        "--json-mode",
        "triplet",
        "--port",
        "arg2",
        "--atom",
        "ConceptNode:bob",
    ])
    .unwrap();

    assert!(cli.json_mode);
    match cli.command {
        Some(Commands::Triplet {
            port, atom, high, ..
        }) => {
            assert_eq!(port, TripletPort::Arg2);
            assert_eq!(atom, "ConceptNode:bob");
            assert_eq!(high, DEFAULT_HIGH_TYPE);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_cli_rejects_unknown_port() {
    let result = Cli::try_parse_from([
        "hyperwire",
        "split",
        "--port",
        "c",
        "--atom",
        "ConceptNode:bob",
    ]);
    assert!(result.is_err());
}
