//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Queries are split from printing: `triplet_query` and `split_query`
//! return a `QueryReport` which the `cmd_*` functions render as text or
//! JSON.

use super::{SplitPort, TripletPort};
use crate::config::AppConfig;
use crate::files::load_store;
use hyperwire_core::{
    Atom, AtomSpace, AtomType, HyperwireError, Network, NetworkConfig, SplitterPorts,
    SplitterShape, TripletPorts, WireId,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// QUERY REPORTS
// =============================================================================

/// The stream observed on one port after a query settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortStream {
    pub port: &'static str,
    /// `None` when nothing drives the port.
    pub atoms: Option<Vec<Atom>>,
}

/// Result of presenting one atom on one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub source: &'static str,
    pub input: Atom,
    pub ports: Vec<PortStream>,
}

impl QueryReport {
    fn collect(
        net: &Network<AtomSpace>,
        source: &'static str,
        input: Atom,
        ports: &[(&'static str, WireId)],
    ) -> Self {
        Self {
            source,
            input,
            ports: ports
                .iter()
                .filter(|(name, _)| *name != source)
                .map(|&(port, wire)| PortStream {
                    port,
                    atoms: net.stream(wire).map(<[Atom]>::to_vec),
                })
                .collect(),
        }
    }

    /// Atoms observed on `port`, if it was driven.
    #[must_use]
    pub fn port(&self, port: &str) -> Option<&[Atom]> {
        self.ports
            .iter()
            .find(|p| p.port == port)
            .and_then(|p| p.atoms.as_deref())
    }

    fn print(&self, json_mode: bool) {
        if json_mode {
            println!(
                "{}",
                serde_json::to_string_pretty(self).unwrap_or_default()
            );
            return;
        }

        println!("{} <- {}", self.source, self.input);
        for port in &self.ports {
            match &port.atoms {
                None => println!("  {}: (floating)", port.port),
                Some(atoms) if atoms.is_empty() => println!("  {}: (empty)", port.port),
                Some(atoms) => {
                    println!("  {}:", port.port);
                    for atom in atoms {
                        println!("    {}", atom);
                    }
                }
            }
        }
    }
}

// =============================================================================
// INPUT PARSING
// =============================================================================

/// Parse an atom given on the command line.
///
/// Accepts `Type:name` for nodes, or a JSON object for any atom.
pub fn parse_atom(text: &str) -> Result<Atom, HyperwireError> {
    let text = text.trim();
    if text.starts_with('{') {
        serde_json::from_str(text)
            .map_err(|e| HyperwireError::InvalidAtom(format!("{}: {}", text, e)))
    } else {
        text.parse()
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// Present `input` on a triplet port and report the other three.
pub fn triplet_query(
    space: AtomSpace,
    config: NetworkConfig,
    high: &str,
    low: &str,
    port: TripletPort,
    input: Atom,
) -> Result<QueryReport, HyperwireError> {
    let mut net = Network::with_config(space, config);
    let ports = TripletPorts::build(&mut net, AtomType::new(high), AtomType::new(low))?;
    let named = [
        ("relation", ports.relation),
        ("predicate", ports.predicate),
        ("arg1", ports.arg1),
        ("arg2", ports.arg2),
    ];
    let (source, wire) = match port {
        TripletPort::Relation => named[0],
        TripletPort::Predicate => named[1],
        TripletPort::Arg1 => named[2],
        TripletPort::Arg2 => named[3],
    };

    net.present(wire, vec![input.clone()])?;
    Ok(QueryReport::collect(&net, source, input, &named))
}

/// Present `input` on a splitter port and report the other two.
pub fn split_query(
    space: AtomSpace,
    config: NetworkConfig,
    shape: &SplitterShape,
    port: SplitPort,
    input: Atom,
) -> Result<QueryReport, HyperwireError> {
    let mut net = Network::with_config(space, config);
    let ports = SplitterPorts::build(&mut net, shape)?;
    let named = [
        ("container", ports.container),
        ("a", ports.component_a),
        ("b", ports.component_b),
    ];
    let (source, wire) = match port {
        SplitPort::Container => named[0],
        SplitPort::A => named[1],
        SplitPort::B => named[2],
    };

    net.present(wire, vec![input.clone()])?;
    Ok(QueryReport::collect(&net, source, input, &named))
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store status.
pub fn cmd_status(store_path: &Path, json_mode: bool) -> Result<(), HyperwireError> {
    let space = load_store(store_path)?;
    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for atom in space.atoms() {
        *by_type.entry(atom.atom_type().as_str()).or_default() += 1;
    }

    if json_mode {
        let output = serde_json::json!({
            "store": store_path.to_string_lossy(),
            "atom_count": space.len(),
            "link_count": space.link_count(),
            "node_count": space.len() - space.link_count(),
            "types": by_type,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Hyperwire Store Status");
    println!("======================");
    println!("Store: {:?}", store_path);
    println!();
    println!("Atoms: {}", space.len());
    println!("Links: {}", space.link_count());
    println!("Nodes: {}", space.len() - space.link_count());
    println!();
    println!("Types:");
    for (ty, count) in &by_type {
        println!("  {:<24} {}", ty, count);
    }

    Ok(())
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Run a triplet query against the store file.
#[allow(clippy::too_many_arguments)]
pub fn cmd_triplet(
    store_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    port: TripletPort,
    atom: &str,
    high: &str,
    low: &str,
) -> Result<(), HyperwireError> {
    let input = parse_atom(atom)?;
    let space = load_store(store_path)?;
    let report = triplet_query(space, config.network, high, low, port, input)?;
    report.print(json_mode);
    Ok(())
}

/// Run a splitter query against the store file.
pub fn cmd_split(
    store_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    shape: &SplitterShape,
    port: SplitPort,
    atom: &str,
) -> Result<(), HyperwireError> {
    let input = parse_atom(atom)?;
    let space = load_store(store_path)?;
    let report = split_query(space, config.network, shape, port, input)?;
    report.print(json_mode);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
