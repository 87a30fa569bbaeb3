//! # Positional Operators
//!
//! Nth projection and arity guard, both thin wrappers over the symmetric
//! stock devices.

use crate::store::AtomStore;
use crate::wire::{Filter, Network, Pipeline, Transform};
use crate::{Atom, HyperwireError, WireId};

/// Element at `position` of `atom`'s outgoing set.
///
/// Nodes and links with `outgoing_len() <= position` yield `None`.
#[must_use]
pub fn nth_of(atom: &Atom, position: usize) -> Option<Atom> {
    atom.outgoing_at(position).cloned()
}

/// Check if `atom` has at least `min_len` outgoing elements. Nodes count as 0.
#[must_use]
pub fn has_arity(atom: &Atom, min_len: usize) -> bool {
    atom.outgoing_len() >= min_len
}

/// Build an Nth operator between `outer` (containers) and `inner` (components).
pub fn nth<S: AtomStore>(
    net: &mut Network<S>,
    position: usize,
    outer: WireId,
    inner: WireId,
) -> Pipeline {
    let device = net.add_device(Transform::new("nth", outer, inner, move |atom| {
        nth_of(atom, position)
    }));
    let mut pipeline = Pipeline::new();
    pipeline.attach(outer, device);
    pipeline.attach(inner, device);
    pipeline
}

/// Build an arity filter between `left` and `right`.
pub fn arity_filter<S: AtomStore>(
    net: &mut Network<S>,
    min_len: usize,
    left: WireId,
    right: WireId,
) -> Pipeline {
    let device = net.add_device(Filter::new("arity", left, right, move |atom| {
        has_arity(atom, min_len)
    }));
    let mut pipeline = Pipeline::new();
    pipeline.attach(left, device);
    pipeline.attach(right, device);
    pipeline
}

/// Ports of a standalone Nth operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthPorts {
    /// Side carrying outgoing-set-bearing elements.
    pub outer: WireId,
    /// Side carrying the projected elements.
    pub inner: WireId,
}

impl NthPorts {
    /// Create two wires and install an Nth operator between them.
    pub fn build<S: AtomStore>(
        net: &mut Network<S>,
        position: usize,
    ) -> Result<Self, HyperwireError> {
        let outer = net.create_wire();
        let inner = net.create_wire();
        let pipeline = nth(net, position, outer, inner);
        net.install(&pipeline)?;
        Ok(Self { outer, inner })
    }
}

/// Ports of a standalone arity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityPorts {
    pub left: WireId,
    pub right: WireId,
}

impl ArityPorts {
    /// Create two wires and install an arity filter between them.
    pub fn build<S: AtomStore>(
        net: &mut Network<S>,
        min_len: usize,
    ) -> Result<Self, HyperwireError> {
        let left = net.create_wire();
        let right = net.create_wire();
        let pipeline = arity_filter(net, min_len, left, right);
        net.install(&pipeline)?;
        Ok(Self { left, right })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AtomSpace;

    fn concept(name: &str) -> Atom {
        Atom::node("ConceptNode", name)
    }

    fn list(names: &[&str]) -> Atom {
        Atom::link("ListLink", names.iter().map(|n| concept(n)).collect())
    }

    #[test]
    fn nth_projects_and_skips_short_elements() {
        let mut net = Network::new(AtomSpace::new());
        let ports = NthPorts::build(&mut net, 1).expect("build");

        net.present(
            ports.outer,
            vec![list(&["A", "B"]), list(&["C"]), concept("D"), list(&["E", "F", "G"])],
        )
        .expect("present");

        assert_eq!(
            net.stream(ports.inner),
            Some(&[concept("B"), concept("F")][..])
        );
    }

    #[test]
    fn nth_preserves_order() {
        let mut net = Network::new(AtomSpace::new());
        let ports = NthPorts::build(&mut net, 0).expect("build");
        net.present(ports.outer, vec![list(&["Z"]), list(&["A"]), list(&["M"])])
            .expect("present");
        assert_eq!(
            net.stream(ports.inner),
            Some(&[concept("Z"), concept("A"), concept("M")][..])
        );
    }

    #[test]
    fn arity_treats_nodes_as_empty() {
        assert!(has_arity(&concept("X"), 0));
        assert!(!has_arity(&concept("X"), 1));
        assert!(has_arity(&list(&["A", "B"]), 2));
        assert!(!has_arity(&list(&["A", "B"]), 3));
    }

    #[test]
    fn arity_filter_runs_both_ways() {
        let mut net = Network::new(AtomSpace::new());
        let ports = ArityPorts::build(&mut net, 2).expect("build");

        net.present(ports.right, vec![list(&["A"]), list(&["A", "B"])])
            .expect("present");
        assert_eq!(net.stream(ports.left), Some(&[list(&["A", "B"])][..]));
    }
}
