//! # Triplet Decomposition
//!
//! Relates links shaped `High(predicate, Low(arg1, arg2, ...))` to their
//! predicate and first two arguments.
//!
//! Two splitters joined by an internal list wire:
//!
//! ```text
//! relation  ─┐                          ┌─ arg1
//!            ├─ High(0, 1) ─ list ─ Low(0, 1) ─┤
//! predicate ─┘                          └─ arg2
//! ```
//!
//! Each splitter infers its own direction, so a stream on any of the four
//! ports propagates through the other three.

use super::splitter::{SplitterShape, splitter};
use crate::primitives::{
    ARGUMENTS_POSITION, DEFAULT_HIGH_TYPE, DEFAULT_LOW_TYPE, FIRST_ARGUMENT, PREDICATE_POSITION,
    SECOND_ARGUMENT,
};
use crate::store::AtomStore;
use crate::wire::{Network, Pipeline};
use crate::{AtomType, HyperwireError, WireId};

/// Build a triplet decomposition over existing wires.
pub fn triplet<S: AtomStore>(
    net: &mut Network<S>,
    high: AtomType,
    low: AtomType,
    relation: WireId,
    predicate: WireId,
    arg1: WireId,
    arg2: WireId,
) -> Pipeline {
    let list = net.create_wire();
    let outer = SplitterShape {
        container_type: high,
        position_a: PREDICATE_POSITION,
        position_b: ARGUMENTS_POSITION,
    };
    let inner = SplitterShape {
        container_type: low,
        position_a: FIRST_ARGUMENT,
        position_b: SECOND_ARGUMENT,
    };

    let mut pipeline = splitter(net, &outer, relation, predicate, list);
    pipeline.extend(splitter(net, &inner, list, arg1, arg2));
    pipeline
}

/// Ports of a standalone triplet decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripletPorts {
    /// Whole `High` links.
    pub relation: WireId,
    pub predicate: WireId,
    pub arg1: WireId,
    pub arg2: WireId,
}

impl TripletPorts {
    /// Create four wires and install a triplet decomposition across them.
    pub fn build<S: AtomStore>(
        net: &mut Network<S>,
        high: AtomType,
        low: AtomType,
    ) -> Result<Self, HyperwireError> {
        let relation = net.create_wire();
        let predicate = net.create_wire();
        let arg1 = net.create_wire();
        let arg2 = net.create_wire();
        let pipeline = triplet(net, high, low, relation, predicate, arg1, arg2);
        net.install(&pipeline)?;
        Ok(Self {
            relation,
            predicate,
            arg1,
            arg2,
        })
    }

    /// Triplets over `EvaluationLink(predicate, ListLink(arg1, arg2))`.
    pub fn evaluation<S: AtomStore>(net: &mut Network<S>) -> Result<Self, HyperwireError> {
        Self::build(
            net,
            AtomType::new(DEFAULT_HIGH_TYPE),
            AtomType::new(DEFAULT_LOW_TYPE),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AtomSpace;
    use crate::Atom;

    struct Fixture {
        space: AtomSpace,
        p: Atom,
        x: Atom,
        y: Atom,
        relation: Atom,
    }

    /// `Rel(P, ListOf(X, Y))` plus an unrelated `Rel(Q, ListOf(Y, X))`.
    fn fixture() -> Fixture {
        let mut space = AtomSpace::new();
        let p = space.add_node("PredicateNode", "P");
        let q = space.add_node("PredicateNode", "Q");
        let x = space.add_node("ConceptNode", "X");
        let y = space.add_node("ConceptNode", "Y");
        let xy = space.add_link("ListLink", vec![x.clone(), y.clone()]);
        let yx = space.add_link("ListLink", vec![y.clone(), x.clone()]);
        let relation = space.add_link("EvaluationLink", vec![p.clone(), xy]);
        space.add_link("EvaluationLink", vec![q, yx]);
        Fixture {
            space,
            p,
            x,
            y,
            relation,
        }
    }

    #[test]
    fn first_argument_recovers_predicate_and_second_argument() {
        let f = fixture();
        let mut net = Network::new(f.space);
        let ports = TripletPorts::evaluation(&mut net).expect("build");

        net.present(ports.arg1, vec![f.x]).expect("present");

        assert_eq!(net.stream(ports.predicate), Some(&[f.p][..]));
        assert_eq!(net.stream(ports.arg2), Some(&[f.y][..]));
        assert_eq!(net.stream(ports.relation), Some(&[f.relation][..]));
    }

    #[test]
    fn relation_source_decomposes() {
        let f = fixture();
        let mut net = Network::new(f.space);
        let ports = TripletPorts::evaluation(&mut net).expect("build");

        net.present(ports.relation, vec![f.relation]).expect("present");

        assert_eq!(net.stream(ports.predicate), Some(&[f.p][..]));
        assert_eq!(net.stream(ports.arg1), Some(&[f.x][..]));
        assert_eq!(net.stream(ports.arg2), Some(&[f.y][..]));
    }

    #[test]
    fn predicate_and_argument_together_are_ambiguous() {
        let f = fixture();
        let mut net = Network::new(f.space);
        let ports = TripletPorts::evaluation(&mut net).expect("build");

        net.present(ports.predicate, vec![f.p]).expect("present");
        let result = net.present(ports.arg1, vec![f.x]);
        assert!(matches!(
            result,
            Err(HyperwireError::AmbiguousDirection { .. })
        ));
    }

    #[test]
    fn rearms_for_a_different_source_port() {
        let f = fixture();
        let mut net = Network::new(f.space);
        let ports = TripletPorts::evaluation(&mut net).expect("build");

        net.present(ports.arg1, vec![f.x.clone()]).expect("present");
        net.withdraw(ports.arg1).expect("withdraw");
        for wire in [ports.relation, ports.predicate, ports.arg1, ports.arg2] {
            assert!(!net.is_active(wire));
        }

        net.present(ports.arg2, vec![f.y]).expect("present");
        assert_eq!(net.stream(ports.arg1), Some(&[f.x][..]));
        assert_eq!(net.stream(ports.predicate), Some(&[f.p][..]));
    }
}
