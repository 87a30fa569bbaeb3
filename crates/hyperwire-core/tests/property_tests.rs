//! # Property-Based Tests
//!
//! Invariants of the positional operators and the splitter, checked with
//! proptest over generated atoms.

use hyperwire_core::ops::{has_arity, nth_of};
use hyperwire_core::{
    Atom, AtomSpace, ArityPorts, Network, NthPorts, SplitterPorts, SplitterShape,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn concept(i: u8) -> Atom {
    Atom::node("ConceptNode", format!("c{i}"))
}

/// Lists of 0..5 concept nodes, plus bare nodes.
fn atom_strategy() -> impl Strategy<Value = Atom> {
    prop_oneof![
        (0u8..20).prop_map(concept),
        vec(0u8..20, 0..5).prop_map(|ids| Atom::link(
            "ListLink",
            ids.into_iter().map(concept).collect()
        )),
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Nth yields exactly the element at the position for long enough atoms.
    #[test]
    fn nth_is_exact(atoms in vec(atom_strategy(), 0..20), position in 0usize..5) {
        let mut net = Network::new(AtomSpace::new());
        let ports = NthPorts::build(&mut net, position).expect("build");
        net.present(ports.outer, atoms.clone()).expect("present");

        let expected: Vec<Atom> = atoms
            .iter()
            .filter(|a| a.outgoing_len() > position)
            .filter_map(|a| a.outgoing().get(position).cloned())
            .collect();
        prop_assert_eq!(net.stream(ports.inner).expect("stream"), expected.as_slice());
    }

    /// Nth in isolation agrees with the outgoing set.
    #[test]
    fn nth_of_matches_outgoing(atom in atom_strategy(), position in 0usize..6) {
        prop_assert_eq!(nth_of(&atom, position), atom.outgoing().get(position).cloned());
    }

    /// Raising the arity bound never lets more elements through.
    #[test]
    fn arity_is_monotonic(atoms in vec(atom_strategy(), 0..20), n in 0usize..5) {
        let count = |min_len: usize| {
            let mut net = Network::new(AtomSpace::new());
            let ports = ArityPorts::build(&mut net, min_len).expect("build");
            net.present(ports.left, atoms.clone()).expect("present");
            net.stream(ports.right).map(<[Atom]>::len).expect("stream")
        };
        prop_assert!(count(n + 1) <= count(n));
        for atom in &atoms {
            prop_assert!(!has_arity(atom, n + 1) || has_arity(atom, n));
        }
    }

    /// Splitter round trip: the recovered containers include the original.
    #[test]
    fn splitter_round_trip_is_superset(
        members in vec(vec(0u8..8, 2..4), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let lists: Vec<Atom> = members
            .iter()
            .map(|ids| Atom::link("ListLink", ids.iter().copied().map(concept).collect()))
            .collect();
        let original = pick.get(&lists).clone();
        let space: AtomSpace = lists.iter().cloned().collect();

        let mut net = Network::new(space);
        let ports = SplitterPorts::build(&mut net, &SplitterShape::new("ListLink", 0, 1))
            .expect("build");

        net.present(ports.container, vec![original.clone()]).expect("present");
        let first = net.stream(ports.component_a).expect("component").to_vec();
        net.withdraw(ports.container).expect("withdraw");

        net.present(ports.component_a, first).expect("present");
        let recovered = net.stream(ports.container).expect("containers");
        prop_assert!(recovered.contains(&original));
    }
}
