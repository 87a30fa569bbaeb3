//! # Atom Store
//!
//! The hypergraph store consumed by the network.
//!
//! This module defines the `AtomStore` trait (the query surface operators
//! rely on) and `AtomSpace`, a small in-memory implementation.
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering.

use crate::{Atom, AtomType, HyperwireError};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// ATOMSTORE TRAIT
// =============================================================================

/// The AtomStore trait defines the store queries the operators rely on.
///
/// Structural accessors have default implementations over `Atom`, since
/// atoms carry their own outgoing set. Only the incoming index is
/// store-specific.
///
/// Fallible operations return `Result<T, HyperwireError>` so that backends
/// with I/O can report failures uniformly.
pub trait AtomStore {
    /// All links that reference `atom` in their outgoing set, in a stable order.
    fn incoming(&self, atom: &Atom) -> Result<Vec<Atom>, HyperwireError>;

    /// Length of the outgoing set of `atom`.
    fn outgoing_len(&self, atom: &Atom) -> usize {
        atom.outgoing_len()
    }

    /// Element at `position` of the outgoing set of `atom`.
    fn outgoing_at<'a>(&self, atom: &'a Atom, position: usize) -> Option<&'a Atom> {
        atom.outgoing_at(position)
    }

    /// Type tag of `atom`.
    fn atom_type<'a>(&self, atom: &'a Atom) -> &'a AtomType {
        atom.atom_type()
    }

    /// Value equality between two atoms obtained independently.
    fn equal(&self, a: &Atom, b: &Atom) -> bool {
        a == b
    }
}

// =============================================================================
// ATOMSPACE IMPLEMENTATION
// =============================================================================

/// In-memory atom store.
///
/// Uses `BTreeMap` exclusively for deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct AtomSpace {
    /// Every atom known to the store, links and nodes alike.
    atoms: BTreeSet<Atom>,

    /// Incoming index: atom -> links whose outgoing set contains it.
    incoming: BTreeMap<Atom, BTreeSet<Atom>>,
}

impl AtomSpace {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Inserting an existing node is a no-op.
    pub fn add_node(&mut self, ty: impl Into<String>, name: impl Into<String>) -> Atom {
        let node = Atom::node(ty, name);
        self.add(node.clone());
        node
    }

    /// Insert a link over `outgoing`.
    ///
    /// The outgoing atoms are inserted too (recursively), and the incoming
    /// index is updated for each of them.
    pub fn add_link(&mut self, ty: impl Into<String>, outgoing: Vec<Atom>) -> Atom {
        let link = Atom::link(ty, outgoing);
        self.add(link.clone());
        link
    }

    /// Insert an arbitrary atom and everything it references.
    pub fn add(&mut self, atom: Atom) {
        if self.atoms.contains(&atom) {
            return;
        }
        for member in atom.outgoing() {
            self.add(member.clone());
            self.incoming
                .entry(member.clone())
                .or_default()
                .insert(atom.clone());
        }
        self.atoms.insert(atom);
    }

    /// Check if the store contains `atom`.
    #[must_use]
    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.contains(atom)
    }

    /// Number of atoms in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Number of links in the store.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_link()).count()
    }

    /// All atoms in deterministic order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// All atoms of a given type in deterministic order.
    pub fn atoms_of_type<'a>(&'a self, ty: &'a str) -> impl Iterator<Item = &'a Atom> + 'a {
        self.atoms.iter().filter(move |a| a.atom_type().as_str() == ty)
    }
}

impl AtomStore for AtomSpace {
    fn incoming(&self, atom: &Atom) -> Result<Vec<Atom>, HyperwireError> {
        Ok(self
            .incoming
            .get(atom)
            .map(|links| links.iter().cloned().collect())
            .unwrap_or_default())
    }
}

impl FromIterator<Atom> for AtomSpace {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        let mut space = Self::new();
        for atom in iter {
            space.add(atom);
        }
        space
    }
}

// =============================================================================
// TESTS
// =============================================================================
