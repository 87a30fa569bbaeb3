//! # Core Type Definitions
//!
//! This module contains all core types for the Hyperwire dataflow network:
//! - Store elements (`Atom`, `AtomType`)
//! - Arena handles (`WireId`, `DeviceId`)
//! - Wire traffic (`Driver`, `Message`, `Stream`)
//! - Error types (`HyperwireError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Compare by value, never by identity
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ATOM TYPE
// =============================================================================

/// Type tag of a store element (e.g. `EvaluationLink`, `ConceptNode`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomType(pub String);

impl AtomType {
    /// Create a new type tag from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the type tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// ATOM
// =============================================================================

/// A store element: either an atomic node or a link over an ordered
/// outgoing set.
///
/// Two atoms are equal when they have the same type and the same name or
/// the same outgoing set, element by element. Atoms obtained independently
/// from the store therefore compare equal without sharing identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Atom {
    /// Atomic element with a type and a name.
    Node {
        #[serde(rename = "type")]
        ty: AtomType,
        name: String,
    },
    /// Element with a type and a fixed-length ordered outgoing set.
    Link {
        #[serde(rename = "type")]
        ty: AtomType,
        outgoing: Vec<Atom>,
    },
}

impl Atom {
    /// Build a node.
    #[must_use]
    pub fn node(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Node {
            ty: AtomType::new(ty),
            name: name.into(),
        }
    }

    /// Build a link.
    #[must_use]
    pub fn link(ty: impl Into<String>, outgoing: Vec<Atom>) -> Self {
        Self::Link {
            ty: AtomType::new(ty),
            outgoing,
        }
    }

    /// The type tag of this atom.
    #[must_use]
    pub fn atom_type(&self) -> &AtomType {
        match self {
            Self::Node { ty, .. } | Self::Link { ty, .. } => ty,
        }
    }

    /// The outgoing set. Nodes have an empty one.
    #[must_use]
    pub fn outgoing(&self) -> &[Atom] {
        match self {
            Self::Node { .. } => &[],
            Self::Link { outgoing, .. } => outgoing,
        }
    }

    /// Length of the outgoing set (0 for nodes).
    #[must_use]
    pub fn outgoing_len(&self) -> usize {
        self.outgoing().len()
    }

    /// Element at `position` of the outgoing set, if the set is long enough.
    #[must_use]
    pub fn outgoing_at(&self, position: usize) -> Option<&Atom> {
        self.outgoing().get(position)
    }

    /// The node name, if this atom is a node.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Node { name, .. } => Some(name),
            Self::Link { .. } => None,
        }
    }

    /// Check if this atom is a link.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node { ty, name } => write!(f, "({} \"{}\")", ty, name),
            Self::Link { ty, outgoing } => {
                write!(f, "({}", ty)?;
                for atom in outgoing {
                    write!(f, " {}", atom)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Parse a node written as `Type:name`.
///
/// Links have no compact text form; read them from a store file instead.
impl FromStr for Atom {
    type Err = HyperwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((ty, name)) if !ty.trim().is_empty() && !name.trim().is_empty() => {
                Ok(Self::node(ty.trim(), name.trim()))
            }
            _ => Err(HyperwireError::InvalidAtom(s.to_string())),
        }
    }
}

// =============================================================================
// ARENA HANDLES
// =============================================================================

/// Handle of a wire inside a `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireId(pub usize);

/// Handle of a device inside a `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

// =============================================================================
// WIRE TRAFFIC
// =============================================================================

/// An ordered, finite stream of atoms carried by a wire.
pub type Stream = Vec<Atom>;

/// Who is putting a stream on a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Driver {
    /// The code that owns the network (presents and withdraws streams).
    Caller,
    /// A device attached to the wire.
    Device(DeviceId),
}

/// Connection-state notification delivered to attached devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// A wire started carrying a stream (or its stream was replaced).
    Assert,
    /// A wire stopped carrying a stream.
    Float,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Hyperwire system.
///
/// - Structural and type mismatches are not errors: operators drop the element
/// - `AmbiguousDirection` is the only error that halts a pipeline
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum HyperwireError {
    /// Two ports of a direction-inferring device carry independent streams.
    #[error("Ambiguous direction at device {device}: ports {ports:?} carry streams at once")]
    AmbiguousDirection {
        /// The device that detected the conflict.
        device: DeviceId,
        /// The ports that were active.
        ports: Vec<WireId>,
    },

    /// The requested wire does not exist in the network.
    #[error("Wire not found: {0}")]
    UnknownWire(WireId),

    /// The requested device does not exist in the network.
    #[error("Device not found: {0}")]
    UnknownDevice(DeviceId),

    /// Message dispatch did not reach quiescence within the step bound.
    #[error("Dispatch exceeded {limit} steps without settling")]
    DispatchLimit { limit: usize },

    /// Text that does not describe an atom.
    #[error("Invalid atom '{0}': expected Type:name")]
    InvalidAtom(String),

    /// The atom store reported a failure.
    #[error("Store error: {0}")]
    Store(String),

    /// A configuration value or file is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
