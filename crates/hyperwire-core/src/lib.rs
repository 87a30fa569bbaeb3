//! # hyperwire-core
//!
//! The direction-inferring dataflow network for Hyperwire - THE NETWORK.
//!
//! This crate queries a labeled hypergraph store through composable stream
//! operators. Operators straddle wires and decide at runtime which way
//! data flows: whichever port first receives a stream becomes the source,
//! and the operator rewires its internal sub-pipelines to match.
//!
//! ## Layers
//!
//! - `types`: atoms, arena handles, messages and the error type
//! - `store`: the `AtomStore` trait and the in-memory `AtomSpace`
//! - `wire`: wires, devices, pipelines and the synchronous `Network`
//! - `ops`: Nth, arity, incoming-position, splitter and triplet operators
//!
//! ## Architectural Constraints
//!
//! - Single thread of control; every call runs the queue to quiescence
//! - Devices never call back into the network, they return actions
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod ops;
pub mod primitives;
pub mod store;
pub mod types;
pub mod wire;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Atom, AtomType, DeviceId, Driver, HyperwireError, Message, Stream, WireId};

// =============================================================================
// RE-EXPORTS: Store and Substrate
// =============================================================================

pub use store::{AtomSpace, AtomStore};
pub use wire::{
    Action, Device, DeviceStatus, FanOut, Filter, Network, NetworkConfig, Pipeline, Probe,
    Transform, Wire,
};

// =============================================================================
// RE-EXPORTS: Operators
// =============================================================================

pub use ops::{
    ArityPorts, IncomingPorts, NthPorts, Orientation, SplitterPorts, SplitterShape, Switch,
    SwitchState, TripletPorts, arity_filter, fan_out, incoming_filter, incoming_position_filter,
    nth, splitter, triplet, type_filter,
};
