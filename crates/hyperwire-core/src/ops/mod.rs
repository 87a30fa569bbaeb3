//! # Operators
//!
//! Composed operators built on the wire substrate.
//!
//! Every operator comes in two forms:
//! - a builder function taking existing wires and returning the `Pipeline`
//!   to connect (used for composition, nothing is connected yet)
//! - a `*Ports` handle whose `build` creates fresh wires and installs the
//!   operator, for callers that just want to present and observe streams

pub mod direction;
pub mod incoming;
pub mod positional;
pub mod splitter;
pub mod triplet;

pub use direction::{Activity, Effect, Switch, SwitchState, transition};
pub use incoming::{
    IncomingFilter, IncomingPorts, Orientation, incoming_filter, incoming_position_filter,
};
pub use positional::{ArityPorts, NthPorts, arity_filter, has_arity, nth, nth_of};
pub use splitter::{SplitterPorts, SplitterShape, splitter};
pub use triplet::{TripletPorts, triplet};

use crate::store::AtomStore;
use crate::wire::{FanOut, Filter, Network, Pipeline};
use crate::{AtomType, WireId};

/// Build a symmetric type filter between `left` and `right`.
pub fn type_filter<S: AtomStore>(
    net: &mut Network<S>,
    ty: AtomType,
    left: WireId,
    right: WireId,
) -> Pipeline {
    let device = net.add_device(Filter::new("type", left, right, move |atom| {
        *atom.atom_type() == ty
    }));
    let mut pipeline = Pipeline::new();
    pipeline.attach(left, device);
    pipeline.attach(right, device);
    pipeline
}

/// Build a fan-out from `input` onto `outputs`.
pub fn fan_out<S: AtomStore>(
    net: &mut Network<S>,
    input: WireId,
    outputs: Vec<WireId>,
) -> Pipeline {
    let device = net.add_device(FanOut::new(input, outputs.clone()));
    let mut pipeline = Pipeline::new();
    pipeline.attach(input, device);
    for wire in outputs {
        pipeline.attach(wire, device);
    }
    pipeline
}

// =============================================================================
// TESTS
// =============================================================================
