//! # Splitter
//!
//! Three-port operator relating containers to two of their components.
//!
//! Any port may be the source:
//! - container known: keep containers of the right type, project both
//!   component positions
//! - one component known: recover the containers holding it, keep those
//!   long enough to also hold the sibling position, project the sibling
//!
//! The three branches are pre-built and sit behind one `Switch`.

use super::direction::Switch;
use super::incoming::incoming_position_filter;
use super::positional::{arity_filter, nth};
use super::{fan_out, type_filter};
use crate::store::AtomStore;
use crate::wire::{Network, Pipeline};
use crate::{AtomType, DeviceId, HyperwireError, WireId};

/// Container type and the two component positions a splitter relates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitterShape {
    pub container_type: AtomType,
    pub position_a: usize,
    pub position_b: usize,
}

impl SplitterShape {
    /// Create a shape over containers of type `container_type`.
    #[must_use]
    pub fn new(container_type: impl Into<String>, position_a: usize, position_b: usize) -> Self {
        Self {
            container_type: AtomType::new(container_type),
            position_a,
            position_b,
        }
    }
}

/// Branch run when a component is the source.
///
/// `known` is the source component's position, `other` the sibling's.
fn recover<S: AtomStore>(
    net: &mut Network<S>,
    container_type: AtomType,
    (known, other): (usize, usize),
    component: WireId,
    container: WireId,
    sibling: WireId,
) -> Pipeline {
    let candidates = net.create_wire();
    let guarded = net.create_wire();
    let projected = net.create_wire();

    let mut branch = incoming_position_filter(net, container_type, known, component, candidates);
    branch.extend(fan_out(net, candidates, vec![guarded, projected]));
    branch.extend(arity_filter(net, other.saturating_add(1), guarded, container));
    branch.extend(nth(net, other, projected, sibling));
    branch
}

/// Branch run when the container is the source.
fn project<S: AtomStore>(
    net: &mut Network<S>,
    shape: &SplitterShape,
    container: WireId,
    component_a: WireId,
    component_b: WireId,
) -> Pipeline {
    let typed = net.create_wire();
    let to_a = net.create_wire();
    let to_b = net.create_wire();

    let mut branch = type_filter(net, shape.container_type.clone(), container, typed);
    branch.extend(fan_out(net, typed, vec![to_a, to_b]));
    branch.extend(nth(net, shape.position_a, to_a, component_a));
    branch.extend(nth(net, shape.position_b, to_b, component_b));
    branch
}

fn switch<S: AtomStore>(
    net: &mut Network<S>,
    shape: &SplitterShape,
    container: WireId,
    component_a: WireId,
    component_b: WireId,
) -> DeviceId {
    let from_container = project(net, shape, container, component_a, component_b);
    let from_a = recover(
        net,
        shape.container_type.clone(),
        (shape.position_a, shape.position_b),
        component_a,
        container,
        component_b,
    );
    let from_b = recover(
        net,
        shape.container_type.clone(),
        (shape.position_b, shape.position_a),
        component_b,
        container,
        component_a,
    );
    net.add_device(Switch::new(
        "splitter",
        vec![container, component_a, component_b],
        vec![from_container, from_a, from_b],
    ))
}

/// Build a splitter over existing wires.
///
/// The returned pipeline attaches only the switch; the branches are
/// registered in the network and connected on demand.
pub fn splitter<S: AtomStore>(
    net: &mut Network<S>,
    shape: &SplitterShape,
    container: WireId,
    component_a: WireId,
    component_b: WireId,
) -> Pipeline {
    let device = switch(net, shape, container, component_a, component_b);
    let mut pipeline = Pipeline::new();
    for wire in [container, component_a, component_b] {
        pipeline.attach(wire, device);
    }
    pipeline
}

/// Ports of a standalone splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterPorts {
    pub container: WireId,
    pub component_a: WireId,
    pub component_b: WireId,
    /// The direction-inferring switch.
    pub switch: DeviceId,
}

impl SplitterPorts {
    /// Create three wires and install a splitter across them.
    pub fn build<S: AtomStore>(
        net: &mut Network<S>,
        shape: &SplitterShape,
    ) -> Result<Self, HyperwireError> {
        let container = net.create_wire();
        let component_a = net.create_wire();
        let component_b = net.create_wire();
        let switch = switch(net, shape, container, component_a, component_b);
        for wire in [container, component_a, component_b] {
            net.connect(wire, switch)?;
        }
        Ok(Self {
            container,
            component_a,
            component_b,
            switch,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
