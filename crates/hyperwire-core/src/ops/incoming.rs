//! # Incoming-Position Filter
//!
//! Relates role elements to the containers that hold them at a fixed
//! position.
//!
//! `IncomingFilter` is the unidirectional device: its orientation is fixed
//! when it is built. `incoming_position_filter` composes two of them, one
//! per orientation, behind a `Switch` so the operator runs as a query
//! (role known, containers wanted) or as an assertion check (containers
//! known, roles wanted) depending on which side receives a stream first.

use super::direction::Switch;
use crate::store::AtomStore;
use crate::wire::{Action, Device, Network, Pipeline, Probe};
use crate::{Atom, AtomType, DeviceId, HyperwireError, Message, Stream, WireId};

/// Which way a unidirectional incoming filter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Role elements in, containing links out.
    RoleToContainer,
    /// Containing links in, role elements out.
    ContainerToRole,
}

/// Unidirectional incoming-position filter.
#[derive(Debug, Clone)]
pub struct IncomingFilter {
    container_type: AtomType,
    position: usize,
    orientation: Orientation,
    input: WireId,
    output: WireId,
}

impl IncomingFilter {
    /// Create a filter over containers of `container_type` holding the role at `position`.
    #[must_use]
    pub fn new(
        container_type: AtomType,
        position: usize,
        orientation: Orientation,
        role: WireId,
        container: WireId,
    ) -> Self {
        let (input, output) = match orientation {
            Orientation::RoleToContainer => (role, container),
            Orientation::ContainerToRole => (container, role),
        };
        Self {
            container_type,
            position,
            orientation,
            input,
            output,
        }
    }

    /// Containers of the right type that hold `role` at the right position.
    fn containers_of<S: AtomStore>(
        &self,
        store: &S,
        role: &Atom,
    ) -> Result<Vec<Atom>, HyperwireError> {
        Ok(store
            .incoming(role)?
            .into_iter()
            .filter(|link| *store.atom_type(link) == self.container_type)
            .filter(|link| {
                store
                    .outgoing_at(link, self.position)
                    .is_some_and(|member| store.equal(member, role))
            })
            .collect())
    }

    /// The role held by `container`, if it has the right type and shape.
    fn role_of<S: AtomStore>(&self, store: &S, container: &Atom) -> Option<Atom> {
        if *store.atom_type(container) != self.container_type {
            return None;
        }
        store.outgoing_at(container, self.position).cloned()
    }

    fn run<S: AtomStore>(&self, store: &S, input: &Stream) -> Result<Stream, HyperwireError> {
        match self.orientation {
            Orientation::RoleToContainer => {
                let mut out = Vec::new();
                for role in input {
                    out.extend(self.containers_of(store, role)?);
                }
                Ok(out)
            }
            Orientation::ContainerToRole => Ok(input
                .iter()
                .filter_map(|container| self.role_of(store, container))
                .collect()),
        }
    }
}

impl<S: AtomStore> Device<S> for IncomingFilter {
    fn name(&self) -> &'static str {
        match self.orientation {
            Orientation::RoleToContainer => "incoming-role-to-container",
            Orientation::ContainerToRole => "incoming-container-to-role",
        }
    }

    fn handle(
        &mut self,
        probe: &Probe<'_, S>,
        wire: WireId,
        message: Message,
    ) -> Result<Vec<Action>, HyperwireError> {
        if wire != self.input {
            return Ok(Vec::new());
        }
        match (message, probe.input(self.input)) {
            (Message::Assert, Some(stream)) => Ok(vec![Action::Emit {
                wire: self.output,
                stream: self.run(probe.store(), stream)?,
            }]),
            (Message::Float, None) if probe.drives(self.output) => {
                Ok(vec![Action::Float { wire: self.output }])
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Build a unidirectional incoming filter.
pub fn incoming_filter<S: AtomStore>(
    net: &mut Network<S>,
    container_type: AtomType,
    position: usize,
    orientation: Orientation,
    role: WireId,
    container: WireId,
) -> Pipeline {
    let device = net.add_device(IncomingFilter::new(
        container_type,
        position,
        orientation,
        role,
        container,
    ));
    let mut pipeline = Pipeline::new();
    pipeline.attach(role, device);
    pipeline.attach(container, device);
    pipeline
}

/// Register the two unidirectional filters and the switch choosing between them.
fn bidirectional<S: AtomStore>(
    net: &mut Network<S>,
    container_type: AtomType,
    position: usize,
    role: WireId,
    container: WireId,
) -> DeviceId {
    let forward = incoming_filter(
        net,
        container_type.clone(),
        position,
        Orientation::RoleToContainer,
        role,
        container,
    );
    let backward = incoming_filter(
        net,
        container_type,
        position,
        Orientation::ContainerToRole,
        role,
        container,
    );
    net.add_device(Switch::new(
        "incoming-position",
        vec![role, container],
        vec![forward, backward],
    ))
}

/// Build the bidirectional incoming-position filter between `role` and `container`.
///
/// The returned pipeline attaches only the switch; the two unidirectional
/// filters are registered but stay unplugged until a direction is known.
pub fn incoming_position_filter<S: AtomStore>(
    net: &mut Network<S>,
    container_type: AtomType,
    position: usize,
    role: WireId,
    container: WireId,
) -> Pipeline {
    let switch = bidirectional(net, container_type, position, role, container);
    let mut pipeline = Pipeline::new();
    pipeline.attach(role, switch);
    pipeline.attach(container, switch);
    pipeline
}

/// Ports of a standalone bidirectional incoming-position filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingPorts {
    /// Wire carrying role elements.
    pub role: WireId,
    /// Wire carrying containing links.
    pub container: WireId,
    /// The direction-inferring switch.
    pub switch: DeviceId,
}

impl IncomingPorts {
    /// Create two wires and install a bidirectional filter between them.
    pub fn build<S: AtomStore>(
        net: &mut Network<S>,
        container_type: AtomType,
        position: usize,
    ) -> Result<Self, HyperwireError> {
        let role = net.create_wire();
        let container = net.create_wire();
        let switch = bidirectional(net, container_type, position, role, container);
        net.connect(role, switch)?;
        net.connect(container, switch)?;
        Ok(Self {
            role,
            container,
            switch,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AtomSpace;
    use crate::wire::DeviceStatus;

    fn store() -> (AtomSpace, Atom, Atom, Atom) {
        let mut space = AtomSpace::new();
        let x = space.add_node("ConceptNode", "X");
        let y = space.add_node("ConceptNode", "Y");
        let xy = space.add_link("ListLink", vec![x.clone(), y.clone()]);
        // Same members, wrong position for X.
        space.add_link("ListLink", vec![y, x.clone()]);
        // Right position, wrong type.
        space.add_link("SetLink", vec![x.clone()]);
        let z = space.add_node("ConceptNode", "Z");
        (space, x, xy, z)
    }

    #[test]
    fn role_to_container_checks_type_and_position() {
        let (space, x, xy, _) = store();
        let filter = IncomingFilter::new(
            AtomType::new("ListLink"),
            0,
            Orientation::RoleToContainer,
            WireId(0),
            WireId(1),
        );
        assert_eq!(filter.run(&space, &vec![x]).expect("run"), vec![xy]);
    }

    #[test]
    fn container_to_role_projects_position() {
        let (space, x, xy, _) = store();
        let filter = IncomingFilter::new(
            AtomType::new("ListLink"),
            0,
            Orientation::ContainerToRole,
            WireId(0),
            WireId(1),
        );
        let set = Atom::link("SetLink", vec![x.clone()]);
        assert_eq!(filter.run(&space, &vec![xy, set]).expect("run"), vec![x]);
    }

    #[test]
    fn bidirectional_filter_commits_to_first_source() {
        let (space, x, xy, _) = store();
        let mut net = Network::new(space);
        let ports = IncomingPorts::build(&mut net, AtomType::new("ListLink"), 0).expect("build");
        assert_eq!(net.status(ports.switch).expect("status"), DeviceStatus::Listening);

        net.present(ports.role, vec![x]).expect("present");
        assert_eq!(net.stream(ports.container), Some(&[xy][..]));
        assert_eq!(
            net.status(ports.switch).expect("status"),
            DeviceStatus::Committed { source: ports.role }
        );
    }

    #[test]
    fn bidirectional_filter_rearms_for_opposite_direction() {
        let (space, x, xy, _) = store();
        let mut net = Network::new(space);
        let ports = IncomingPorts::build(&mut net, AtomType::new("ListLink"), 0).expect("build");

        net.present(ports.role, vec![x.clone()]).expect("present");
        net.withdraw(ports.role).expect("withdraw");
        assert!(!net.is_active(ports.container));
        assert_eq!(net.status(ports.switch).expect("status"), DeviceStatus::Listening);

        net.present(ports.container, vec![xy]).expect("present");
        assert_eq!(net.stream(ports.role), Some(&[x][..]));
        assert_eq!(
            net.status(ports.switch).expect("status"),
            DeviceStatus::Committed {
                source: ports.container
            }
        );
    }

    #[test]
    fn second_source_is_ambiguous() {
        let (space, x, xy, _) = store();
        let mut net = Network::new(space);
        let ports = IncomingPorts::build(&mut net, AtomType::new("ListLink"), 0).expect("build");

        net.present(ports.role, vec![x]).expect("present");
        let result = net.present(ports.container, vec![xy]);
        assert!(matches!(
            result,
            Err(HyperwireError::AmbiguousDirection { device, .. }) if device == ports.switch
        ));
        assert_eq!(net.status(ports.switch).expect("status"), DeviceStatus::Failed);
    }

    #[test]
    fn unrelated_role_yields_empty_stream() {
        let (space, _, _, z) = store();
        let mut net = Network::new(space);
        let ports = IncomingPorts::build(&mut net, AtomType::new("ListLink"), 0).expect("build");

        net.present(ports.role, vec![z]).expect("present");
        assert_eq!(net.stream(ports.container), Some(&[] as &[Atom]));
    }
}
