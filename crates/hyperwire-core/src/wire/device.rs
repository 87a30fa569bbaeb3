//! # Device Protocol
//!
//! The contract between the network and the devices it hosts.
//!
//! A device never touches the network directly. It receives a read-only
//! `Probe` of the wires and the store, and returns a list of `Action`s
//! which the network applies once the handler has returned. This keeps
//! rewiring free of re-entrancy: a connect that triggers an assert only
//! enqueues a message, it never calls back into the device being rewired.

use super::Wire;
use crate::store::AtomStore;
use crate::{DeviceId, Driver, HyperwireError, Message, Stream, WireId};
use std::collections::BTreeSet;

/// A wiring or data effect requested by a device.
///
/// `Emit` and `Float` act on behalf of the device that returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Attach `device` to `wire`. No-op if already attached.
    Connect { wire: WireId, device: DeviceId },
    /// Detach `device` from `wire`, floating whatever it drives there.
    /// No-op if not attached.
    Disconnect { wire: WireId, device: DeviceId },
    /// Put `stream` on `wire`, replacing this device's previous stream there.
    Emit { wire: WireId, stream: Stream },
    /// Stop driving `wire`. No-op if this device does not drive it.
    Float { wire: WireId },
}

/// Observable state of a device, for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// A stateless operator (transform, filter, fan-out).
    Passive,
    /// Armed, waiting for a stream to reveal the direction.
    Listening,
    /// Delegating to the sub-pipeline fed by `source`.
    Committed { source: WireId },
    /// Saw an ambiguous direction; ignores all further traffic.
    Failed,
}

/// A message handler attached to one or more wires.
pub trait Device<S: AtomStore> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// React to `message` arriving on `wire`.
    fn handle(
        &mut self,
        probe: &Probe<'_, S>,
        wire: WireId,
        message: Message,
    ) -> Result<Vec<Action>, HyperwireError>;

    /// Current state of the device.
    fn status(&self) -> DeviceStatus {
        DeviceStatus::Passive
    }
}

/// Read-only view of the network handed to a device while it handles a message.
pub struct Probe<'a, S> {
    device: DeviceId,
    wires: &'a [Wire],
    store: &'a S,
}

impl<'a, S: AtomStore> Probe<'a, S> {
    pub(crate) fn new(device: DeviceId, wires: &'a [Wire], store: &'a S) -> Self {
        Self {
            device,
            wires,
            store,
        }
    }

    /// The device this probe was built for.
    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// The atom store.
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// The stream on `wire` produced by anyone other than this device.
    pub fn input(&self, wire: WireId) -> Option<&'a Stream> {
        self.wires
            .get(wire.0)?
            .stream_excluding(Driver::Device(self.device))
    }

    /// Check if this device currently drives `wire`.
    pub fn drives(&self, wire: WireId) -> bool {
        self.wires
            .get(wire.0)
            .is_some_and(|w| w.is_driven_by(Driver::Device(self.device)))
    }

    /// Check if `wire` carries any stream at all.
    pub fn is_active(&self, wire: WireId) -> bool {
        self.wires.get(wire.0).is_some_and(Wire::is_active)
    }

    /// Check if `wire` is driven by something outside `own`.
    ///
    /// Direction-inferring devices pass the set of devices in their own
    /// sub-pipelines, so streams they produced themselves are not mistaken
    /// for a new source.
    pub fn driven_outside(&self, wire: WireId, own: &BTreeSet<DeviceId>) -> bool {
        self.wires.get(wire.0).is_some_and(|w| {
            w.drivers().any(|driver| match driver {
                Driver::Caller => true,
                Driver::Device(id) => !own.contains(&id),
            })
        })
    }
}
