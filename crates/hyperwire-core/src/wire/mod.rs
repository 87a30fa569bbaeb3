//! # Wire Substrate
//!
//! Wires, devices and the synchronous message loop that connects them.
//!
//! The `Network` is an arena: wires and devices live in vectors and refer to
//! each other by `WireId`/`DeviceId`. Every public entry point (`present`,
//! `withdraw`, `connect`, `disconnect`, `install`) enqueues messages and runs
//! the queue until it is empty.
//!
//! ## Delivery Rules
//!
//! - A wire broadcasts `Assert`/`Float` to every attached device except the
//!   driver that caused the change.
//! - Connecting a device to a wire that already carries someone else's
//!   stream delivers an `Assert` to that device.
//! - Disconnecting a device floats whatever it drove on that wire.
//! - A queued message is dropped if its device has since been detached.

pub mod device;
pub mod pipeline;
pub mod stock;

pub use device::{Action, Device, DeviceStatus, Probe};
pub use pipeline::Pipeline;
pub use stock::{FanOut, Filter, Transform};

use crate::primitives::DEFAULT_MAX_DISPATCH_STEPS;
use crate::store::AtomStore;
use crate::{DeviceId, Driver, HyperwireError, Message, Stream, WireId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// =============================================================================
// WIRE
// =============================================================================

/// A channel between devices.
///
/// A wire holds the devices attached to it and the streams currently put on
/// it, one per driver. In normal operation a wire has at most one driver.
#[derive(Debug, Clone, Default)]
pub struct Wire {
    devices: Vec<DeviceId>,
    drives: Vec<(Driver, Stream)>,
}

impl Wire {
    /// Attached devices in attachment order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    /// Check if `device` is attached.
    #[must_use]
    pub fn is_attached(&self, device: DeviceId) -> bool {
        self.devices.contains(&device)
    }

    /// Check if any driver puts a stream on this wire.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.drives.is_empty()
    }

    /// Check if `driver` puts a stream on this wire.
    #[must_use]
    pub fn is_driven_by(&self, driver: Driver) -> bool {
        self.drives.iter().any(|(d, _)| *d == driver)
    }

    /// Current drivers in the order they started.
    pub fn drivers(&self) -> impl Iterator<Item = Driver> + '_ {
        self.drives.iter().map(|(d, _)| *d)
    }

    /// The first stream on this wire.
    #[must_use]
    pub fn stream(&self) -> Option<&Stream> {
        self.drives.first().map(|(_, s)| s)
    }

    /// The first stream not produced by `driver`.
    #[must_use]
    pub fn stream_excluding(&self, driver: Driver) -> Option<&Stream> {
        self.drives
            .iter()
            .find(|(d, _)| *d != driver)
            .map(|(_, s)| s)
    }

    fn attach(&mut self, device: DeviceId) -> bool {
        if self.is_attached(device) {
            return false;
        }
        self.devices.push(device);
        true
    }

    fn detach(&mut self, device: DeviceId) {
        self.devices.retain(|d| *d != device);
    }

    fn set_drive(&mut self, driver: Driver, stream: Stream) {
        match self.drives.iter_mut().find(|(d, _)| *d == driver) {
            Some(slot) => slot.1 = stream,
            None => self.drives.push((driver, stream)),
        }
    }

    fn clear_drive(&mut self, driver: Driver) -> bool {
        let before = self.drives.len();
        self.drives.retain(|(d, _)| *d != driver);
        self.drives.len() != before
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tunables for a `Network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Maximum messages delivered by one entry-point call.
    pub max_dispatch_steps: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_dispatch_steps: DEFAULT_MAX_DISPATCH_STEPS,
        }
    }
}

// =============================================================================
// NETWORK
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Envelope {
    device: DeviceId,
    wire: WireId,
    message: Message,
}

/// The dataflow network: store, wires, devices and the dispatch queue.
pub struct Network<S: AtomStore> {
    store: S,
    config: NetworkConfig,
    wires: Vec<Wire>,
    devices: Vec<Option<Box<dyn Device<S>>>>,
    queue: VecDeque<Envelope>,
}

impl<S: AtomStore> Network<S> {
    /// Create a network over `store` with default configuration.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, NetworkConfig::default())
    }

    /// Create a network over `store` with explicit configuration.
    #[must_use]
    pub fn with_config(store: S, config: NetworkConfig) -> Self {
        Self {
            store,
            config,
            wires: Vec::new(),
            devices: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// The atom store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the atom store.
    ///
    /// Streams already on wires are not recomputed; re-present them to
    /// query the modified store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Create a new floating wire.
    pub fn create_wire(&mut self) -> WireId {
        self.wires.push(Wire::default());
        WireId(self.wires.len() - 1)
    }

    /// Register a device. It is not attached to anything yet.
    pub fn add_device<D: Device<S> + 'static>(&mut self, device: D) -> DeviceId {
        self.devices.push(Some(Box::new(device)));
        DeviceId(self.devices.len() - 1)
    }

    /// Number of wires.
    #[must_use]
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Look up a wire.
    pub fn wire(&self, wire: WireId) -> Result<&Wire, HyperwireError> {
        self.wires
            .get(wire.0)
            .ok_or(HyperwireError::UnknownWire(wire))
    }

    /// The first stream carried by `wire`, if any.
    #[must_use]
    pub fn stream(&self, wire: WireId) -> Option<&[crate::Atom]> {
        self.wires
            .get(wire.0)
            .and_then(Wire::stream)
            .map(Vec::as_slice)
    }

    /// Check if `wire` carries a stream.
    #[must_use]
    pub fn is_active(&self, wire: WireId) -> bool {
        self.wires.get(wire.0).is_some_and(Wire::is_active)
    }

    /// Current state of a device.
    pub fn status(&self, device: DeviceId) -> Result<DeviceStatus, HyperwireError> {
        self.devices
            .get(device.0)
            .and_then(Option::as_ref)
            .map(|d| d.status())
            .ok_or(HyperwireError::UnknownDevice(device))
    }

    /// Attach `device` to `wire`.
    pub fn connect(&mut self, wire: WireId, device: DeviceId) -> Result<(), HyperwireError> {
        self.apply(Driver::Caller, Action::Connect { wire, device })?;
        self.run()
    }

    /// Detach `device` from `wire`. Detaching a device that is not attached is a no-op.
    pub fn disconnect(&mut self, wire: WireId, device: DeviceId) -> Result<(), HyperwireError> {
        self.apply(Driver::Caller, Action::Disconnect { wire, device })?;
        self.run()
    }

    /// Connect every attachment of `pipeline`.
    pub fn install(&mut self, pipeline: &Pipeline) -> Result<(), HyperwireError> {
        for action in pipeline.connect_actions() {
            self.apply(Driver::Caller, action)?;
        }
        self.run()
    }

    /// Disconnect every attachment of `pipeline`.
    pub fn uninstall(&mut self, pipeline: &Pipeline) -> Result<(), HyperwireError> {
        for action in pipeline.disconnect_actions() {
            self.apply(Driver::Caller, action)?;
        }
        self.run()
    }

    /// Put a caller-owned stream on `wire` and let the network settle.
    pub fn present(&mut self, wire: WireId, stream: Stream) -> Result<(), HyperwireError> {
        tracing::debug!(%wire, len = stream.len(), "present");
        self.apply(Driver::Caller, Action::Emit { wire, stream })?;
        self.run()
    }

    /// Remove the caller-owned stream from `wire` and let the network settle.
    pub fn withdraw(&mut self, wire: WireId) -> Result<(), HyperwireError> {
        tracing::debug!(%wire, "withdraw");
        self.apply(Driver::Caller, Action::Float { wire })?;
        self.run()
    }

    // -------------------------------------------------------------------------
    // DISPATCH
    // -------------------------------------------------------------------------

    fn wire_mut(&mut self, wire: WireId) -> Result<&mut Wire, HyperwireError> {
        self.wires
            .get_mut(wire.0)
            .ok_or(HyperwireError::UnknownWire(wire))
    }

    fn broadcast(&mut self, wire: WireId, origin: Driver, message: Message) {
        let Some(w) = self.wires.get(wire.0) else {
            return;
        };
        for &device in &w.devices {
            if Driver::Device(device) != origin {
                self.queue.push_back(Envelope {
                    device,
                    wire,
                    message,
                });
            }
        }
    }

    fn apply(&mut self, actor: Driver, action: Action) -> Result<(), HyperwireError> {
        match action {
            Action::Connect { wire, device } => {
                if self.devices.get(device.0).is_none() {
                    return Err(HyperwireError::UnknownDevice(device));
                }
                let w = self.wire_mut(wire)?;
                let newly = w.attach(device);
                let fed = w.stream_excluding(Driver::Device(device)).is_some();
                if newly && fed {
                    self.queue.push_back(Envelope {
                        device,
                        wire,
                        message: Message::Assert,
                    });
                }
            }
            Action::Disconnect { wire, device } => {
                let w = self.wire_mut(wire)?;
                w.detach(device);
                if w.clear_drive(Driver::Device(device)) {
                    self.broadcast(wire, Driver::Device(device), Message::Float);
                }
            }
            Action::Emit { wire, stream } => {
                self.wire_mut(wire)?.set_drive(actor, stream);
                self.broadcast(wire, actor, Message::Assert);
            }
            Action::Float { wire } => {
                if self.wire_mut(wire)?.clear_drive(actor) {
                    self.broadcast(wire, actor, Message::Float);
                }
            }
        }
        Ok(())
    }

    fn run(&mut self) -> Result<(), HyperwireError> {
        let limit = self.config.max_dispatch_steps;
        let mut steps = 0usize;
        while let Some(envelope) = self.queue.pop_front() {
            if steps >= limit {
                self.queue.clear();
                tracing::warn!(limit, "dispatch did not settle");
                return Err(HyperwireError::DispatchLimit { limit });
            }
            steps += 1;

            let attached = self
                .wires
                .get(envelope.wire.0)
                .is_some_and(|w| w.is_attached(envelope.device));
            if !attached {
                continue;
            }
            if let Err(e) = self.deliver(envelope) {
                self.queue.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    fn deliver(&mut self, envelope: Envelope) -> Result<(), HyperwireError> {
        let Envelope {
            device: id,
            wire,
            message,
        } = envelope;
        let mut device = self
            .devices
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(HyperwireError::UnknownDevice(id))?;

        let result = {
            let probe = Probe::new(id, &self.wires, &self.store);
            device.handle(&probe, wire, message)
        };
        tracing::trace!(device = %id, name = device.name(), %wire, ?message, "delivered");

        if let Some(slot) = self.devices.get_mut(id.0) {
            *slot = Some(device);
        }
        for action in result? {
            self.apply(Driver::Device(id), action)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
