//! # Pipelines
//!
//! A pipeline is the ordered list of (wire, device) attachments that make up
//! one composed operator. Devices are created in the network up front; a
//! pipeline only records where they plug in, so the same pipeline can be
//! connected, disconnected and connected again.

use super::Action;
use crate::{DeviceId, WireId};
use std::collections::BTreeSet;

/// Ordered set of attachments forming a composed operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    attachments: Vec<(WireId, DeviceId)>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `device` plugs into `wire`.
    pub fn attach(&mut self, wire: WireId, device: DeviceId) {
        if !self.attachments.contains(&(wire, device)) {
            self.attachments.push((wire, device));
        }
    }

    /// Append every attachment of `other`.
    pub fn extend(&mut self, other: Pipeline) {
        for (wire, device) in other.attachments {
            self.attach(wire, device);
        }
    }

    /// All attachments in connection order.
    #[must_use]
    pub fn attachments(&self) -> &[(WireId, DeviceId)] {
        &self.attachments
    }

    /// The devices taking part in this pipeline.
    #[must_use]
    pub fn devices(&self) -> BTreeSet<DeviceId> {
        self.attachments.iter().map(|(_, device)| *device).collect()
    }

    /// Check if the pipeline has no attachments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Actions that plug every device in, in order.
    #[must_use]
    pub fn connect_actions(&self) -> Vec<Action> {
        self.attachments
            .iter()
            .map(|&(wire, device)| Action::Connect { wire, device })
            .collect()
    }

    /// Actions that unplug every device, last attachment first.
    #[must_use]
    pub fn disconnect_actions(&self) -> Vec<Action> {
        self.attachments
            .iter()
            .rev()
            .map(|&(wire, device)| Action::Disconnect { wire, device })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
