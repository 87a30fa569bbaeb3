//! # Direction Inference
//!
//! The switch device shared by every direction-inferring operator.
//!
//! A `Switch` straddles N ports and owns N pre-built branches; branch `i`
//! is the sub-pipeline to run when port `i` turns out to be the source.
//! The switch stays attached to all its ports as an observer. When a
//! stream shows up it commits exactly one branch; when every port has
//! floated again it disconnects that branch and listens for the next
//! source, which may come from a different port.
//!
//! The decision itself is the pure function [`transition`]; the device
//! only takes the port snapshot and turns the resulting [`Effect`] into
//! wiring actions.

use crate::store::AtomStore;
use crate::wire::{Action, Device, DeviceStatus, Pipeline, Probe};
use crate::{DeviceId, HyperwireError, Message, WireId};
use std::collections::BTreeSet;

/// Lifecycle of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Armed, waiting for a source.
    Listening,
    /// Branch `source` is connected.
    Committed { source: usize },
    /// An ambiguous direction was seen; the switch is dead.
    Failed,
}

/// What a transition asks the switch to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to rewire.
    Hold,
    /// Connect branch `i`.
    Commit(usize),
    /// Disconnect branch `i`.
    Release(usize),
    /// Report the listed ports as simultaneous sources.
    Fail(Vec<usize>),
}

/// Snapshot of the switch's ports when a message arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Per port: driven by something outside the switch's own branches.
    pub foreign: Vec<bool>,
    /// No port carries any stream, ours included.
    pub quiet: bool,
}

impl Activity {
    fn sources(&self) -> Vec<usize> {
        self.foreign
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Compute the next state of a switch.
pub fn transition(state: SwitchState, message: Message, activity: &Activity) -> (SwitchState, Effect) {
    match (state, message) {
        (SwitchState::Failed, _) => (SwitchState::Failed, Effect::Hold),
        (SwitchState::Listening, Message::Float) => (SwitchState::Listening, Effect::Hold),
        (SwitchState::Listening, Message::Assert) => {
            let sources = activity.sources();
            match sources.as_slice() {
                [] => (SwitchState::Listening, Effect::Hold),
                [source] => (
                    SwitchState::Committed { source: *source },
                    Effect::Commit(*source),
                ),
                _ => (SwitchState::Failed, Effect::Fail(sources)),
            }
        }
        (SwitchState::Committed { source }, Message::Assert) => {
            let intruders: Vec<usize> = activity
                .sources()
                .into_iter()
                .filter(|i| *i != source)
                .collect();
            if intruders.is_empty() {
                (state, Effect::Hold)
            } else {
                let mut ports = vec![source];
                ports.extend(intruders);
                (SwitchState::Failed, Effect::Fail(ports))
            }
        }
        (SwitchState::Committed { source }, Message::Float) => {
            if activity.quiet {
                (SwitchState::Listening, Effect::Release(source))
            } else {
                (state, Effect::Hold)
            }
        }
    }
}

/// Direction-inferring device over N ports and N branches.
#[derive(Debug, Clone)]
pub struct Switch {
    label: &'static str,
    ports: Vec<WireId>,
    branches: Vec<Pipeline>,
    own: BTreeSet<DeviceId>,
    state: SwitchState,
}

impl Switch {
    /// Create a listening switch. `branches[i]` runs when `ports[i]` is the source.
    #[must_use]
    pub fn new(label: &'static str, ports: Vec<WireId>, branches: Vec<Pipeline>) -> Self {
        let own = branches.iter().flat_map(Pipeline::devices).collect();
        Self {
            label,
            ports,
            branches,
            own,
            state: SwitchState::Listening,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SwitchState {
        self.state
    }

    fn snapshot<S: AtomStore>(&self, probe: &Probe<'_, S>) -> Activity {
        Activity {
            foreign: self
                .ports
                .iter()
                .map(|&port| probe.driven_outside(port, &self.own))
                .collect(),
            quiet: self.ports.iter().all(|&port| !probe.is_active(port)),
        }
    }

    fn port(&self, index: usize) -> Option<WireId> {
        self.ports.get(index).copied()
    }
}

impl<S: AtomStore> Device<S> for Switch {
    fn name(&self) -> &'static str {
        self.label
    }

    fn handle(
        &mut self,
        probe: &Probe<'_, S>,
        wire: WireId,
        message: Message,
    ) -> Result<Vec<Action>, HyperwireError> {
        if !self.ports.contains(&wire) {
            return Ok(Vec::new());
        }
        let activity = self.snapshot(probe);
        let (next, effect) = transition(self.state, message, &activity);
        self.state = next;

        match effect {
            Effect::Hold => Ok(Vec::new()),
            Effect::Commit(i) => {
                tracing::debug!(device = %probe.device(), switch = self.label, source = ?self.port(i), "committed");
                Ok(self
                    .branches
                    .get(i)
                    .map(Pipeline::connect_actions)
                    .unwrap_or_default())
            }
            Effect::Release(i) => {
                tracing::debug!(device = %probe.device(), switch = self.label, source = ?self.port(i), "re-armed");
                Ok(self
                    .branches
                    .get(i)
                    .map(Pipeline::disconnect_actions)
                    .unwrap_or_default())
            }
            Effect::Fail(indices) => {
                let ports: Vec<WireId> = indices.iter().filter_map(|&i| self.port(i)).collect();
                tracing::warn!(device = %probe.device(), switch = self.label, ?ports, "ambiguous direction");
                Err(HyperwireError::AmbiguousDirection {
                    device: probe.device(),
                    ports,
                })
            }
        }
    }

    fn status(&self) -> DeviceStatus {
        match self.state {
            SwitchState::Listening => DeviceStatus::Listening,
            SwitchState::Committed { source } => match self.port(source) {
                Some(source) => DeviceStatus::Committed { source },
                None => DeviceStatus::Failed,
            },
            SwitchState::Failed => DeviceStatus::Failed,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(foreign: &[bool], quiet: bool) -> Activity {
        Activity {
            foreign: foreign.to_vec(),
            quiet,
        }
    }

    #[test]
    fn single_source_commits() {
        let (state, effect) = transition(
            SwitchState::Listening,
            Message::Assert,
            &activity(&[false, true], false),
        );
        assert_eq!(state, SwitchState::Committed { source: 1 });
        assert_eq!(effect, Effect::Commit(1));
    }

    #[test]
    fn no_source_keeps_listening() {
        let (state, effect) = transition(
            SwitchState::Listening,
            Message::Assert,
            &activity(&[false, false], true),
        );
        assert_eq!(state, SwitchState::Listening);
        assert_eq!(effect, Effect::Hold);
    }

    #[test]
    fn two_sources_while_listening_fail() {
        let (state, effect) = transition(
            SwitchState::Listening,
            Message::Assert,
            &activity(&[true, false, true], false),
        );
        assert_eq!(state, SwitchState::Failed);
        assert_eq!(effect, Effect::Fail(vec![0, 2]));
    }

    #[test]
    fn intruder_while_committed_fails() {
        let (state, effect) = transition(
            SwitchState::Committed { source: 0 },
            Message::Assert,
            &activity(&[true, true], false),
        );
        assert_eq!(state, SwitchState::Failed);
        assert_eq!(effect, Effect::Fail(vec![0, 1]));
    }

    #[test]
    fn partial_float_holds() {
        let (state, effect) = transition(
            SwitchState::Committed { source: 0 },
            Message::Float,
            &activity(&[false, false], false),
        );
        assert_eq!(state, SwitchState::Committed { source: 0 });
        assert_eq!(effect, Effect::Hold);
    }

    #[test]
    fn full_float_releases() {
        let (state, effect) = transition(
            SwitchState::Committed { source: 1 },
            Message::Float,
            &activity(&[false, false], true),
        );
        assert_eq!(state, SwitchState::Listening);
        assert_eq!(effect, Effect::Release(1));
    }

    #[test]
    fn failed_is_terminal() {
        for message in [Message::Assert, Message::Float] {
            let (state, effect) =
                transition(SwitchState::Failed, message, &activity(&[true], false));
            assert_eq!(state, SwitchState::Failed);
            assert_eq!(effect, Effect::Hold);
        }
    }
}
