//! # Stock Devices
//!
//! The primitive operators every composed operator is built from:
//! - `Transform`: symmetric per-element map (element -> zero-or-one element)
//! - `Filter`: symmetric per-element predicate
//! - `FanOut`: one input wire echoed onto several output wires
//!
//! `Transform` and `Filter` straddle two wires and run toward whichever side
//! has no producer of its own. They never report errors; a stream arriving
//! on both sides at once is simply not theirs to resolve.

use super::{Action, Device, Probe};
use crate::store::AtomStore;
use crate::{Atom, HyperwireError, Message, Stream, WireId};

/// Route a message across a two-wire symmetric device.
fn symmetric<S: AtomStore>(
    probe: &Probe<'_, S>,
    (a, b): (WireId, WireId),
    wire: WireId,
    message: Message,
    apply: impl Fn(&Stream) -> Stream,
) -> Vec<Action> {
    let other = if wire == a {
        b
    } else if wire == b {
        a
    } else {
        return Vec::new();
    };

    match message {
        Message::Assert => {
            let Some(input) = probe.input(wire) else {
                return Vec::new();
            };
            if probe.input(other).is_some() {
                return Vec::new();
            }
            vec![Action::Emit {
                wire: other,
                stream: apply(input),
            }]
        }
        Message::Float => {
            if probe.drives(other) && probe.input(wire).is_none() {
                vec![Action::Float { wire: other }]
            } else {
                Vec::new()
            }
        }
    }
}

// =============================================================================
// TRANSFORM
// =============================================================================

/// Symmetric per-element map.
///
/// Elements for which the map returns `None` produce no output.
pub struct Transform {
    name: &'static str,
    ends: (WireId, WireId),
    map: Box<dyn Fn(&Atom) -> Option<Atom>>,
}

impl Transform {
    /// Create a transform between `a` and `b`.
    pub fn new(
        name: &'static str,
        a: WireId,
        b: WireId,
        map: impl Fn(&Atom) -> Option<Atom> + 'static,
    ) -> Self {
        Self {
            name,
            ends: (a, b),
            map: Box::new(map),
        }
    }
}

impl<S: AtomStore> Device<S> for Transform {
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(
        &mut self,
        probe: &Probe<'_, S>,
        wire: WireId,
        message: Message,
    ) -> Result<Vec<Action>, HyperwireError> {
        Ok(symmetric(probe, self.ends, wire, message, |stream| {
            stream.iter().filter_map(|atom| (self.map)(atom)).collect()
        }))
    }
}

// =============================================================================
// FILTER
// =============================================================================

/// Symmetric per-element predicate.
pub struct Filter {
    name: &'static str,
    ends: (WireId, WireId),
    keep: Box<dyn Fn(&Atom) -> bool>,
}

impl Filter {
    /// Create a filter between `a` and `b`.
    pub fn new(
        name: &'static str,
        a: WireId,
        b: WireId,
        keep: impl Fn(&Atom) -> bool + 'static,
    ) -> Self {
        Self {
            name,
            ends: (a, b),
            keep: Box::new(keep),
        }
    }
}

impl<S: AtomStore> Device<S> for Filter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(
        &mut self,
        probe: &Probe<'_, S>,
        wire: WireId,
        message: Message,
    ) -> Result<Vec<Action>, HyperwireError> {
        Ok(symmetric(probe, self.ends, wire, message, |stream| {
            stream
                .iter()
                .filter(|atom| (self.keep)(atom))
                .cloned()
                .collect()
        }))
    }
}

// =============================================================================
// FAN-OUT
// =============================================================================

/// Echoes the stream on `input` onto every output wire.
#[derive(Debug, Clone)]
pub struct FanOut {
    input: WireId,
    outputs: Vec<WireId>,
}

impl FanOut {
    /// Create a fan-out from `input` to `outputs`.
    #[must_use]
    pub fn new(input: WireId, outputs: Vec<WireId>) -> Self {
        Self { input, outputs }
    }
}

impl<S: AtomStore> Device<S> for FanOut {
    fn name(&self) -> &'static str {
        "fan-out"
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
        let actions = match (message, probe.input(self.input)) {
            (Message::Assert, Some(stream)) => self
                .outputs
                .iter()
                .map(|&out| Action::Emit {
                    wire: out,
                    stream: stream.clone(),
                })
                .collect(),
            (Message::Float, None) => self
                .outputs
                .iter()
                .filter(|&&out| probe.drives(out))
                .map(|&out| Action::Float { wire: out })
                .collect(),
            _ => Vec::new(),
        };
        Ok(actions)
    }
}

// =============================================================================
// TESTS
// =============================================================================
