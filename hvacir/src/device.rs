/*!
One remote bound to its command state.

A [`Device`] owns the status/delta pair of a single descriptor and runs a
render cycle end to end: consume the pending requests, produce frames
(composed here or delegated to the native engine), normalise their bit
order and encode pulse timing.
*/

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::bits::normalize;
use crate::capability::Feature;
use crate::engine::{render_with, NativeEngine};
use crate::error::{HvacError, Result};
use crate::frame::{Frame, FrameContext};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::encode;
use crate::state::{apply, CommandState, Delta, Status};
use crate::wire::{to_compact_packet, to_lirc, Lirc};

/// Output of one render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Render {
    /// Transmitted frames; empty for delegated protocols
    pub frames: Vec<Frame>,
    /// Mark/space durations in microseconds
    pub durations: Vec<u32>,
}

impl Render {
    pub fn lirc(&self) -> Lirc {
        to_lirc(&self.durations)
    }

    pub fn compact_packet(&self) -> Bytes {
        to_compact_packet(&self.durations)
    }

    /// True when nothing needs to be transmitted
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

/// A remote model with its current settings
#[derive(Debug, Clone)]
pub struct Device {
    descriptor: &'static ProtocolDescriptor,
    state: CommandState,
}

impl Device {
    pub fn new(descriptor: &'static ProtocolDescriptor) -> Self {
        Self {
            descriptor,
            state: CommandState::new(descriptor.capabilities, descriptor.defaults),
        }
    }

    pub fn descriptor(&self) -> &'static ProtocolDescriptor {
        self.descriptor
    }

    pub fn set(&mut self, feature: Feature, raw: &str) {
        self.state.set(feature, raw);
    }

    pub fn set_named(&mut self, name: &str, raw: &str) {
        self.state.set_named(name, raw);
    }

    pub fn set_temperature(&mut self, degrees: i32) {
        self.state.set_temperature(degrees);
    }

    pub fn status(&self) -> &Status {
        self.state.status()
    }

    pub fn pending(&self) -> &Delta {
        self.state.pending()
    }

    /// Confirmed status as JSON
    pub fn status_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.state.status())?)
    }

    /// Consume the pending requests and produce the command.
    ///
    /// Composed protocols ignore `engine`. Delegated protocols fail with
    /// [`HvacError::EngineUnavailable`] when it is `None`; on any error the
    /// pending requests are kept.
    pub fn render(&mut self, engine: Option<&mut dyn NativeEngine>) -> Result<Render> {
        let descriptor = self.descriptor;
        match &descriptor.encoding {
            Encoding::Composed(layout) => {
                let transition = self.state.apply();
                let ctx = FrameContext::new(&transition.previous, &transition.requested, self.state.status());
                let frames: Vec<Frame> = layout
                    .compose(&ctx)
                    .into_iter()
                    .map(|frame| normalize(frame, descriptor.bit_order))
                    .collect();
                let durations = encode(&frames, &descriptor.timing);
                debug!("{}: {} frames, {} durations", descriptor.name(), frames.len(), durations.len());
                Ok(Render { frames, durations })
            }
            Encoding::Delegated { protocol, variant } => {
                let engine = engine.ok_or_else(|| HvacError::EngineUnavailable(protocol.to_string()))?;
                let merged = apply(self.state.status(), self.state.pending());
                let durations = render_with(engine, protocol, *variant, &merged)?;
                self.state.apply();
                Ok(Render {
                    frames: Vec::new(),
                    durations,
                })
            }
        }
    }
}
