/*!
Protocol descriptors.

Every supported remote is one `static` [`ProtocolDescriptor`]: what it can
do, where it starts, how its pulses are timed and how its frames are built.
*/

use std::fmt;

use crate::bits::BitOrder;
use crate::capability::{Capabilities, Feature, Value};
use crate::frame::FrameLayout;
use crate::pulse::TimingProfile;

/// How a protocol's frames are produced
#[derive(Clone, Copy)]
pub enum Encoding {
    /// Frames are composed from a byte layout
    Composed(FrameLayout),
    /// Frames come from the native protocol engine
    Delegated {
        protocol: &'static str,
        variant: Option<&'static str>,
    },
}

impl Encoding {
    pub fn is_delegated(&self) -> bool {
        matches!(self, Encoding::Delegated { .. })
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Composed(layout) => f
                .debug_struct("Composed")
                .field("template", &layout.template)
                .field("checksum", &layout.checksum)
                .finish(),
            Encoding::Delegated { protocol, variant } => f
                .debug_struct("Delegated")
                .field("protocol", protocol)
                .field("variant", variant)
                .finish(),
        }
    }
}

/// Static description of one remote model
#[derive(Debug, Clone, Copy)]
pub struct ProtocolDescriptor {
    pub brand: &'static str,
    pub model: &'static str,
    pub capabilities: Capabilities,
    pub defaults: &'static [(Feature, Value)],
    pub timing: TimingProfile,
    pub bit_order: BitOrder,
    pub encoding: Encoding,
}

impl ProtocolDescriptor {
    /// Display name, `brand model`
    pub fn name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}
