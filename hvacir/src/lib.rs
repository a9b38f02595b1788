/*!
# HVAC Infrared Code Generation

This crate turns air-conditioner settings (mode, temperature, fan, swing and
the various auxiliary toggles) into the frames, pulse timings and blaster
packets an IR remote would emit.

## Core Types

- [`Capabilities`] - Static feature/domain declaration of a device
- [`CommandState`] - Confirmed status plus pending requests
- [`FrameLayout`] - Byte template and ordered feature contributions
- [`TimingProfile`] - Mark/space tables and frame markers
- [`ProtocolDescriptor`] - One catalogued remote, composed or delegated
- [`Device`] - A descriptor bound to its command state

## Modules

- [`capability`] - Features, values and legal domains
- [`state`] - Status/delta bookkeeping
- [`frame`] - Frame composition
- [`checksum`] - Checksum strategies
- [`bits`] - Bit order normalisation
- [`pulse`] - Mark/space pulse encoding
- [`wire`] - LIRC and Broadlink transcoders
- [`engine`] - Native protocol engine contract
- [`brands`] - The remote catalogue
*/

pub mod bits;
pub mod brands;
pub mod capability;
pub mod checksum;
pub mod device;
pub mod engine;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod pulse;
pub mod state;
pub mod wire;

// Re-export commonly used types
pub use bits::BitOrder;
pub use brands::{brand, Brand, BRANDS};
pub use capability::{Capabilities, Domain, Feature, Value};
pub use checksum::Checksum;
pub use device::{Device, Render};
pub use engine::{EngineOption, NativeEngine};
pub use error::{HvacError, Result};
pub use frame::{Composition, Contribution, Frame, FrameContext, FrameLayout};
pub use protocol::{Encoding, ProtocolDescriptor};
pub use pulse::TimingProfile;
pub use state::{CommandState, Delta, Status};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
