/*!
Static brand → model catalogue.

Each brand module exports its descriptors and a [`Brand`] table; [`BRANDS`]
lists them all. Lookups never allocate and the catalogue is never mutated.
*/

use tracing::warn;

use crate::error::{HvacError, Result};
use crate::protocol::ProtocolDescriptor;

pub mod daikin;
pub mod delegated;
pub mod lg;
pub mod panasonic;
pub mod sharp;

/// Models known for one brand
#[derive(Debug)]
pub struct Brand {
    /// Lookup key, lower case
    pub name: &'static str,
    /// Used when a requested model is not listed
    pub fallback: &'static ProtocolDescriptor,
    pub models: &'static [(&'static str, &'static ProtocolDescriptor)],
}

impl Brand {
    /// Descriptor of a model (case-insensitive).
    ///
    /// Unknown models fall back to the brand's generic descriptor.
    pub fn descriptor(&self, model: &str) -> &'static ProtocolDescriptor {
        match self.find(model) {
            Some(descriptor) => descriptor,
            None => {
                warn!(
                    "Unknown {} model '{}', using {}",
                    self.name,
                    model,
                    self.fallback.name()
                );
                self.fallback
            }
        }
    }

    /// Descriptor of a listed model, without fallback
    pub fn find(&self, model: &str) -> Option<&'static ProtocolDescriptor> {
        self.models
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(model))
            .map(|(_, descriptor)| *descriptor)
    }

    pub fn model_names(&self) -> impl Iterator<Item = &'static str> {
        let models: &'static [(&'static str, &'static ProtocolDescriptor)] = self.models;
        models.iter().map(|(name, _)| *name)
    }
}

/// Every brand in the catalogue
pub static BRANDS: &[&Brand] = &[
    &daikin::BRAND,
    &panasonic::BRAND,
    &sharp::BRAND,
    &lg::BRAND,
    &delegated::MITSUBISHI_BRAND,
    &delegated::SAMSUNG_BRAND,
    &delegated::HITACHI_BRAND,
];

/// Find a brand by name (case-insensitive)
pub fn brand(name: &str) -> Result<&'static Brand> {
    BRANDS
        .iter()
        .copied()
        .find(|b| b.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| HvacError::unknown_brand(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Domain, Feature, Value};
    use crate::frame::{Composer, FrameContext};
    use crate::protocol::Encoding;
    use crate::state::{apply, CommandState, Delta};

    fn samples(domain: &Domain) -> Vec<Value> {
        match domain {
            Domain::Choices(choices) => choices.iter().map(|c| Value::Choice(*c)).collect(),
            Domain::Range { min, max } => vec![Value::Number(*min), Value::Number(*max)],
        }
    }

    #[test]
    fn test_brand_lookup() {
        assert_eq!(brand("Daikin").unwrap().name, "daikin");
        assert_eq!(brand("LG").unwrap().name, "lg");
        assert!(matches!(brand("fujitsu"), Err(HvacError::UnknownBrand(ref n)) if n == "fujitsu"));
    }

    #[test]
    fn test_model_lookup_and_fallback() {
        let daikin = brand("daikin").unwrap();
        assert_eq!(daikin.descriptor("Smash 2").model, "Smash 2");
        assert_eq!(daikin.descriptor("no such unit").model, "Generic");
        assert!(daikin.find("no such unit").is_none());
    }

    #[test]
    fn test_catalogue_is_consistent() {
        for brand in BRANDS {
            assert!(!brand.models.is_empty());
            assert_eq!(brand.name, brand.name.to_lowercase());
            for (_, descriptor) in brand.models {
                let caps = descriptor.capabilities;
                assert!(caps.contains(Feature::Mode), "{}", descriptor.name());
                assert!(caps.contains(Feature::Temperature), "{}", descriptor.name());
                if let Encoding::Composed(layout) = &descriptor.encoding {
                    let last = layout.encoders.last().map(|(f, _)| *f);
                    assert_eq!(last, Some(Feature::Mode), "{}", descriptor.name());
                }
            }
        }
    }

    #[test]
    fn test_composed_frames_keep_their_length() {
        for brand in BRANDS {
            for (model, descriptor) in brand.models {
                let Encoding::Composed(layout) = &descriptor.encoding else {
                    continue;
                };
                let caps = descriptor.capabilities;
                let initial = CommandState::new(caps, descriptor.defaults).status().clone();
                let modes = caps.domain(Feature::Mode).map(samples).unwrap_or_default();

                for previous_mode in &modes {
                    let mut previous = initial.clone();
                    previous.insert(Feature::Mode, *previous_mode);

                    for mode in &modes {
                        for (feature, domain) in caps.iter() {
                            for value in samples(domain) {
                                let mut requested = Delta::new();
                                requested.insert(Feature::Mode, *mode);
                                requested.insert(feature, value);
                                let current = apply(&previous, &requested);
                                let ctx = FrameContext::new(&previous, &requested, &current);
                                let case = format!("{} {} {}->{} {}={}", brand.name, model, previous_mode, mode, feature, value);

                                let main = Composer::new(layout, ctx).overlay();
                                assert_eq!(main.len(), layout.template.len(), "{}", case);
                                let main = layout.checksum.append(main);
                                assert_eq!(main.len(), layout.frame_len(), "{}", case);

                                let frames = layout.compose(&ctx);
                                assert!(frames.iter().any(|f| f.bytes() == main.as_slice()), "{}", case);
                                for frame in &frames {
                                    let split = frame.len() - layout.checksum.width();
                                    let (payload, trailer) = frame.bytes().split_at(split);
                                    assert_eq!(trailer, layout.checksum.compute(payload).as_slice(), "{}", case);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
