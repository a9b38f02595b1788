/*!
Frame composition.

A composed protocol is described by a [`FrameLayout`]: a fixed byte template,
an ordered list of per-feature encoders, optional producers of auxiliary
frames, and a checksum strategy. Each encoder returns a same-length mask
tagged with how it combines with the bytes accumulated so far:

- [`Composition::OrMerge`] - `out |= mask`, for features that only set bits
- [`Composition::ReplaceIfSet`] - non-zero mask bytes overwrite `out`

Mode is always the last encoder of a layout because its encoding may depend
on, and override, what the other features wrote.
*/

use serde::Serialize;
use std::fmt;

use crate::capability::{Feature, Value, OFF};
use crate::checksum::Checksum;
use crate::state::{Delta, Status};

/// One complete, checksummed command payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for byte in &self.bytes {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
            first = false;
        }
        Ok(())
    }
}

/// How a contribution combines with the working buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    OrMerge,
    ReplaceIfSet,
}

/// Mask produced by one feature encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub mask: Vec<u8>,
    pub rule: Composition,
}

impl Contribution {
    /// All-zero OR mask of the given length
    pub fn or(len: usize) -> Self {
        Self {
            mask: vec![0; len],
            rule: Composition::OrMerge,
        }
    }

    /// All-zero replace mask of the given length
    pub fn replace(len: usize) -> Self {
        Self {
            mask: vec![0; len],
            rule: Composition::ReplaceIfSet,
        }
    }

    /// Set one mask byte
    pub fn with(mut self, index: usize, byte: u8) -> Self {
        self.mask[index] = byte;
        self
    }

    /// OR bits into one mask byte
    pub fn with_bits(mut self, index: usize, bits: u8) -> Self {
        self.mask[index] |= bits;
        self
    }

    /// Combine into the working buffer according to the rule
    pub fn apply_to(&self, buffer: &mut [u8]) {
        for (out, mask) in buffer.iter_mut().zip(&self.mask) {
            match self.rule {
                Composition::OrMerge => *out |= mask,
                Composition::ReplaceIfSet => {
                    if *mask != 0 {
                        *out = *mask;
                    }
                }
            }
        }
    }
}

/// Read-only view of one render: status before it, what it requested, and
/// the merged result.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    previous: &'a Status,
    requested: &'a Delta,
    current: &'a Status,
}

impl<'a> FrameContext<'a> {
    pub fn new(previous: &'a Status, requested: &'a Delta, current: &'a Status) -> Self {
        Self {
            previous,
            requested,
            current,
        }
    }

    /// Merged value, `None` when the device lacks the feature
    pub fn value(&self, feature: Feature) -> Option<Value> {
        self.current.get(&feature).copied()
    }

    /// Value confirmed before this render
    pub fn previous(&self, feature: Feature) -> Option<Value> {
        self.previous.get(&feature).copied()
    }

    /// Value requested by this render
    pub fn requested(&self, feature: Feature) -> Option<Value> {
        self.requested.get(&feature).copied()
    }

    pub fn is_requested(&self, feature: Feature) -> bool {
        self.requested.contains_key(&feature)
    }

    pub fn choice(&self, feature: Feature) -> Option<&'static str> {
        self.value(feature).and_then(|v| v.as_choice())
    }

    pub fn number(&self, feature: Feature) -> Option<i32> {
        self.value(feature).and_then(|v| v.as_number())
    }

    /// Merged mode
    pub fn mode(&self) -> &'static str {
        self.choice(Feature::Mode).unwrap_or(OFF)
    }

    /// Mode confirmed before this render
    pub fn previous_mode(&self) -> &'static str {
        self.previous(Feature::Mode)
            .and_then(|v| v.as_choice())
            .unwrap_or(OFF)
    }

    pub fn is_off(&self) -> bool {
        self.mode() == OFF
    }

    pub fn requested_delta(&self) -> &'a Delta {
        self.requested
    }
}

/// Encoder of one feature's contribution
pub type FeatureEncoder = fn(&FrameContext<'_>) -> Contribution;

/// Producer of auxiliary frames (unchecksummed payloads)
pub type FrameProducer = fn(&Composer<'_>) -> Vec<Vec<u8>>;

/// When a layout emits its main frame
#[derive(Debug, Clone, Copy)]
pub enum MainFrame {
    Always,
    /// Only when one of these features is requested
    OnRequest(&'static [Feature]),
}

/// Byte layout of a composed protocol
#[derive(Clone, Copy)]
pub struct FrameLayout {
    pub template: &'static [u8],
    pub encoders: &'static [(Feature, FeatureEncoder)],
    pub leading: &'static [FrameProducer],
    pub trailing: &'static [FrameProducer],
    pub main_frame: MainFrame,
    pub checksum: Checksum,
}

impl FrameLayout {
    /// Length of every main frame once checksummed
    pub fn frame_len(&self) -> usize {
        self.template.len() + self.checksum.width()
    }

    /// Compose the frames of one render
    pub fn compose(&self, ctx: &FrameContext<'_>) -> Vec<Frame> {
        Composer { layout: self, ctx: *ctx }.compose()
    }
}

/// A layout bound to one render's context
pub struct Composer<'a> {
    layout: &'a FrameLayout,
    ctx: FrameContext<'a>,
}

impl<'a> Composer<'a> {
    pub fn new(layout: &'a FrameLayout, ctx: FrameContext<'a>) -> Self {
        Self { layout, ctx }
    }

    pub fn context(&self) -> &FrameContext<'a> {
        &self.ctx
    }

    pub fn template(&self) -> &'static [u8] {
        self.layout.template
    }

    /// Apply every encoder, in layout order, to the template
    pub fn overlay(&self) -> Vec<u8> {
        self.overlay_with(|_| true)
    }

    /// Apply every encoder except mode's
    pub fn overlay_without_mode(&self) -> Vec<u8> {
        self.overlay_with(|feature| feature != Feature::Mode)
    }

    fn overlay_with(&self, include: impl Fn(Feature) -> bool) -> Vec<u8> {
        let mut buffer = self.layout.template.to_vec();
        for (feature, encoder) in self.layout.encoders {
            if include(*feature) {
                encoder(&self.ctx).apply_to(&mut buffer);
            }
        }
        buffer
    }

    fn wants_main_frame(&self) -> bool {
        match self.layout.main_frame {
            MainFrame::Always => true,
            MainFrame::OnRequest(features) => features.iter().any(|f| self.ctx.is_requested(*f)),
        }
    }

    /// Leading frames, main frame, trailing frames; each checksummed
    pub fn compose(&self) -> Vec<Frame> {
        let mut payloads = Vec::new();
        for producer in self.layout.leading {
            payloads.extend(producer(self));
        }
        if self.wants_main_frame() {
            payloads.push(self.overlay());
        }
        for producer in self.layout.trailing {
            payloads.extend(producer(self));
        }

        payloads
            .into_iter()
            .map(|payload| Frame::new(self.layout.checksum.append(payload)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_fan(ctx: &FrameContext<'_>) -> Contribution {
        let c = Contribution::or(3);
        match ctx.choice(Feature::Fan) {
            Some("high") => c.with(2, 0x0a),
            _ => c.with(2, 0x05),
        }
    }

    fn set_mode(ctx: &FrameContext<'_>) -> Contribution {
        if ctx.is_off() {
            return Contribution::replace(3).with(1, 0xc0).with(2, 0x05);
        }
        Contribution::or(3).with(1, 0x08)
    }

    fn extra(composer: &Composer<'_>) -> Vec<Vec<u8>> {
        if composer.context().is_requested(Feature::Fan) {
            vec![vec![0x88, 0x13, 0x14]]
        } else {
            Vec::new()
        }
    }

    static LAYOUT: FrameLayout = FrameLayout {
        template: &[0x88, 0x00, 0x00],
        encoders: &[(Feature::Fan, set_fan), (Feature::Mode, set_mode)],
        leading: &[],
        trailing: &[extra],
        main_frame: MainFrame::Always,
        checksum: Checksum::NibbleSum,
    };

    fn status(mode: &'static str, fan: &'static str) -> Status {
        [(Feature::Mode, Value::Choice(mode)), (Feature::Fan, Value::Choice(fan))]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_or_merge_and_replace() {
        let mut buffer = vec![0x0c, 0x00, 0xf0];
        Contribution::or(3).with(0, 0x80).with(2, 0x0f).apply_to(&mut buffer);
        assert_eq!(buffer, vec![0x8c, 0x00, 0xff]);

        Contribution::replace(3).with(2, 0x01).apply_to(&mut buffer);
        assert_eq!(buffer, vec![0x8c, 0x00, 0x01]);
    }

    #[test]
    fn test_compose_main_and_trailing() {
        let previous = status("off", "auto");
        let current = status("cool", "high");
        let requested: Delta = [(Feature::Fan, Value::Choice("high"))].into_iter().collect();
        let ctx = FrameContext::new(&previous, &requested, &current);

        let frames = LAYOUT.compose(&ctx);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].bytes(), &[0x88, 0x08, 0x0a, 0x20]);
        assert_eq!(frames[0].len(), LAYOUT.frame_len());
        assert_eq!(frames[1].bytes()[..3], [0x88, 0x13, 0x14]);
    }

    #[test]
    fn test_replace_overrides_earlier_contributions() {
        let previous = status("cool", "high");
        let current = status("off", "high");
        let requested: Delta = [(Feature::Mode, Value::Choice("off"))].into_iter().collect();
        let ctx = FrameContext::new(&previous, &requested, &current);

        let frames = LAYOUT.compose(&ctx);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].bytes()[..3], [0x88, 0xc0, 0x05]);
        assert_eq!(ctx.previous_mode(), "cool");
    }

    #[test]
    fn test_frame_display() {
        assert_eq!(Frame::new(vec![0x88, 0x05, 0xa0]).to_string(), "88 05 a0");
    }
}
