/*!
Pulse timing encoder.

Turns normalised frames into the flat list of mark/space durations (µs) an
emitter reproduces. Bits are walked from bit 7 down to bit 0 of every byte;
protocols that transmit LSB first have already been reflected by
[`crate::bits::normalize`].
*/

use serde::Serialize;

use crate::frame::Frame;

/// Pulse durations of one protocol, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingProfile {
    /// Sent once before the first frame
    pub lead: Option<&'static [u32]>,
    /// Sent before every frame
    pub start: Option<&'static [u32]>,
    /// Sent after every frame
    pub end: Option<&'static [u32]>,
    /// Sent once after the last frame
    pub tail: Option<&'static [u32]>,
    /// Mark per bit value; entry 0 for bit 0, last entry for bit 1
    pub mark: &'static [u32],
    /// Space per bit value; entry 0 for bit 0, last entry for bit 1
    pub space: &'static [u32],
    /// Trailing bits of every frame that are never transmitted
    pub drop_bits: u8,
}

impl TimingProfile {
    /// Profile with only bit timings; sections are added with the builders
    pub const fn bits(mark: &'static [u32], space: &'static [u32]) -> Self {
        Self {
            lead: None,
            start: None,
            end: None,
            tail: None,
            mark,
            space,
            drop_bits: 0,
        }
    }

    pub const fn lead(mut self, lead: &'static [u32]) -> Self {
        self.lead = Some(lead);
        self
    }

    pub const fn start(mut self, start: &'static [u32]) -> Self {
        self.start = Some(start);
        self
    }

    pub const fn end(mut self, end: &'static [u32]) -> Self {
        self.end = Some(end);
        self
    }

    pub const fn tail(mut self, tail: &'static [u32]) -> Self {
        self.tail = Some(tail);
        self
    }

    pub const fn drop_bits(mut self, drop_bits: u8) -> Self {
        self.drop_bits = drop_bits;
        self
    }

    fn mark_for(&self, bit: bool) -> u32 {
        pick(self.mark, bit)
    }

    fn space_for(&self, bit: bool) -> u32 {
        pick(self.space, bit)
    }

    /// Durations produced for a single frame of `len` bytes
    pub fn frame_durations(&self, len: usize) -> usize {
        let bits = (len * 8).saturating_sub(self.drop_bits as usize);
        section_len(self.start) + 2 * bits + section_len(self.end)
    }

    /// Total durations produced for the given frame lengths
    pub fn encoded_len(&self, frame_lens: &[usize]) -> usize {
        section_len(self.lead)
            + frame_lens.iter().map(|len| self.frame_durations(*len)).sum::<usize>()
            + section_len(self.tail)
    }
}

fn pick(table: &[u32], bit: bool) -> u32 {
    let entry = if bit { table.last() } else { table.first() };
    entry.copied().unwrap_or(0)
}

fn section_len(section: Option<&[u32]>) -> usize {
    section.map_or(0, |s| s.len())
}

/// Encode frames into a duration list
pub fn encode(frames: &[Frame], timing: &TimingProfile) -> Vec<u32> {
    let lens: Vec<usize> = frames.iter().map(Frame::len).collect();
    let mut durations = Vec::with_capacity(timing.encoded_len(&lens));

    if let Some(lead) = timing.lead {
        durations.extend_from_slice(lead);
    }

    for frame in frames {
        if let Some(start) = timing.start {
            durations.extend_from_slice(start);
        }

        let sent = (frame.len() * 8).saturating_sub(timing.drop_bits as usize);
        let bits = frame
            .bytes()
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
            .take(sent);
        for bit in bits {
            durations.push(timing.mark_for(bit));
            durations.push(timing.space_for(bit));
        }

        if let Some(end) = timing.end {
            durations.extend_from_slice(end);
        }
    }

    if let Some(tail) = timing.tail {
        durations.extend_from_slice(tail);
    }

    durations
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAIKIN: TimingProfile = TimingProfile::bits(&[435], &[435, 1300])
        .start(&[3500, 1750])
        .end(&[435, 10000]);

    #[test]
    fn test_encode_single_byte() {
        let frames = [Frame::new(vec![0xa0])];
        let durations = encode(&frames, &DAIKIN);
        assert_eq!(
            durations,
            vec![
                3500, 1750, 435, 1300, 435, 435, 435, 1300, 435, 435, 435, 435, 435, 435, 435,
                435, 435, 435, 435, 10000
            ]
        );
    }

    #[test]
    fn test_length_formula() {
        let frames = [Frame::new(vec![0x11; 8]), Frame::new(vec![0x22; 19])];
        let durations = encode(&frames, &DAIKIN);
        assert_eq!(durations.len(), 2 * (2 + 2) + 16 * (8 + 19));
        assert_eq!(durations.len(), DAIKIN.encoded_len(&[8, 19]));
        assert_eq!(durations.len() % 2, 0);
    }

    #[test]
    fn test_lead_and_tail() {
        let timing = TimingProfile::bits(&[586], &[436, 1432])
            .lead(&[690, 17844])
            .start(&[3086, 8864])
            .tail(&[2886, 97114]);
        let durations = encode(&[Frame::new(vec![0x80])], &timing);
        assert_eq!(&durations[..4], &[690, 17844, 3086, 8864]);
        assert_eq!(&durations[4..6], &[586, 1432]);
        assert_eq!(&durations[durations.len() - 2..], &[2886, 97114]);
        assert_eq!(durations.len(), 2 + 2 + 16 + 2);
    }

    #[test]
    fn test_dropped_bits() {
        let timing = TimingProfile::bits(&[520], &[520, 1530])
            .start(&[3100, 9850])
            .end(&[520, 12000])
            .drop_bits(4);
        let durations = encode(&[Frame::new(vec![0x88, 0x00, 0x85, 0xdf])], &timing);
        assert_eq!(durations.len(), 2 + 2 * 28 + 2);
        // last transmitted bits come from the high nibble of the checksum
        assert_eq!(&durations[durations.len() - 4..], &[520, 1530, 520, 12000]);
    }

    #[test]
    fn test_no_frames() {
        let durations = encode(&[], &DAIKIN);
        assert!(durations.is_empty());
    }
}
