/*!
Bit order normalisation.

Frames are composed as byte values and the pulse encoder always walks each
byte from bit 7 down to bit 0. Protocols that put the least significant bit
on the air first have every byte reflected once composition, checksum
included, is finished.
*/

use serde::Serialize;

use crate::frame::Frame;

/// Order in which a protocol transmits the bits of each byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BitOrder {
    /// Bytes go out as composed
    #[default]
    MsbFirst,
    /// Every byte is reflected before transmission
    LsbFirst,
}

/// Reverse the bit order of one byte (bit 7 ↔ bit 0, 6 ↔ 1, ...)
#[inline]
pub fn reflect(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Put a frame in transmission bit order
pub fn normalize(frame: Frame, order: BitOrder) -> Frame {
    match order {
        BitOrder::MsbFirst => frame,
        BitOrder::LsbFirst => Frame::new(frame.bytes().iter().map(|b| reflect(*b)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        assert_eq!(reflect(0x01), 0x80);
        assert_eq!(reflect(0x2c), 0x34);
        assert_eq!(reflect(0xaa), 0x55);
        assert_eq!(reflect(reflect(0x5b)), 0x5b);
    }

    #[test]
    fn test_normalize_lsb_first() {
        let frame = Frame::new(vec![0xaa, 0x5a, 0xcf, 0x10]);
        let normalized = normalize(frame, BitOrder::LsbFirst);
        assert_eq!(normalized.bytes(), &[0x55, 0x5a, 0xf3, 0x08]);
    }

    #[test]
    fn test_normalize_msb_first_is_identity() {
        let frame = Frame::new(vec![0x88, 0x5b, 0xe4]);
        assert_eq!(normalize(frame.clone(), BitOrder::MsbFirst), frame);
    }
}
