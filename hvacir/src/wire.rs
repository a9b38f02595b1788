/*!
Wire representations of a duration list.

- LIRC: the durations themselves, read as alternating pulse/space values
- Broadlink compact packet: durations quantised to the blaster's tick and
  framed with a small header and trailer
*/

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::warn;

/// Broadlink IR packet type byte
pub const IR_PACKET_TYPE: u8 = 0x26;
/// Repeat count written after the type byte
pub const REPEAT_COUNT: u8 = 0x00;
/// Trailer closing the pulse body
pub const PACKET_TRAILER: [u8; 2] = [0x0d, 0x05];
/// Ticks are `µs * TICK_NUM / TICK_DEN`
pub const TICK_NUM: u64 = 269;
pub const TICK_DEN: u64 = 8192;
/// Marker preceding a big-endian 16-bit tick count
pub const LONG_TICK_MARKER: u8 = 0x00;

/// Durations in LIRC pulse/space order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lirc(Vec<u32>);

impl Lirc {
    pub fn durations(&self) -> &[u32] {
        &self.0
    }

    /// `(pulse, space)` pairs; a trailing odd pulse is not yielded
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl fmt::Display for Lirc {
    /// Six values per line, tab separated
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.0.chunks(6).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let mut first = true;
            for value in line {
                if !first {
                    f.write_str("\t")?;
                }
                write!(f, "{}", value)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Relabel durations as LIRC pulse/space values
pub fn to_lirc(durations: &[u32]) -> Lirc {
    Lirc(durations.to_vec())
}

/// Quantise a duration to Broadlink ticks, rounding half to even
pub fn to_ticks(micros: u32) -> u32 {
    let scaled = u64::from(micros) * TICK_NUM;
    let quotient = scaled / TICK_DEN;
    let remainder = scaled % TICK_DEN;
    let half = TICK_DEN / 2;
    let round_up = remainder > half || (remainder == half && quotient % 2 == 1);
    let ticks = if round_up { quotient + 1 } else { quotient };
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

/// Build a Broadlink compact packet from durations.
///
/// The format has no room for more than 65535 ticks in one duration (about
/// two seconds) or 65535 body bytes; larger values saturate and are logged.
pub fn to_compact_packet(durations: &[u32]) -> Bytes {
    let mut body = BytesMut::with_capacity(durations.len());
    for micros in durations {
        let ticks = to_ticks(*micros);
        if ticks < 256 {
            body.put_u8(ticks as u8);
        } else {
            let long = u16::try_from(ticks).unwrap_or_else(|_| {
                warn!("{} µs is {} ticks, capped at {}", micros, ticks, u16::MAX);
                u16::MAX
            });
            body.put_u8(LONG_TICK_MARKER);
            body.put_u16(long);
        }
    }

    let body_len = u16::try_from(body.len()).unwrap_or_else(|_| {
        warn!("Packet body of {} bytes, declared length capped at {}", body.len(), u16::MAX);
        u16::MAX
    });
    let mut packet = BytesMut::with_capacity(body.len() + 20);
    packet.put_u8(IR_PACKET_TYPE);
    packet.put_u8(REPEAT_COUNT);
    packet.put_u16_le(body_len);
    packet.put(body);
    packet.put_slice(&PACKET_TRAILER);

    let padding = (16 - (packet.len() + 4) % 16) % 16;
    packet.put_bytes(0, padding);
    packet.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks() {
        assert_eq!(to_ticks(0), 0);
        assert_eq!(to_ticks(435), 14);
        assert_eq!(to_ticks(3500), 115);
        assert_eq!(to_ticks(10000), 328);
        assert_eq!(to_ticks(8192), 269);
    }

    #[test]
    fn test_ticks_round_half_to_even() {
        assert_eq!(to_ticks(4096), 134);
        assert_eq!(to_ticks(12288), 404);
    }

    #[test]
    fn test_compact_packet() {
        let packet = to_compact_packet(&[3500, 1750, 435, 1300]);
        assert_eq!(hex::encode(&packet), "2600040073390e2b0d050000");
    }

    #[test]
    fn test_long_tick_uses_three_bytes() {
        let packet = to_compact_packet(&[8192]);
        assert_eq!(hex::encode(&packet), "2600030000010d0d05000000");
    }

    #[test]
    fn test_oversized_tick_saturates() {
        let packet = to_compact_packet(&[3_000_000]);
        assert_eq!(&packet[..7], &[0x26, 0x00, 0x03, 0x00, 0x00, 0xff, 0xff]);
        assert_eq!(&packet[7..9], &PACKET_TRAILER);
    }

    #[test]
    fn test_single_zero_duration() {
        let packet = to_compact_packet(&[0]);
        assert_eq!(packet.len(), 12);
        assert_eq!(&packet[..7], &[0x26, 0x00, 0x01, 0x00, 0x00, 0x0d, 0x05]);
    }

    #[test]
    fn test_empty_durations() {
        let packet = to_compact_packet(&[]);
        assert_eq!(&packet[..], &[0x26, 0x00, 0x00, 0x00, 0x0d, 0x05, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_padding_and_declared_length() {
        for n in 0..40u32 {
            let durations: Vec<u32> = (0..n).map(|i| 300 + i * 700).collect();
            let packet = to_compact_packet(&durations);
            assert_eq!((packet.len() + 4) % 16, 0);
            let declared = u16::from_le_bytes([packet[2], packet[3]]) as usize;
            assert_eq!(&packet[4 + declared..6 + declared], &PACKET_TRAILER);
        }
    }

    #[test]
    fn test_lirc_pairs_and_display() {
        let lirc = to_lirc(&[3500, 1750, 435, 1300, 435, 435, 435, 10000]);
        assert_eq!(lirc.len(), 8);
        assert_eq!(lirc.pairs().next(), Some((3500, 1750)));
        assert_eq!(lirc.pairs().count(), 4);
        assert_eq!(lirc.to_string(), "3500\t1750\t435\t1300\t435\t435\n435\t10000");
    }
}
