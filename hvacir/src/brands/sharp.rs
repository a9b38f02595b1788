/*!
Sharp remotes.

12 byte frames, transmitted LSB first, XOR-folded checksum. The state frame
is only sent when one of its own settings changes; "super jet" (powerful)
and economy are toggled by extra frames that carry the state without the
mode transition.
*/

use crate::bits::BitOrder;
use crate::capability::{Capabilities, Domain, Feature, Value, TOGGLE};
use crate::checksum::Checksum;
use crate::frame::{Composer, Contribution, FrameContext, FrameLayout, MainFrame};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::TimingProfile;

use super::{delegated, Brand};

const LEN: usize = 12;

/// Order of the mode field, byte 6 low nibble
const MODE_INDEX: [&str; 4] = ["auto", "heat", "cool", "dry"];
const FAN_RANK: [&str; 6] = ["auto", "low", "lowest", "medium", "high", "highest"];
const SWING_RANK: [&str; 7] = ["auto", "ceiling", "90°", "60°", "45°", "30°", "swing"];

pub const TIMING: TimingProfile = TimingProfile::bits(&[435], &[435, 1400])
    .start(&[3800, 1900])
    .end(&[435, 10000]);

fn mode_index(mode: &str) -> u8 {
    MODE_INDEX.iter().position(|m| *m == mode).unwrap_or(2) as u8
}

/// Only sent in cool mode
fn temperature(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::replace(LEN);
    if ctx.mode() != "cool" {
        return c;
    }
    match ctx.number(Feature::Temperature) {
        Some(t) if t < 16 => c.with(4, (t + 0x3e) as u8),
        Some(t) => c.with(4, (0xc0 + (t - 15)) as u8),
        None => c,
    }
}

/// Dry runs the fan on auto, including the frame that leaves dry
fn fan(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::or(LEN);
    let Some(speed) = ctx.choice(Feature::Fan) else {
        return c;
    };
    let dry = ctx.mode() == "dry" || ctx.previous_mode() == "dry";
    let speed = if dry { "auto" } else { speed };
    let rank = FAN_RANK.iter().position(|s| *s == speed).unwrap_or(0) as u8;
    c.with(6, (rank + 2) << 4)
}

fn swing(ctx: &FrameContext<'_>) -> Contribution {
    let vertical = ctx.choice(Feature::Swing).unwrap_or("auto");
    let vertical = SWING_RANK.iter().position(|s| *s == vertical).unwrap_or(0) as u8;
    let horizontal = match ctx.choice(Feature::HSwing) {
        Some("middle") => 0x1,
        Some("left") => 0x2,
        Some("right") => 0x3,
        Some("swing") => 0xe,
        _ => 0x0,
    };
    Contribution::or(LEN).with(8, (horizontal << 4) + 8 + vertical)
}

fn purifier(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::or(LEN);
    match ctx.value(Feature::Purifier) {
        Some(v) if v.is_on() => c.with_bits(11, 0x04),
        _ => c,
    }
}

/// State frames carry the economy setting already in force
fn economy(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::or(LEN);
    match ctx.previous(Feature::Economy) {
        Some(v) if v.is_on() => c.with_bits(11, 0x10),
        _ => c,
    }
}

fn mode(ctx: &FrameContext<'_>) -> Contribution {
    let (current, previous) = (ctx.mode(), ctx.previous_mode());
    let (b5, shown) = if current == previous {
        (0x31, if current == "off" { "cool" } else { current })
    } else if current == "off" {
        (0x21, previous)
    } else if previous == "off" {
        (0x11, current)
    } else {
        (0x31, current)
    };
    Contribution::or(LEN).with(5, b5).with(6, mode_index(shown))
}

/// Powerful and economy toggles, one frame each
fn option_frames(composer: &Composer<'_>) -> Vec<Vec<u8>> {
    let ctx = composer.context();
    if ctx.is_off() {
        return Vec::new();
    }

    let mut frames = Vec::new();
    for feature in [Feature::Powerful, Feature::Economy] {
        let Some(value) = ctx.requested(feature) else {
            continue;
        };
        let mut frame = composer.overlay_without_mode();
        frame[5] |= if value.is_on() { 0x61 } else { 0x71 };
        frame[6] |= mode_index(ctx.mode());
        match feature {
            Feature::Powerful => frame[10] |= 0x01,
            _ if value.is_on() => frame[11] |= 0x10,
            _ => {}
        }
        frames.push(frame);
    }
    frames
}

pub const LAYOUT: FrameLayout = FrameLayout {
    template: &[0xaa, 0x5a, 0xcf, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0xe0],
    encoders: &[
        (Feature::Temperature, temperature),
        (Feature::Fan, fan),
        (Feature::Swing, swing),
        (Feature::Purifier, purifier),
        (Feature::Economy, economy),
        (Feature::Mode, mode),
    ],
    leading: &[],
    trailing: &[option_frames],
    main_frame: MainFrame::OnRequest(&[
        Feature::Mode,
        Feature::Temperature,
        Feature::Fan,
        Feature::Swing,
        Feature::HSwing,
        Feature::Purifier,
    ]),
    checksum: Checksum::XorFold { k: 0x01 },
};

static GENERIC_CAPS: [(Feature, Domain); 2] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "dry"])),
    (Feature::Temperature, Domain::Range { min: 18, max: 37 }),
];

static JTECH_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "dry"])),
    (Feature::Temperature, Domain::Range { min: 14, max: 29 }),
    (Feature::Fan, Domain::Choices(&["auto", "highest", "medium", "low", "lowest"])),
    (Feature::Swing, Domain::Choices(&SWING_RANK)),
    (Feature::HSwing, Domain::Choices(&["left", "middle", "right", "swing"])),
    (Feature::Purifier, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Economy, TOGGLE),
];

pub static GENERIC: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Sharp",
    model: "Generic",
    capabilities: Capabilities::new(&GENERIC_CAPS),
    defaults: &[(Feature::Mode, Value::Choice("cool")), (Feature::Temperature, Value::Number(25))],
    timing: TIMING,
    bit_order: BitOrder::LsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static JTECH: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Sharp",
    model: "FTM-PV2S",
    capabilities: Capabilities::new(&JTECH_CAPS),
    defaults: &[
        (Feature::Mode, Value::Choice("off")),
        (Feature::Temperature, Value::Number(25)),
        (Feature::Fan, Value::Choice("auto")),
        (Feature::Swing, Value::Choice("auto")),
        (Feature::HSwing, Value::Choice("middle")),
    ],
    timing: TIMING,
    bit_order: BitOrder::LsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static BRAND: Brand = Brand {
    name: "sharp",
    fallback: &GENERIC,
    models: &[
        ("generic", &GENERIC),
        ("j-tech", &JTECH),
        ("AH-AxSAY", &delegated::SHARP_A907),
        ("CRMC-A907 JBEZ remote", &delegated::SHARP_A907),
        ("AH-XP10NRY", &delegated::SHARP_A903),
        ("CRMC-A903JBEZ remote", &delegated::SHARP_A903),
        ("CRMC-A705 JBEZ remote", &delegated::SHARP_A705),
        ("generic A907", &delegated::SHARP_A907),
        ("generic A903", &delegated::SHARP_A903),
        ("generic A705", &delegated::SHARP_A705),
    ],
};
