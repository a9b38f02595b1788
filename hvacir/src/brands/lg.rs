/*!
LG remotes.

Three byte commands plus a nibble checksum of which only the high nibble is
transmitted (28 bits on the air). The state command is sent when mode,
temperature or fan change; every other setting is its own one-shot command.
*/

use crate::bits::BitOrder;
use crate::capability::{Capabilities, Domain, Feature, Value, TOGGLE};
use crate::checksum::Checksum;
use crate::frame::{Composer, Contribution, FrameContext, FrameLayout, MainFrame};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::TimingProfile;

use super::{delegated, Brand};

const LEN: usize = 3;

const AUTO_BIAS: [&str; 5] = ["-2", "-1", "default", "+1", "+2"];

/// Features carried by the state command
const STATE_FEATURES: [Feature; 4] = [Feature::Mode, Feature::Temperature, Feature::AutoBias, Feature::Fan];

pub const TIMING: TimingProfile = TimingProfile::bits(&[520], &[520, 1530])
    .start(&[3100, 9850])
    .end(&[520, 12000])
    .drop_bits(4);

fn temperature(ctx: &FrameContext<'_>) -> Contribution {
    let degrees = match ctx.mode() {
        "fan" => 18,
        "dry" => 24,
        "auto" => match ctx.choice(Feature::AutoBias) {
            Some(bias) => 15 + AUTO_BIAS.iter().position(|b| *b == bias).unwrap_or(2) as i32,
            None => 17,
        },
        _ => ctx.number(Feature::Temperature).unwrap_or(25),
    };
    Contribution::or(LEN).with(2, (((degrees - 15) & 0x0f) << 4) as u8)
}

fn fan(ctx: &FrameContext<'_>) -> Contribution {
    let speed = match ctx.mode() {
        "auto" => "auto",
        _ => ctx.choice(Feature::Fan).unwrap_or("auto"),
    };
    let bits = match speed {
        "lowest" => 0x00,
        "low" => 0x09,
        "medium" => 0x02,
        "high" => 0x0a,
        "highest" => 0x04,
        _ => 0x05,
    };
    Contribution::or(LEN).with(2, bits)
}

fn mode(ctx: &FrameContext<'_>) -> Contribution {
    let running = if ctx.previous_mode() == "off" { 0 } else { 8 };
    let code = match ctx.mode() {
        "off" => return Contribution::replace(LEN).with(1, 0xc0).with(2, 0x05),
        "auto" => 3,
        "dry" => 1,
        "fan" => 2,
        _ => 0,
    };
    Contribution::or(LEN).with(1, code + running)
}

fn swing_command(choice: &str) -> Option<u8> {
    match choice {
        "swing" | "on" => Some(0x14),
        "off" => Some(0x15),
        "0°" => Some(0x04),
        "30°" => Some(0x05),
        "45°" => Some(0x06),
        "60°" => Some(0x07),
        "90°" => Some(0x08),
        "ceiling" => Some(0x09),
        _ => None,
    }
}

fn hswing_command(choice: &str) -> Option<u8> {
    match choice {
        "swing" | "on" => Some(0x16),
        "off" => Some(0x17),
        "left" => Some(0x0b),
        "centre left" => Some(0x0c),
        "centre" => Some(0x0d),
        "centre right" => Some(0x0e),
        "right" => Some(0x0f),
        "swing left" => Some(0x10),
        "swing right" => Some(0x11),
        _ => None,
    }
}

fn economy_command(choice: &str) -> Option<u8> {
    match choice {
        "off" => Some(0x7f),
        "80" => Some(0x7d),
        "60" => Some(0x7e),
        "40" => Some(0x80),
        _ => None,
    }
}

/// One command per requested setting outside the state command
fn one_shot_frames(composer: &Composer<'_>) -> Vec<Vec<u8>> {
    let ctx = composer.context();
    if ctx.is_off() {
        return Vec::new();
    }

    let mut frames = Vec::new();
    if let Some(v) = ctx.requested(Feature::Swing).and_then(|v| v.as_choice()) {
        frames.extend(swing_command(v).map(|b| vec![0x88, 0x13, b]));
    }
    if let Some(v) = ctx.requested(Feature::HSwing).and_then(|v| v.as_choice()) {
        frames.extend(hswing_command(v).map(|b| vec![0x88, 0x13, b]));
    }
    if let Some(v) = ctx.requested(Feature::Powerful) {
        if v.is_on() {
            frames.push(vec![0x88, 0x10, 0x08]);
        } else if !STATE_FEATURES.iter().any(|f| ctx.is_requested(*f)) {
            // leaving jet mode: resend the state
            frames.push(composer.overlay());
        }
    }
    if let Some(v) = ctx.requested(Feature::Purifier) {
        frames.push(vec![0x88, 0xc0, if v.is_on() { 0x00 } else { 0x08 }]);
    }
    if let Some(v) = ctx.requested(Feature::Cleaning) {
        frames.push(vec![0x88, 0xc0, if v.is_on() { 0x0c } else { 0x0b }]);
    }
    if let Some(v) = ctx.requested(Feature::Economy).and_then(|v| v.as_choice()) {
        frames.extend(economy_command(v).map(|b| vec![0x88, 0xc0, b]));
    }
    if ctx.requested(Feature::Diagnostic).is_some_and(|v| v.is_on()) {
        frames.push(vec![0x88, 0xc0, 0xce]);
    }
    frames
}

pub const LAYOUT: FrameLayout = FrameLayout {
    template: &[0x88, 0x00, 0x00],
    encoders: &[(Feature::Temperature, temperature), (Feature::Fan, fan), (Feature::Mode, mode)],
    leading: &[],
    trailing: &[one_shot_frames],
    main_frame: MainFrame::OnRequest(&[Feature::Mode, Feature::Temperature, Feature::Fan]),
    checksum: Checksum::NibbleSum,
};

const ECONOMY_LEVELS: Domain = Domain::Choices(&["off", "80", "60", "40"]);
const FAN_SPEEDS: Domain = Domain::Choices(&["auto", "highest", "high", "medium", "low", "lowest"]);

static GENERIC_CAPS: [(Feature, Domain); 2] = [
    (Feature::Mode, Domain::Choices(&["off", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 18, max: 29 }),
];

static INVERTER_V_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 29 }),
    (Feature::AutoBias, Domain::Choices(&AUTO_BIAS)),
    (Feature::Fan, FAN_SPEEDS),
    (Feature::Swing, Domain::Choices(&["off", "swing", "90°", "0°"])),
    (Feature::Powerful, TOGGLE),
    (Feature::Cleaning, TOGGLE),
    (Feature::Economy, ECONOMY_LEVELS),
];

static DUAL_INVERTER_CAPS: [(Feature, Domain); 11] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 29 }),
    (Feature::AutoBias, Domain::Choices(&AUTO_BIAS)),
    (Feature::Fan, FAN_SPEEDS),
    (
        Feature::Swing,
        Domain::Choices(&["off", "swing", "ceiling", "90°", "60°", "45°", "30°", "0°"]),
    ),
    (
        Feature::HSwing,
        Domain::Choices(&[
            "off",
            "swing",
            "left",
            "centre left",
            "centre",
            "centre right",
            "right",
            "swing left",
            "swing right",
        ]),
    ),
    (Feature::Powerful, TOGGLE),
    (Feature::Purifier, TOGGLE),
    (Feature::Cleaning, TOGGLE),
    (Feature::Economy, ECONOMY_LEVELS),
    (Feature::Diagnostic, TOGGLE),
];

const INVERTER_DEFAULTS: &[(Feature, Value)] = &[
    (Feature::Mode, Value::Choice("off")),
    (Feature::Temperature, Value::Number(25)),
    (Feature::AutoBias, Value::Choice("default")),
    (Feature::Fan, Value::Choice("auto")),
];

pub static GENERIC: ProtocolDescriptor = ProtocolDescriptor {
    brand: "LG",
    model: "Generic",
    capabilities: Capabilities::new(&GENERIC_CAPS),
    defaults: &[(Feature::Mode, Value::Choice("off")), (Feature::Temperature, Value::Number(25))],
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static INVERTER_V: ProtocolDescriptor = ProtocolDescriptor {
    brand: "LG",
    model: "Inverter V",
    capabilities: Capabilities::new(&INVERTER_V_CAPS),
    defaults: INVERTER_DEFAULTS,
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static DUAL_INVERTER: ProtocolDescriptor = ProtocolDescriptor {
    brand: "LG",
    model: "Dual Inverter",
    capabilities: Capabilities::new(&DUAL_INVERTER_CAPS),
    defaults: INVERTER_DEFAULTS,
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static BRAND: Brand = Brand {
    name: "lg",
    fallback: &GENERIC,
    models: &[
        ("generic", &GENERIC),
        ("inverter v", &INVERTER_V),
        ("dual inverter", &DUAL_INVERTER),
        ("6711A20083V remote", &delegated::LG_V2),
        ("TS-H122ERM1 remote", &delegated::LG_V2),
        ("GE6711AR2853M remote", &delegated::LG_V1),
    ],
};
