/*!
Panasonic remotes.

Every command is a fixed 7 byte header frame followed by the 18 byte state
frame. Economy and odour wash requests are separate header/command pairs
sent ahead of it.
*/

use crate::bits::{reflect, BitOrder};
use crate::capability::{Capabilities, Domain, Feature, Value, TOGGLE};
use crate::checksum::Checksum;
use crate::frame::{Composer, Contribution, FrameContext, FrameLayout, MainFrame};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::TimingProfile;

use super::{delegated, Brand};

const LEN: usize = 18;

const HEADER: [u8; 7] = [0x40, 0x04, 0x07, 0x20, 0x00, 0x00, 0x00];
const ODOUR_WASH: [u8; 7] = [0x40, 0x04, 0x07, 0x20, 0x01, 0xd9, 0x4c];
const ECONOMY: [u8; 7] = [0x40, 0x04, 0x07, 0x20, 0x01, 0xa1, 0xac];

const BASE_DEGREES: i32 = 16;
const FAN_DEGREES: i32 = 27;

pub const TIMING: TimingProfile = TimingProfile::bits(&[435], &[435, 1300])
    .start(&[3500, 1750])
    .end(&[435, 10000]);

fn temperature(ctx: &FrameContext<'_>) -> Contribution {
    let degrees = match ctx.mode() {
        "fan" => FAN_DEGREES,
        _ => ctx.number(Feature::Temperature).unwrap_or(FAN_DEGREES),
    };
    let code = 0x20 + ((degrees - BASE_DEGREES) << 1);
    Contribution::or(LEN).with(6, reflect(code as u8))
}

fn fan(ctx: &FrameContext<'_>) -> Contribution {
    let bits = match ctx.choice(Feature::Fan) {
        Some("auto") => 0x05,
        Some("highest") => 0x0e,
        Some("high") => 0x06,
        Some("medium") => 0x0a,
        Some("low") => 0x02,
        Some("lowest") => 0x0c,
        _ => 0x00,
    };
    Contribution::or(LEN).with(8, bits)
}

fn swing(ctx: &FrameContext<'_>) -> Contribution {
    let bits = match ctx.choice(Feature::Swing) {
        Some("auto") => 0xf0,
        Some("auto high") => 0x70,
        Some("auto low") => 0xb0,
        Some("ceiling") => 0x80,
        Some("90°") => 0x40,
        Some("60°") => 0xc0,
        Some("45°") => 0x20,
        Some("30°") => 0xa0,
        _ => 0x00,
    };
    Contribution::or(LEN).with(8, bits)
}

fn purifier(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::or(LEN);
    match ctx.value(Feature::Purifier) {
        Some(v) if v.is_on() => c.with(17, 0x20),
        _ => c,
    }
}

fn mode(ctx: &FrameContext<'_>) -> Contribution {
    let byte = match ctx.mode() {
        "off" => 0x10,
        "dry" => 0x94,
        "fan" => 0x96,
        "cool" => 0x9c,
        "heat" => 0x92,
        _ => 0x90,
    };
    Contribution::replace(LEN).with(5, byte)
}

fn odour_wash(composer: &Composer<'_>) -> Vec<Vec<u8>> {
    if composer.context().is_requested(Feature::Cleaning) {
        vec![HEADER.to_vec(), ODOUR_WASH.to_vec()]
    } else {
        Vec::new()
    }
}

fn economy(composer: &Composer<'_>) -> Vec<Vec<u8>> {
    if composer.context().is_requested(Feature::Economy) {
        vec![HEADER.to_vec(), ECONOMY.to_vec()]
    } else {
        Vec::new()
    }
}

fn header(_: &Composer<'_>) -> Vec<Vec<u8>> {
    vec![HEADER.to_vec()]
}

pub const LAYOUT: FrameLayout = FrameLayout {
    template: &[
        0x40, 0x04, 0x07, 0x20, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x70, 0x07, 0x00, 0x00,
        0x91, 0x00, 0x00,
    ],
    encoders: &[
        (Feature::Temperature, temperature),
        (Feature::Fan, fan),
        (Feature::Swing, swing),
        (Feature::Purifier, purifier),
        (Feature::Mode, mode),
    ],
    leading: &[odour_wash, economy, header],
    trailing: &[],
    main_frame: MainFrame::Always,
    checksum: Checksum::ReflectedSum,
};

static GENERIC_CAPS: [(Feature, Domain); 2] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 31 }),
];

static CASSETTE_CAPS: [(Feature, Domain); 7] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 31 }),
    (Feature::Fan, Domain::Choices(&["auto", "highest", "medium", "lowest"])),
    (
        Feature::Swing,
        Domain::Choices(&["auto", "auto high", "auto low", "90°", "60°", "45°", "30°"]),
    ),
    (Feature::Purifier, TOGGLE),
    (Feature::Economy, TOGGLE),
    (Feature::Cleaning, TOGGLE),
];

pub static GENERIC: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Panasonic",
    model: "Generic",
    capabilities: Capabilities::new(&GENERIC_CAPS),
    defaults: &[(Feature::Mode, Value::Choice("off")), (Feature::Temperature, Value::Number(25))],
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static CASSETTE: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Panasonic",
    model: "4 Way Cassette",
    capabilities: Capabilities::new(&CASSETTE_CAPS),
    defaults: &[
        (Feature::Mode, Value::Choice("off")),
        (Feature::Temperature, Value::Number(25)),
        (Feature::Fan, Value::Choice("auto")),
        (Feature::Swing, Value::Choice("auto")),
    ],
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static BRAND: Brand = Brand {
    name: "panasonic",
    fallback: &GENERIC,
    models: &[
        ("generic", &GENERIC),
        ("4 way cassette", &CASSETTE),
        ("NKE series", &delegated::PANASONIC_NKE),
        ("DKE series", &delegated::PANASONIC_DKE),
        ("JKE series", &delegated::PANASONIC_JKE),
        ("CKP series", &delegated::PANASONIC_CKP),
        ("CS-ME10CKPG", &delegated::PANASONIC_CKP),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;

    fn hex_frames(device: &mut Device) -> Vec<String> {
        let render = device.render(None).unwrap();
        render.frames.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_header_and_state_frame() {
        let mut device = Device::new(&GENERIC);
        device.set(Feature::Mode, "cool");
        device.set_temperature(22);
        assert_eq!(
            hex_frames(&mut device),
            vec![
                "40 04 07 20 00 00 00 60",
                "40 04 07 20 00 9c 34 01 00 00 00 70 07 00 00 91 00 00 46",
            ]
        );
    }

    #[test]
    fn test_economy_frames_lead() {
        let mut device = Device::new(&CASSETTE);
        device.set(Feature::Mode, "fan");
        device.set_temperature(22);
        device.set(Feature::Fan, "highest");
        device.set(Feature::Swing, "45°");
        device.set(Feature::Purifier, "on");
        device.set(Feature::Economy, "on");
        assert_eq!(
            hex_frames(&mut device),
            vec![
                "40 04 07 20 00 00 00 60",
                "40 04 07 20 01 a1 ac 02",
                "40 04 07 20 00 00 00 60",
                "40 04 07 20 00 96 6c 01 2e 00 00 70 07 00 00 91 00 20 28",
            ]
        );
    }

    #[test]
    fn test_cleaning_then_economy() {
        let mut device = Device::new(&CASSETTE);
        device.set(Feature::Mode, "auto");
        device.set_temperature(35);
        device.set(Feature::Fan, "medium");
        device.set(Feature::Swing, "auto low");
        device.set(Feature::Cleaning, "on");
        device.set(Feature::Economy, "on");
        let frames = hex_frames(&mut device);
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[1], "40 04 07 20 01 d9 4c ca");
        assert_eq!(frames[3], "40 04 07 20 01 a1 ac 02");
        assert_eq!(frames[5], "40 04 07 20 00 90 7c 01 ba 00 00 70 07 00 00 91 00 00 85");
    }

    #[test]
    fn test_off_drops_aux_requests() {
        let mut device = Device::new(&CASSETTE);
        device.set(Feature::Mode, "cool");
        device.render(None).unwrap();

        device.set(Feature::Economy, "on");
        device.set(Feature::Mode, "off");
        let frames = hex_frames(&mut device);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], "40 04 07 20 00 10 4c 01 f5 00 00 70 07 00 00 91 00 00 67");
    }
}
