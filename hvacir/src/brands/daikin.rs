/*!
Daikin remotes.

Single 18 byte frame, reflected-sum checksum, standard HVAC timing. Mode is
encoded last and replaces what it needs; powering off keeps the previous
mode in byte 5 and sets the off flag in byte 16.
*/

use crate::bits::{reflect, BitOrder};
use crate::capability::{Capabilities, Domain, Feature, Value, TOGGLE};
use crate::checksum::Checksum;
use crate::frame::{Contribution, FrameContext, FrameLayout, MainFrame};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::TimingProfile;

use super::Brand;

const LEN: usize = 18;

/// Temperature sent while in fan mode
const FAN_DEGREES: i32 = 25;

const FAN_RANK: [&str; 5] = ["lowest", "low", "middle", "high", "highest"];

pub const TIMING: TimingProfile = TimingProfile::bits(&[435], &[435, 1300])
    .start(&[3500, 1750])
    .end(&[435, 10000]);

fn temperature(ctx: &FrameContext<'_>) -> Contribution {
    let degrees = match ctx.mode() {
        "fan" => FAN_DEGREES,
        _ => ctx.number(Feature::Temperature).unwrap_or(FAN_DEGREES),
    };
    Contribution::or(LEN).with(6, reflect((degrees * 2) as u8))
}

fn fan(ctx: &FrameContext<'_>) -> Contribution {
    let speed = ctx.choice(Feature::Fan).unwrap_or("auto");
    let byte = match FAN_RANK.iter().position(|s| *s == speed) {
        Some(rank) => reflect(48 + 16 * rank as u8),
        None => 0x05,
    };
    Contribution::or(LEN).with(8, byte)
}

fn swing(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::or(LEN);
    match ctx.value(Feature::Swing) {
        Some(v) if v.is_on() => c.with(8, 0xf0),
        _ => c,
    }
}

fn powerful(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::replace(LEN);
    match ctx.value(Feature::Powerful) {
        Some(v) if v.is_on() => c.with(13, 0x80),
        _ => c,
    }
}

fn mode(ctx: &FrameContext<'_>) -> Contribution {
    let c = Contribution::replace(LEN);
    match ctx.mode() {
        "off" => {
            // re-affirm the mode the unit was in; 0 leaves the template byte
            let held = match ctx.previous_mode() {
                "off" => 0x0c,
                "dry" => 0x04,
                "fan" => 0x06,
                "heat" => 0x02,
                _ => 0x00,
            };
            c.with(16, 0x02).with(5, held)
        }
        "dry" => c.with(5, 0x84).with(6, 0x03),
        "fan" => c.with(5, 0x86),
        "heat" => c.with(5, 0x82),
        "auto" => c.with(5, 0x80),
        _ => c.with(5, 0x8c),
    }
}

pub const LAYOUT: FrameLayout = FrameLayout {
    template: &[
        0x88, 0x5b, 0xe4, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0xa3, 0x00, 0x10,
    ],
    encoders: &[
        (Feature::Temperature, temperature),
        (Feature::Fan, fan),
        (Feature::Swing, swing),
        (Feature::Powerful, powerful),
        (Feature::Mode, mode),
    ],
    leading: &[],
    trailing: &[],
    main_frame: MainFrame::Always,
    checksum: Checksum::ReflectedSum,
};

static GENERIC_CAPS: [(Feature, Domain); 2] = [
    (Feature::Mode, Domain::Choices(&["off", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 18, max: 31 }),
];

static SMASH_2_CAPS: [(Feature, Domain); 5] = [
    (Feature::Mode, Domain::Choices(&["off", "cool", "fan", "dry"])),
    (Feature::Temperature, Domain::Range { min: 18, max: 31 }),
    (Feature::Fan, Domain::Choices(&["auto", "highest", "high", "middle", "low", "lowest"])),
    (Feature::Swing, TOGGLE),
    (Feature::Powerful, TOGGLE),
];

pub static GENERIC: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Daikin",
    model: "Generic",
    capabilities: Capabilities::new(&GENERIC_CAPS),
    defaults: &[(Feature::Mode, Value::Choice("cool")), (Feature::Temperature, Value::Number(25))],
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static SMASH_2: ProtocolDescriptor = ProtocolDescriptor {
    brand: "Daikin",
    model: "Smash 2",
    capabilities: Capabilities::new(&SMASH_2_CAPS),
    defaults: &[
        (Feature::Mode, Value::Choice("off")),
        (Feature::Temperature, Value::Number(25)),
        (Feature::Fan, Value::Choice("auto")),
        (Feature::Swing, Value::Choice("off")),
        (Feature::Powerful, Value::Choice("off")),
    ],
    timing: TIMING,
    bit_order: BitOrder::MsbFirst,
    encoding: Encoding::Composed(LAYOUT),
};

pub static BRAND: Brand = Brand {
    name: "daikin",
    fallback: &GENERIC,
    models: &[("generic", &GENERIC), ("smash 2", &SMASH_2)],
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
    fn test_power_off_keeps_previous_mode() {
        let mut device = Device::new(&SMASH_2);
        device.set(Feature::Mode, "cool");
        device.set_temperature(22);
        device.render(None).unwrap();

        device.set(Feature::Mode, "off");
        assert_eq!(
            hex_frames(&mut device),
            vec!["88 5b e4 00 00 0c 34 00 05 00 00 00 00 00 00 a3 02 10 d8"]
        );
    }

    #[test]
    fn test_dry_with_options() {
        let mut device = Device::new(&SMASH_2);
        device.set(Feature::Mode, "dry");
        device.set_temperature(24);
        device.set(Feature::Fan, "low");
        device.set(Feature::Swing, "on");
        device.set_named("powerfull", "on");
        assert_eq!(
            hex_frames(&mut device),
            vec!["88 5b e4 00 00 84 03 00 f2 00 00 00 00 80 00 a3 00 10 08"]
        );

        device.set(Feature::Mode, "off");
        assert_eq!(
            hex_frames(&mut device),
            vec!["88 5b e4 00 00 04 0c 00 f2 00 00 00 00 80 00 a3 02 10 fd"]
        );
    }

    #[test]
    fn test_fan_mode_forces_temperature() {
        let mut device = Device::new(&SMASH_2);
        device.set(Feature::Mode, "fan");
        device.set_temperature(30);
        device.set(Feature::Fan, "highest");
        assert_eq!(
            hex_frames(&mut device),
            vec!["88 5b e4 00 00 86 4c 00 0e 00 00 00 00 00 00 a3 00 10 47"]
        );
    }

    #[test]
    fn test_generic_ignores_fan() {
        let mut device = Device::new(&GENERIC);
        device.set(Feature::Fan, "high");
        assert!(device.pending().is_empty());
        let render = device.render(None).unwrap();
        assert_eq!(render.frames.len(), 1);
        assert_eq!(render.frames[0].len(), LAYOUT.frame_len());
        assert_eq!(render.frames[0].bytes()[8], 0x05);
    }
}
