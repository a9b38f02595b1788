/*!
Remotes rendered by the native protocol engine.

These descriptors only declare what each remote accepts and which engine
protocol (and variant) produces it. Their timing profiles describe the
signal the engine emits and are published with the catalogue; nothing here
encodes with them.
*/

use crate::bits::BitOrder;
use crate::capability::{Capabilities, Domain, Feature, Value, TOGGLE};
use crate::protocol::{Encoding, ProtocolDescriptor};
use crate::pulse::TimingProfile;

use super::Brand;

const DEFAULTS: &[(Feature, Value)] = &[(Feature::Mode, Value::Choice("off")), (Feature::Temperature, Value::Number(25))];

const FULL_MODES: Domain = Domain::Choices(&["off", "auto", "cool", "dry", "heat", "fan"]);
const SIX_FANS: Domain = Domain::Choices(&["auto", "highest", "high", "medium", "low", "lowest"]);
const FOUR_FANS: Domain = Domain::Choices(&["auto", "high", "medium", "low"]);
const VANE_ANGLES: Domain = Domain::Choices(&["auto", "90°", "60°", "45°", "30°", "0°"]);
const SHARP_SWING: Domain = Domain::Choices(&["off", "90°", "45°", "30°"]);

const PANASONIC_TIMING: TimingProfile = TimingProfile::bits(&[432], &[432, 1296]).start(&[3456, 1728]);
const SHARP_TIMING: TimingProfile = TimingProfile::bits(&[470], &[500, 1500]).start(&[3800, 1900]);
const LG_TIMING: TimingProfile = TimingProfile::bits(&[400], &[430, 1260])
    .start(&[8500, 4250])
    .end(&[400, 39750]);

static PANASONIC_NKE_CAPS: [(Feature, Domain); 7] = [
    (Feature::Mode, FULL_MODES),
    (Feature::Temperature, Domain::Range { min: 16, max: 30 }),
    (Feature::Fan, SIX_FANS),
    (Feature::Swing, VANE_ANGLES),
    (Feature::HSwing, TOGGLE),
    (Feature::Quiet, TOGGLE),
    (Feature::Powerful, TOGGLE),
];

static PANASONIC_DKE_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, FULL_MODES),
    (Feature::Temperature, Domain::Range { min: 16, max: 30 }),
    (Feature::Fan, SIX_FANS),
    (Feature::Swing, VANE_ANGLES),
    (
        Feature::HSwing,
        Domain::Choices(&["auto", "far right", "right", "middle", "left", "far left"]),
    ),
    (Feature::Quiet, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Purifier, TOGGLE),
];

static PANASONIC_JKE_CAPS: [(Feature, Domain); 6] = [
    (Feature::Mode, FULL_MODES),
    (Feature::Temperature, Domain::Range { min: 16, max: 30 }),
    (Feature::Fan, SIX_FANS),
    (Feature::Swing, VANE_ANGLES),
    (Feature::Quiet, TOGGLE),
    (Feature::Powerful, TOGGLE),
];

static MITSUBISHI_CAPS: [(Feature, Domain); 5] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry", "heat"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 31 }),
    (Feature::Fan, SIX_FANS),
    (Feature::Swing, Domain::Choices(&["off", "auto", "90°", "60°", "45°", "30°", "0°"])),
    (
        Feature::HSwing,
        Domain::Choices(&["auto", "wide", "far right", "right", "middle", "left", "far left"]),
    ),
];

static SAMSUNG_CAPS: [(Feature, Domain); 11] = [
    (Feature::Mode, FULL_MODES),
    (Feature::Temperature, Domain::Range { min: 16, max: 30 }),
    (Feature::Fan, FOUR_FANS),
    (Feature::Swing, TOGGLE),
    (Feature::HSwing, TOGGLE),
    (Feature::Cleaning, TOGGLE),
    (Feature::Quiet, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Economy, TOGGLE),
    (Feature::Light, TOGGLE),
    (Feature::Purifier, TOGGLE),
];

static HITACHI_424_CAPS: [(Feature, Domain); 4] = [
    (Feature::Mode, Domain::Choices(&["off", "fan", "heat", "cool", "dry"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 32 }),
    (Feature::Fan, SIX_FANS),
    (Feature::Swing, TOGGLE),
];

static SHARP_A907_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "dry", "heat"])),
    (Feature::Temperature, Domain::Range { min: 15, max: 30 }),
    (Feature::Fan, FOUR_FANS),
    (Feature::Swing, SHARP_SWING),
    (Feature::Cleaning, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Economy, TOGGLE),
    (Feature::Purifier, TOGGLE),
];

static SHARP_A903_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "dry", "fan"])),
    (Feature::Temperature, Domain::Range { min: 15, max: 30 }),
    (Feature::Fan, FOUR_FANS),
    (Feature::Swing, SHARP_SWING),
    (Feature::Cleaning, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Light, TOGGLE),
    (Feature::Purifier, TOGGLE),
];

static SHARP_A705_CAPS: [(Feature, Domain); 8] = [
    (Feature::Mode, Domain::Choices(&["off", "cool", "dry", "fan"])),
    (Feature::Temperature, Domain::Range { min: 15, max: 30 }),
    (Feature::Fan, FOUR_FANS),
    (Feature::Swing, SHARP_SWING),
    (Feature::Cleaning, TOGGLE),
    (Feature::Powerful, TOGGLE),
    (Feature::Light, TOGGLE),
    (Feature::Purifier, TOGGLE),
];

static LG_V1_CAPS: [(Feature, Domain); 6] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry", "heat"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 25 }),
    (Feature::Fan, Domain::Choices(&["auto", "high", "medium", "low", "lowest"])),
    (Feature::Swing, Domain::Choices(&["off", "auto", "90°", "60°", "45°", "30°", "0°"])),
    (Feature::HSwing, TOGGLE),
    (Feature::Light, TOGGLE),
];

static LG_V2_CAPS: [(Feature, Domain); 6] = [
    (Feature::Mode, Domain::Choices(&["off", "auto", "cool", "fan", "dry", "heat"])),
    (Feature::Temperature, Domain::Range { min: 16, max: 25 }),
    (Feature::Fan, Domain::Choices(&["auto", "high", "medium", "low", "lowest"])),
    (Feature::Swing, TOGGLE),
    (Feature::HSwing, TOGGLE),
    (Feature::Light, TOGGLE),
];

macro_rules! delegated {
    ($brand:expr, $model:expr, $caps:expr, $timing:expr, $protocol:expr, $variant:expr) => {
        ProtocolDescriptor {
            brand: $brand,
            model: $model,
            capabilities: Capabilities::new($caps),
            defaults: DEFAULTS,
            timing: $timing,
            bit_order: BitOrder::MsbFirst,
            encoding: Encoding::Delegated {
                protocol: $protocol,
                variant: $variant,
            },
        }
    };
}

pub static PANASONIC_NKE: ProtocolDescriptor = delegated!(
    "Panasonic",
    "NKE series",
    &PANASONIC_NKE_CAPS,
    PANASONIC_TIMING,
    "PANASONIC_AC",
    Some("kPanasonicNke")
);

pub static PANASONIC_DKE: ProtocolDescriptor = delegated!(
    "Panasonic",
    "DKE series",
    &PANASONIC_DKE_CAPS,
    PANASONIC_TIMING,
    "PANASONIC_AC",
    Some("kPanasonicDke")
);

pub static PANASONIC_JKE: ProtocolDescriptor = delegated!(
    "Panasonic",
    "JKE series",
    &PANASONIC_JKE_CAPS,
    PANASONIC_TIMING,
    "PANASONIC_AC",
    Some("kPanasonicJke")
);

pub static PANASONIC_CKP: ProtocolDescriptor = delegated!(
    "Panasonic",
    "CKP series",
    &PANASONIC_JKE_CAPS,
    PANASONIC_TIMING,
    "PANASONIC_AC",
    Some("kPanasonicCkp")
);

pub static MITSUBISHI: ProtocolDescriptor = delegated!(
    "Mitsubishi Electric",
    "MS-GK24VA",
    &MITSUBISHI_CAPS,
    TimingProfile::bits(&[450], &[420, 1300])
        .start(&[3400, 1750])
        .end(&[440, 15500]),
    "MITSUBISHI_AC",
    None
);

pub static SAMSUNG: ProtocolDescriptor = delegated!(
    "Samsung",
    "Generic",
    &SAMSUNG_CAPS,
    TimingProfile::bits(&[586], &[436, 1432])
        .lead(&[690, 17844])
        .start(&[3086, 8864])
        .tail(&[2886, 97114]),
    "SAMSUNG_AC",
    None
);

pub static HITACHI_424: ProtocolDescriptor = delegated!(
    "Hitachi",
    "RAR-8P2 remote",
    &HITACHI_424_CAPS,
    TimingProfile::bits(&[463], &[500, 1250])
        .lead(&[29784, 49290])
        .start(&[3416, 1604]),
    "HITACHI_AC424",
    None
);

pub static SHARP_A907: ProtocolDescriptor =
    delegated!("Sharp", "A907", &SHARP_A907_CAPS, SHARP_TIMING, "SHARP_AC", Some("A907"));

pub static SHARP_A903: ProtocolDescriptor =
    delegated!("Sharp", "A903", &SHARP_A903_CAPS, SHARP_TIMING, "SHARP_AC", Some("A903"));

pub static SHARP_A705: ProtocolDescriptor =
    delegated!("Sharp", "A705", &SHARP_A705_CAPS, SHARP_TIMING, "SHARP_AC", Some("A705"));

pub static LG_V1: ProtocolDescriptor =
    delegated!("LG", "GE6711AR2853M", &LG_V1_CAPS, LG_TIMING, "LG", Some("GE6711AR2853M"));

pub static LG_V2: ProtocolDescriptor =
    delegated!("LG", "6711A20083V", &LG_V2_CAPS, LG_TIMING, "LG", Some("LG6711A20083V"));

pub static MITSUBISHI_BRAND: Brand = Brand {
    name: "mitsubishi",
    fallback: &MITSUBISHI,
    models: &[
        ("MS-GK24VA", &MITSUBISHI),
        ("KM14A 0179213 remote", &MITSUBISHI),
        ("MLZ-RX5017AS", &MITSUBISHI),
        ("MSZ-GV2519", &MITSUBISHI),
    ],
};

pub static SAMSUNG_BRAND: Brand = Brand {
    name: "samsung",
    fallback: &SAMSUNG,
    models: &[
        ("generic", &SAMSUNG),
        ("AR09FSSDAWKNFA", &SAMSUNG),
        ("AR12HSSDBWKNEU", &SAMSUNG),
        ("DB93-14195A remote", &SAMSUNG),
    ],
};

pub static HITACHI_BRAND: Brand = Brand {
    name: "hitachi",
    fallback: &HITACHI_424,
    models: &[("RAR-8P2 remote", &HITACHI_424), ("RAS-AJ25H", &HITACHI_424)],
};
