/*!
Features, values and the legal domains a device declares for them.

A device's capability set is fixed when its descriptor is written; nothing
in the crate mutates it. Enumerated features store the catalogue's own
`&'static str` choice once a request has been matched against the domain,
so values are cheap to copy and compare.
*/

use serde::Serialize;
use std::fmt;

/// Mode value that powers the unit down
pub const OFF: &str = "off";

/// Settings a remote can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Mode,
    Temperature,
    Fan,
    Swing,
    HSwing,
    Powerful,
    Quiet,
    Economy,
    Purifier,
    Cleaning,
    Light,
    Sleep,
    AutoBias,
    Diagnostic,
}

impl Feature {
    /// Every feature, in canonical order
    pub const ALL: [Feature; 14] = [
        Feature::Mode,
        Feature::Temperature,
        Feature::Fan,
        Feature::Swing,
        Feature::HSwing,
        Feature::Powerful,
        Feature::Quiet,
        Feature::Economy,
        Feature::Purifier,
        Feature::Cleaning,
        Feature::Light,
        Feature::Sleep,
        Feature::AutoBias,
        Feature::Diagnostic,
    ];

    /// Parse feature from its name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mode" => Some(Self::Mode),
            "temperature" | "temp" => Some(Self::Temperature),
            "fan" => Some(Self::Fan),
            "swing" => Some(Self::Swing),
            "hswing" => Some(Self::HSwing),
            "powerful" | "powerfull" => Some(Self::Powerful),
            "quiet" => Some(Self::Quiet),
            "economy" => Some(Self::Economy),
            "purifier" => Some(Self::Purifier),
            "cleaning" => Some(Self::Cleaning),
            "light" => Some(Self::Light),
            "sleep" => Some(Self::Sleep),
            "auto_bias" => Some(Self::AutoBias),
            "diagnostic" => Some(Self::Diagnostic),
            _ => None,
        }
    }

    /// One-shot requests that drop back to their first value once rendered
    pub fn is_momentary(&self) -> bool {
        matches!(self, Self::Diagnostic)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Temperature => "temperature",
            Self::Fan => "fan",
            Self::Swing => "swing",
            Self::HSwing => "hswing",
            Self::Powerful => "powerful",
            Self::Quiet => "quiet",
            Self::Economy => "economy",
            Self::Purifier => "purifier",
            Self::Cleaning => "cleaning",
            Self::Light => "light",
            Self::Sleep => "sleep",
            Self::AutoBias => "auto_bias",
            Self::Diagnostic => "diagnostic",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed or requested feature value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(i32),
    Choice(&'static str),
}

impl Value {
    pub fn as_choice(&self) -> Option<&'static str> {
        match self {
            Value::Choice(c) => Some(*c),
            Value::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i32> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Choice(_) => None,
        }
    }

    /// True for the `"on"` choice of a toggle
    pub fn is_on(&self) -> bool {
        matches!(self, Value::Choice("on"))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Choice(c) => f.write_str(c),
        }
    }
}

/// Legal values for one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Ordered list of accepted choices
    Choices(&'static [&'static str]),
    /// Closed integer interval
    Range { min: i32, max: i32 },
}

impl Domain {
    /// Match a textual request against the domain.
    ///
    /// Choices must match exactly; ranges parse an integer and clamp it.
    pub fn resolve(&self, raw: &str) -> Option<Value> {
        match self {
            Domain::Choices(choices) => choices
                .iter()
                .find(|c| **c == raw)
                .map(|c| Value::Choice(*c)),
            Domain::Range { .. } => raw.trim().parse::<i32>().ok().map(|n| self.clamp(n)),
        }
    }

    /// Clamp a number into a range domain. Choice domains return the number unchanged.
    pub fn clamp(&self, n: i32) -> Value {
        match self {
            Domain::Range { min, max } => Value::Number(n.clamp(*min, *max)),
            Domain::Choices(_) => Value::Number(n),
        }
    }

    /// Whether an already-typed value belongs to the domain
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Domain::Choices(choices), Value::Choice(c)) => choices.contains(c),
            (Domain::Range { min, max }, Value::Number(n)) => (*min..=*max).contains(n),
            _ => false,
        }
    }

    /// Value used when a descriptor does not name a default
    pub fn first(&self) -> Value {
        match self {
            Domain::Choices(choices) => Value::Choice(choices.first().copied().unwrap_or(OFF)),
            Domain::Range { min, .. } => Value::Number(*min),
        }
    }

    /// Position of a choice within the domain
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        match (self, value) {
            (Domain::Choices(choices), Value::Choice(c)) => choices.iter().position(|x| x == c),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Choices(choices) => write!(f, "{}", choices.join(", ")),
            Domain::Range { min, max } => write!(f, "{}..={}", min, max),
        }
    }
}

/// Static feature → domain declaration of one device
#[derive(Debug, Clone, Copy)]
pub struct Capabilities(&'static [(Feature, Domain)]);

impl Capabilities {
    pub const fn new(entries: &'static [(Feature, Domain)]) -> Self {
        Self(entries)
    }

    pub fn domain(&self, feature: Feature) -> Option<&'static Domain> {
        let entries: &'static [(Feature, Domain)] = self.0;
        entries.iter().find(|(f, _)| *f == feature).map(|(_, d)| d)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.domain(feature).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &'static Domain)> {
        let entries: &'static [(Feature, Domain)] = self.0;
        entries.iter().map(|(f, d)| (*f, d))
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> {
        let entries: &'static [(Feature, Domain)] = self.0;
        entries.iter().map(|(f, _)| *f)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shorthand for the very common off/on toggle domain
pub const TOGGLE: Domain = Domain::Choices(&["off", "on"]);
