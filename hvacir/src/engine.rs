/*!
Native protocol engine contract.

Some device families are not composed byte by byte here; their commands
come from an external protocol engine that already knows the remote. This
module defines the engine's black-box interface, its option vocabulary and
the translation from generic settings, plus the render sequence that drives
it. No engine implementation ships with the crate.
*/

use serde::Serialize;
use tracing::{debug, warn};

use crate::capability::{Feature, Value, OFF};
use crate::error::{HvacError, Result};
use crate::state::Status;

/// Operating mode understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpMode {
    Off,
    Auto,
    Cool,
    Heat,
    Dry,
    Fan,
}

/// Fan speed understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FanSpeed {
    Auto,
    Min,
    Low,
    Medium,
    MediumHigh,
    High,
    Max,
}

/// Vertical vane position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwingV {
    Off,
    Auto,
    Highest,
    High,
    UpperMiddle,
    Middle,
    Low,
    Lowest,
}

/// Horizontal vane position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwingH {
    Off,
    Auto,
    LeftMax,
    Left,
    Middle,
    Right,
    RightMax,
    Wide,
}

/// One engine setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineOption {
    Mode(OpMode),
    Degrees(i32),
    FanSpeed(FanSpeed),
    SwingV(SwingV),
    SwingH(SwingH),
    Quiet(bool),
    Turbo(bool),
    Econo(bool),
    Light(bool),
    Filter(bool),
    Clean(bool),
}

/// External protocol engine driven by delegated device families
pub trait NativeEngine {
    /// Pick the protocol (and model variant) the next render uses
    fn select_protocol(&mut self, protocol: &str, variant: Option<&str>) -> Result<()>;

    /// Set one option of the next command
    fn set_option(&mut self, option: EngineOption) -> Result<()>;

    /// Power flag of the next command
    fn power(&mut self, on: bool);

    /// Build the command from the options set so far
    fn render(&mut self) -> Result<()>;

    /// Durations of the last render, in microseconds
    fn fetch_timing(&mut self) -> Vec<u32>;

    /// Forget the last render's timing
    fn reset_timing(&mut self);
}

/// Map a generic setting to the engine vocabulary
pub fn translate(feature: Feature, value: Value) -> Result<EngineOption> {
    let unmapped = || HvacError::unmapped(feature, value);

    let option = match (feature, value) {
        (Feature::Temperature, Value::Number(degrees)) => EngineOption::Degrees(degrees),
        (Feature::Mode, Value::Choice(c)) => EngineOption::Mode(op_mode(c).ok_or_else(unmapped)?),
        (Feature::Fan, Value::Choice(c)) => EngineOption::FanSpeed(fan_speed(c).ok_or_else(unmapped)?),
        (Feature::Swing, Value::Choice(c)) => EngineOption::SwingV(swing_v(c).ok_or_else(unmapped)?),
        (Feature::HSwing, Value::Choice(c)) => EngineOption::SwingH(swing_h(c).ok_or_else(unmapped)?),
        (Feature::Quiet, v) => EngineOption::Quiet(v.is_on()),
        (Feature::Powerful, v) => EngineOption::Turbo(v.is_on()),
        (Feature::Economy, v) => EngineOption::Econo(v.is_on()),
        (Feature::Light, v) => EngineOption::Light(v.is_on()),
        (Feature::Purifier, v) => EngineOption::Filter(v.is_on()),
        (Feature::Cleaning, v) => EngineOption::Clean(v.is_on()),
        _ => return Err(unmapped()),
    };
    Ok(option)
}

fn op_mode(choice: &str) -> Option<OpMode> {
    match choice {
        "auto" => Some(OpMode::Auto),
        "cool" => Some(OpMode::Cool),
        "dry" => Some(OpMode::Dry),
        "fan" => Some(OpMode::Fan),
        "heat" => Some(OpMode::Heat),
        "off" => Some(OpMode::Off),
        _ => None,
    }
}

fn fan_speed(choice: &str) -> Option<FanSpeed> {
    match choice {
        "auto" => Some(FanSpeed::Auto),
        "highest" => Some(FanSpeed::Max),
        "high" => Some(FanSpeed::High),
        "midhigh" => Some(FanSpeed::MediumHigh),
        "medium" => Some(FanSpeed::Medium),
        "low" => Some(FanSpeed::Low),
        "lowest" => Some(FanSpeed::Min),
        _ => None,
    }
}

fn swing_v(choice: &str) -> Option<SwingV> {
    match choice {
        "auto" => Some(SwingV::Auto),
        "auto high" | "90°" => Some(SwingV::High),
        "auto low" | "30°" => Some(SwingV::Low),
        "ceiling" => Some(SwingV::Highest),
        "60°" => Some(SwingV::UpperMiddle),
        "45°" => Some(SwingV::Middle),
        "0°" => Some(SwingV::Lowest),
        "off" => Some(SwingV::Off),
        _ => None,
    }
}

fn swing_h(choice: &str) -> Option<SwingH> {
    match choice {
        "off" => Some(SwingH::Off),
        "left" | "close left" => Some(SwingH::Left),
        "middle" | "close middle" | "far middle" => Some(SwingH::Middle),
        "right" | "close right" => Some(SwingH::Right),
        "far left" => Some(SwingH::LeftMax),
        "far right" => Some(SwingH::RightMax),
        "wide" => Some(SwingH::Wide),
        "auto" => Some(SwingH::Auto),
        _ => None,
    }
}

/// Drive one render through the engine and collect its timing.
///
/// Options that cannot be mapped are logged and left out; the command is
/// still rendered with everything else.
pub fn render_with(
    engine: &mut dyn NativeEngine,
    protocol: &str,
    variant: Option<&str>,
    status: &Status,
) -> Result<Vec<u32>> {
    engine.select_protocol(protocol, variant)?;

    let powered = status.get(&Feature::Mode) != Some(&Value::Choice(OFF));
    engine.power(powered);

    for (feature, value) in status {
        match translate(*feature, *value) {
            Ok(option) => engine.set_option(option)?,
            Err(e) => warn!("Dropping {} option: {}", protocol, e),
        }
    }

    engine.render()?;
    let timing = engine.fetch_timing();
    engine.reset_timing();
    debug!("{} rendered {} durations", protocol, timing.len());
    Ok(timing)
}

/// Engine double that records every call and plays back a fixed timing
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub protocol: Option<(String, Option<String>)>,
    pub power: Option<bool>,
    pub options: Vec<EngineOption>,
    pub renders: usize,
    pub resets: usize,
    pub timing: Vec<u32>,
}

#[cfg(test)]
impl NativeEngine for RecordingEngine {
    fn select_protocol(&mut self, protocol: &str, variant: Option<&str>) -> Result<()> {
        if protocol.is_empty() {
            return Err(HvacError::engine("no protocol"));
        }
        self.protocol = Some((protocol.to_string(), variant.map(str::to_string)));
        Ok(())
    }

    fn set_option(&mut self, option: EngineOption) -> Result<()> {
        self.options.push(option);
        Ok(())
    }

    fn power(&mut self, on: bool) {
        self.power = Some(on);
    }

    fn render(&mut self) -> Result<()> {
        self.renders += 1;
        Ok(())
    }

    fn fetch_timing(&mut self) -> Vec<u32> {
        self.timing.clone()
    }

    fn reset_timing(&mut self) {
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_vocabulary() {
        assert_eq!(
            translate(Feature::Mode, Value::Choice("dry")).unwrap(),
            EngineOption::Mode(OpMode::Dry)
        );
        assert_eq!(
            translate(Feature::Temperature, Value::Number(22)).unwrap(),
            EngineOption::Degrees(22)
        );
        assert_eq!(
            translate(Feature::Fan, Value::Choice("highest")).unwrap(),
            EngineOption::FanSpeed(FanSpeed::Max)
        );
        assert_eq!(
            translate(Feature::Swing, Value::Choice("90°")).unwrap(),
            EngineOption::SwingV(SwingV::High)
        );
        assert_eq!(
            translate(Feature::HSwing, Value::Choice("far middle")).unwrap(),
            EngineOption::SwingH(SwingH::Middle)
        );
        assert_eq!(
            translate(Feature::Powerful, Value::Choice("on")).unwrap(),
            EngineOption::Turbo(true)
        );
        assert_eq!(
            translate(Feature::Purifier, Value::Choice("off")).unwrap(),
            EngineOption::Filter(false)
        );
    }

    #[test]
    fn test_translate_unmapped() {
        assert!(matches!(
            translate(Feature::Sleep, Value::Choice("on")),
            Err(HvacError::Unmapped { feature: Feature::Sleep, .. })
        ));
        assert!(translate(Feature::AutoBias, Value::Choice("+1")).is_err());
        assert!(translate(Feature::Fan, Value::Choice("breeze")).is_err());
    }

    #[test]
    fn test_render_sequence() {
        let mut engine = RecordingEngine {
            timing: vec![3456, 1728, 432, 1296],
            ..Default::default()
        };
        let status: Status = [
            (Feature::Mode, Value::Choice("cool")),
            (Feature::Temperature, Value::Number(23)),
            (Feature::Sleep, Value::Choice("on")),
        ]
        .into_iter()
        .collect();

        let timing = render_with(&mut engine, "PANASONIC_AC", Some("kPanasonicNke"), &status).unwrap();
        assert_eq!(timing, vec![3456, 1728, 432, 1296]);
        assert_eq!(
            engine.protocol,
            Some(("PANASONIC_AC".to_string(), Some("kPanasonicNke".to_string())))
        );
        assert_eq!(engine.power, Some(true));
        assert_eq!(
            engine.options,
            vec![EngineOption::Mode(OpMode::Cool), EngineOption::Degrees(23)]
        );
        assert_eq!(engine.renders, 1);
        assert_eq!(engine.resets, 1);
    }

    #[test]
    fn test_render_off_and_engine_failure() {
        let mut engine = RecordingEngine::default();
        let status: Status = [(Feature::Mode, Value::Choice("off"))].into_iter().collect();
        render_with(&mut engine, "SAMSUNG_AC", None, &status).unwrap();
        assert_eq!(engine.power, Some(false));

        let result = render_with(&mut engine, "", None, &status);
        assert!(matches!(result, Err(HvacError::Engine(_))));
    }
}
