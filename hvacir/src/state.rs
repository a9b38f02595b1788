/*!
Confirmed status and pending requests of one device.

Requests are filtered here, against the device's capabilities, so nothing
downstream ever sees a feature or value the device does not declare. The
filtering is best-effort: a single command line may target several
heterogeneous devices, so unsupported requests are dropped rather than
reported.
*/

use std::collections::BTreeMap;
use tracing::debug;

use crate::capability::{Capabilities, Domain, Feature, Value, OFF};

/// Current value of every declared feature
pub type Status = BTreeMap<Feature, Value>;

/// Requested changes not yet rendered
pub type Delta = BTreeMap<Feature, Value>;

/// Merge a delta into a status, producing the new status
pub fn apply(status: &Status, delta: &Delta) -> Status {
    let mut merged = status.clone();
    for (feature, value) in delta {
        if let Some(slot) = merged.get_mut(feature) {
            *slot = *value;
        }
    }
    merged
}

/// What one render consumed: the status before it and the requests it applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub previous: Status,
    pub requested: Delta,
}

/// Status/delta pair owned by a device
#[derive(Debug, Clone)]
pub struct CommandState {
    capabilities: Capabilities,
    status: Status,
    pending: Delta,
}

impl CommandState {
    /// Create the state with every declared feature at its default.
    ///
    /// Defaults that are missing or outside their domain fall back to the
    /// domain's first value; temperatures are clamped.
    pub fn new(capabilities: Capabilities, defaults: &[(Feature, Value)]) -> Self {
        let status = capabilities
            .iter()
            .map(|(feature, domain)| {
                let fallback = defaults
                    .iter()
                    .find(|(f, _)| *f == feature)
                    .map(|(_, v)| *v);
                (feature, initial_value(domain, fallback))
            })
            .collect();

        Self {
            capabilities,
            status,
            pending: Delta::new(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Confirmed status
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Requests waiting for the next render
    pub fn pending(&self) -> &Delta {
        &self.pending
    }

    /// Request a feature value given as text
    pub fn set(&mut self, feature: Feature, raw: &str) {
        let Some(domain) = self.capabilities.domain(feature) else {
            debug!("Ignoring {} = {}: not supported", feature, raw);
            return;
        };

        match domain.resolve(raw) {
            Some(value) => self.request(feature, value),
            None => debug!("Ignoring {} = {}: outside {}", feature, raw, domain),
        }
    }

    /// Request a temperature; always clamped into the declared range
    pub fn set_temperature(&mut self, degrees: i32) {
        match self.capabilities.domain(Feature::Temperature) {
            Some(domain) => self.request(Feature::Temperature, domain.clamp(degrees)),
            None => debug!("Ignoring temperature = {}: not supported", degrees),
        }
    }

    /// Request a feature by name. Unknown names are ignored.
    pub fn set_named(&mut self, name: &str, raw: &str) {
        match Feature::from_name(name) {
            Some(feature) => self.set(feature, raw),
            None => debug!("Ignoring unknown feature {}", name),
        }
    }

    fn request(&mut self, feature: Feature, value: Value) {
        if feature == Feature::Mode && value == Value::Choice(OFF) {
            self.pending.clear();
            if self.status.get(&Feature::Mode) != Some(&value) {
                self.pending.insert(Feature::Mode, value);
            }
            return;
        }

        if self.pending.get(&Feature::Mode) == Some(&Value::Choice(OFF)) {
            debug!("Ignoring {} = {}: power off pending", feature, value);
            return;
        }

        if feature != Feature::Temperature && self.status.get(&feature) == Some(&value) {
            debug!("Ignoring {} = {}: already confirmed", feature, value);
            return;
        }

        self.pending.insert(feature, value);
    }

    /// Merge the pending requests into the status and clear them.
    ///
    /// Momentary features are reset in the new status; the transition still
    /// carries their request. Returns what was consumed so frame composition can see both sides of
    /// the transition. Calling it again without new requests changes nothing.
    pub fn apply(&mut self) -> Transition {
        let requested = std::mem::take(&mut self.pending);
        let mut merged = apply(&self.status, &requested);
        for (feature, domain) in self.capabilities.iter() {
            if feature.is_momentary() {
                merged.insert(feature, domain.first());
            }
        }
        let previous = std::mem::replace(&mut self.status, merged);
        Transition { previous, requested }
    }
}

fn initial_value(domain: &Domain, default: Option<Value>) -> Value {
    match default {
        Some(Value::Number(n)) if matches!(domain, Domain::Range { .. }) => domain.clamp(n),
        Some(value) if domain.contains(&value) => value,
        _ => domain.first(),
    }
}
