/*!
Common error types for the IR code generator.
*/

use thiserror::Error;

use crate::capability::{Feature, Value};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, HvacError>;

/// Errors surfaced by catalogue lookup and rendering
///
/// Requests for unsupported features or values are never errors; they are
/// dropped by the command state. Only the cases below reach the caller.
#[derive(Error, Debug)]
pub enum HvacError {
    /// Brand not present in the catalogue
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// Setting has no counterpart in the native engine vocabulary
    #[error("No engine option for {feature} = {value}")]
    Unmapped { feature: Feature, value: Value },

    /// Delegated protocol rendered without an engine
    #[error("Protocol {0} needs the native protocol engine")]
    EngineUnavailable(String),

    /// Failure reported by the native engine
    #[error("Native engine error: {0}")]
    Engine(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl HvacError {
    /// Create a new unknown brand error
    pub fn unknown_brand(name: impl Into<String>) -> Self {
        Self::UnknownBrand(name.into())
    }

    /// Create a new engine error with a message
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a new unmapped option error
    pub fn unmapped(feature: Feature, value: Value) -> Self {
        Self::Unmapped { feature, value }
    }
}
