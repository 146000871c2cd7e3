//! Errors reported by engine construction and port binding.
//!
//! Block processing never fails: bad control values are clamped and every
//! output write is bounded. Only configuration requests can be rejected, and a
//! rejected request leaves the engine exactly as it was.

use crate::port::PortId;

/// Errors that can occur while configuring a [`MixingEngine`](crate::MixingEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The port index does not name any port.
    UnknownPort(usize),
    /// A control value was bound to an audio port.
    NotAControlPort(PortId),
    /// The sample rate must be non-zero.
    InvalidSampleRate(u32),
    /// An [`EngineConfig`](crate::EngineConfig) field is out of range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownPort(index) => {
                write!(f, "port index {index} out of range (expected < {})", PortId::COUNT)
            }
            Self::NotAControlPort(port) => write!(f, "{port} is an audio port, not a control port"),
            Self::InvalidSampleRate(rate) => write!(f, "invalid sample rate {rate} Hz"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid engine config '{field}': {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
