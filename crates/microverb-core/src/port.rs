//! Port identifiers for host binding.
//!
//! The engine exposes four ports in a fixed order: one audio input, one audio
//! output and two control inputs. Hosts address ports by index; the index is
//! part of the binding contract and must never change.

use crate::error::EngineError;
use crate::param_info::ParamDescriptor;
use crate::params::{decay_descriptor, wet_level_descriptor};

/// A port of the reverb engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PortId {
    /// Mono audio input.
    Input = 0,
    /// Mono audio output.
    Output = 1,
    /// Exponential decay time in seconds.
    Decay = 2,
    /// Relative level of the wet signal.
    WetLevel = 3,
}

impl PortId {
    /// Number of ports.
    pub const COUNT: usize = 4;

    /// All ports in index order.
    pub const ALL: [PortId; Self::COUNT] =
        [PortId::Input, PortId::Output, PortId::Decay, PortId::WetLevel];

    /// Port index as seen by the host.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the sample-buffer ports.
    #[inline]
    pub const fn is_audio(self) -> bool {
        matches!(self, PortId::Input | PortId::Output)
    }

    /// Returns `true` for the control-value ports.
    #[inline]
    pub const fn is_control(self) -> bool {
        !self.is_audio()
    }

    /// Parameter metadata for control ports, `None` for audio ports.
    pub fn descriptor(self) -> Option<ParamDescriptor> {
        match self {
            PortId::Decay => Some(decay_descriptor()),
            PortId::WetLevel => Some(wet_level_descriptor()),
            PortId::Input | PortId::Output => None,
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            PortId::Input => "input",
            PortId::Output => "output",
            PortId::Decay => "decay",
            PortId::WetLevel => "wet level",
        }
    }
}

impl TryFrom<usize> for PortId {
    type Error = EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PortId::ALL
            .get(index)
            .copied()
            .ok_or(EngineError::UnknownPort(index))
    }
}

impl core::fmt::Display for PortId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} port ({})", self.name(), self.index())
    }
}
