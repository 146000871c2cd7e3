//! Control-value tracking and smoothing-weight derivation.
//!
//! [`ParameterController`] owns the two user controls (decay time and wet
//! level) and the one-pole smoothing weight derived from them. Its state is
//! the only history carried from one block to the next.
//!
//! Out-of-range control values are never an error: decay is clamped to a
//! minimum, wet level to a range, and an unbound control falls back to its
//! default rather than to the last value seen.
//!
//! ## Weight
//!
//! ```text
//! weight = exp(-window_duration_s / decay_s)
//! ```
//!
//! The weight is only recomputed when the decay actually changes (or when
//! forced at activation), never per sample or per pass. The window duration
//! used is whatever the caller passes at that moment.

use libm::exp;

use crate::control::ControlValue;
use crate::param_info::{ParamDescriptor, ParamId, ParamUnit};

/// Shortest accepted decay time in seconds.
pub const MIN_DECAY_S: f32 = 0.01;
/// Decay time used when no control is bound.
pub const DEFAULT_DECAY_S: f32 = 0.1;
/// Upper display bound for decay time. Decay is not clamped to it.
pub const MAX_DECAY_HINT_S: f32 = 30.0;
/// Lowest accepted wet level.
pub const MIN_WET_LEVEL: f32 = 0.1;
/// Highest accepted wet level.
pub const MAX_WET_LEVEL: f32 = 10.0;
/// Wet level used when no control is bound.
pub const DEFAULT_WET_LEVEL: f32 = 1.0;

/// Metadata for the decay-time control.
pub fn decay_descriptor() -> ParamDescriptor {
    ParamDescriptor {
        name: "Decay (s)",
        short_name: "Decay",
        unit: ParamUnit::Seconds,
        min: MIN_DECAY_S,
        max: MAX_DECAY_HINT_S,
        default: DEFAULT_DECAY_S,
        id: ParamId(0),
        string_id: "",
    }
    .with_id(ParamId(2), "rev_decay")
}

/// Metadata for the wet-level control.
pub fn wet_level_descriptor() -> ParamDescriptor {
    ParamDescriptor {
        name: "Relative wet signal level",
        short_name: "Wet",
        unit: ParamUnit::Ratio,
        min: MIN_WET_LEVEL,
        max: MAX_WET_LEVEL,
        default: DEFAULT_WET_LEVEL,
        id: ParamId(0),
        string_id: "",
    }
    .with_id(ParamId(3), "rev_wet")
}

/// Effective decay time for a raw control reading.
///
/// NaN falls back to the default; everything else, infinities included, is
/// clamped to [`MIN_DECAY_S`] from below only. An infinite decay gives a
/// weight of exactly 1.
#[inline]
pub fn sanitize_decay(raw: Option<f32>) -> f32 {
    match raw {
        Some(v) if !v.is_nan() => v.max(decay_descriptor().min),
        _ => DEFAULT_DECAY_S,
    }
}

/// Effective wet level for a raw control reading.
///
/// NaN falls back to the default; infinities clamp like any other value.
#[inline]
pub fn sanitize_wet_level(raw: Option<f32>) -> f32 {
    match raw {
        Some(v) if !v.is_nan() => wet_level_descriptor().clamp(v),
        _ => DEFAULT_WET_LEVEL,
    }
}

/// Tracks decay time, wet level and the smoothing weight.
#[derive(Debug, Clone)]
pub struct ParameterController {
    decay_control: Option<ControlValue>,
    wet_level_control: Option<ControlValue>,
    decay_s: f32,
    wet_level: f32,
    /// In (0, 1]. Starts at 1 (no smoothing) until the first recompute.
    weight: f64,
}

impl ParameterController {
    /// Create a controller with both controls unbound.
    pub fn new() -> Self {
        Self {
            decay_control: None,
            wet_level_control: None,
            decay_s: DEFAULT_DECAY_S,
            wet_level: DEFAULT_WET_LEVEL,
            weight: 1.0,
        }
    }

    /// Bind or unbind the decay-time control.
    pub fn bind_decay(&mut self, control: Option<ControlValue>) {
        self.decay_control = control;
    }

    /// Bind or unbind the wet-level control.
    pub fn bind_wet_level(&mut self, control: Option<ControlValue>) {
        self.wet_level_control = control;
    }

    /// Bound decay control, if any.
    pub fn decay_control(&self) -> Option<&ControlValue> {
        self.decay_control.as_ref()
    }

    /// Bound wet-level control, if any.
    pub fn wet_level_control(&self) -> Option<&ControlValue> {
        self.wet_level_control.as_ref()
    }

    /// Re-read the decay control. Returns `true` if the stored value changed.
    pub fn refresh_decay(&mut self) -> bool {
        let decay_s = sanitize_decay(self.decay_control.as_ref().map(ControlValue::get));
        if decay_s != self.decay_s {
            self.decay_s = decay_s;
            true
        } else {
            false
        }
    }

    /// Re-read the wet-level control. Returns `true` if the stored value changed.
    pub fn refresh_wet_level(&mut self) -> bool {
        let wet_level = sanitize_wet_level(self.wet_level_control.as_ref().map(ControlValue::get));
        if wet_level != self.wet_level {
            self.wet_level = wet_level;
            true
        } else {
            false
        }
    }

    /// Refresh the decay and, if it changed or `force` is set, recompute the
    /// weight against `window_duration_s`.
    ///
    /// Returns `true` if the weight was recomputed.
    pub fn refresh_weight(&mut self, window_duration_s: f64, force: bool) -> bool {
        if self.refresh_decay() || force {
            self.weight = exp(-window_duration_s / f64::from(self.decay_s));

            #[cfg(feature = "tracing")]
            tracing::debug!(
                weight = self.weight,
                decay_s = self.decay_s,
                window_duration_s,
                "reverb weight updated"
            );

            true
        } else {
            false
        }
    }

    /// Effective decay time in seconds.
    #[inline]
    pub fn decay_s(&self) -> f32 {
        self.decay_s
    }

    /// Effective wet level.
    #[inline]
    pub fn wet_level(&self) -> f32 {
        self.wet_level
    }

    /// Current smoothing weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Default for ParameterController {
    fn default() -> Self {
        Self::new()
    }
}
