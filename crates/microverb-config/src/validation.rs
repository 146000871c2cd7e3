//! Preset validation.
//!
//! The engine itself never rejects a control value: it clamps. A preset file
//! is different. A decay of `-3` or a wet level of `40` in a file on disk is
//! almost certainly a typo, so [`validate_preset`] reports it instead of
//! letting the engine silently clamp it.
//!
//! # Example
//!
//! ```rust
//! use microverb_config::{ReverbPreset, validate_preset};
//!
//! let preset = ReverbPreset::new("Room").with_decay(0.4);
//! validate_preset(&preset).expect("preset should be valid");
//! ```

use microverb_core::config::{MAX_DELAY_FACTOR, MAX_MICROSAMPLE_DURATION_S, MAX_PASS_COUNT};
use microverb_core::{MAX_WET_LEVEL, MIN_DECAY_S, MIN_WET_LEVEL};
use thiserror::Error;

use crate::ReverbPreset;

/// Lowest sample rate a preset may declare.
pub const MIN_SAMPLE_RATE: u32 = 8000;
/// Highest sample rate a preset may declare.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate outside the supported range.
    #[error("sample rate {rate} Hz out of range [{min}, {max}]")]
    SampleRate {
        /// Declared rate.
        rate: u32,
        /// Minimum allowed rate.
        min: u32,
        /// Maximum allowed rate.
        max: u32,
    },

    /// Numeric value out of range.
    #[error("'{field}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted path of the offending field.
        field: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Value that is not a finite number.
    #[error("'{field}' must be a finite number, got {value}")]
    NotFinite {
        /// Dotted path of the offending field.
        field: String,
        /// The offending value.
        value: f64,
    },

    /// The delay-factor table has no entries.
    #[error("'engine.delay_factors' must contain at least one factor")]
    EmptyDelayFactors,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
    min_inclusive: bool,
) {
    if !value.is_finite() {
        errors.push(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        });
        return;
    }
    let above_min = if min_inclusive { value >= min } else { value > min };
    if !above_min || value > max {
        errors.push(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
}

/// Validate a complete preset.
///
/// Checks the sample rate, every field of the `[engine]` table and every
/// control that is present. All problems are collected; more than one is
/// reported as [`ValidationError::Multiple`].
pub fn validate_preset(preset: &ReverbPreset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&preset.sample_rate) {
        errors.push(ValidationError::SampleRate {
            rate: preset.sample_rate,
            min: MIN_SAMPLE_RATE,
            max: MAX_SAMPLE_RATE,
        });
    }

    let engine = &preset.engine;
    check_range(
        &mut errors,
        "engine.microsample_duration_s",
        engine.microsample_duration_s,
        0.0,
        MAX_MICROSAMPLE_DURATION_S,
        false,
    );
    if engine.pass_count == 0 || engine.pass_count > MAX_PASS_COUNT {
        errors.push(ValidationError::OutOfRange {
            field: "engine.pass_count".to_string(),
            value: engine.pass_count as f64,
            min: 1.0,
            max: MAX_PASS_COUNT as f64,
        });
    }
    if engine.delay_factors.is_empty() {
        errors.push(ValidationError::EmptyDelayFactors);
    }
    for (i, &factor) in engine.delay_factors.iter().enumerate() {
        check_range(
            &mut errors,
            &format!("engine.delay_factors[{i}]"),
            factor,
            0.0,
            MAX_DELAY_FACTOR,
            false,
        );
    }

    // Decay has no upper bound: long tails are legitimate.
    if let Some(decay_s) = preset.controls.decay_s {
        check_range(
            &mut errors,
            "controls.decay_s",
            f64::from(decay_s),
            f64::from(MIN_DECAY_S),
            f64::MAX,
            true,
        );
    }
    if let Some(wet_level) = preset.controls.wet_level {
        check_range(
            &mut errors,
            "controls.wet_level",
            f64::from(wet_level),
            f64::from(MIN_WET_LEVEL),
            f64::from(MAX_WET_LEVEL),
            true,
        );
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
