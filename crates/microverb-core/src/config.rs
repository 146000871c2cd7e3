//! Engine configuration: base window length, pass count and delay factors.
//!
//! Each pass of the engine smooths the block into a window whose length is
//! the microsample duration scaled by that pass's delay factor. The default
//! table holds four factors spaced 0.1765 apart; passes beyond the table
//! length cycle through it.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use libm::round;

use crate::error::EngineError;

/// Base window duration in seconds before per-pass scaling.
pub const DEFAULT_MICROSAMPLE_DURATION_S: f64 = 0.01;
/// Number of passes per block.
pub const DEFAULT_PASS_COUNT: usize = 4;
/// Spacing between consecutive default delay factors.
pub const DELAY_FACTOR_STEP: f64 = 0.1765;
/// Default delay factors, `1 + 0.1765 * k` for `k` in `0..4`.
///
/// Written out as literals so they match the same numbers in a TOML file
/// bit for bit.
pub const DEFAULT_DELAY_FACTORS: [f64; 4] = [1.0, 1.1765, 1.353, 1.5295];

/// Longest accepted microsample duration in seconds.
pub const MAX_MICROSAMPLE_DURATION_S: f64 = 1.0;
/// Largest accepted pass count.
pub const MAX_PASS_COUNT: usize = 64;
/// Largest accepted delay factor.
pub const MAX_DELAY_FACTOR: f64 = 8.0;

/// Tunable constants of the mixing algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    microsample_duration_s: f64,
    pass_count: usize,
    delay_factors: Vec<f64>,
}

impl EngineConfig {
    /// Configuration matching the reference engine.
    pub fn new() -> Self {
        Self {
            microsample_duration_s: DEFAULT_MICROSAMPLE_DURATION_S,
            pass_count: DEFAULT_PASS_COUNT,
            delay_factors: DEFAULT_DELAY_FACTORS.to_vec(),
        }
    }

    /// Set the base window duration in seconds.
    pub fn with_microsample_duration_s(mut self, duration_s: f64) -> Self {
        self.microsample_duration_s = duration_s;
        self
    }

    /// Set the number of passes per block.
    pub fn with_pass_count(mut self, pass_count: usize) -> Self {
        self.pass_count = pass_count;
        self
    }

    /// Replace the delay-factor table.
    pub fn with_delay_factors(mut self, factors: &[f64]) -> Self {
        self.delay_factors = factors.to_vec();
        self
    }

    /// Base window duration in seconds.
    #[inline]
    pub fn microsample_duration_s(&self) -> f64 {
        self.microsample_duration_s
    }

    /// Number of passes per block.
    #[inline]
    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// The delay-factor table.
    #[inline]
    pub fn delay_factors(&self) -> &[f64] {
        &self.delay_factors
    }

    /// Delay factor for `pass`, cycling through the table.
    #[inline]
    pub fn delay_factor(&self, pass: usize) -> f64 {
        self.delay_factors[pass % self.delay_factors.len()]
    }

    /// Window length in samples for `pass`.
    pub fn window_length(&self, sample_rate: u32, pass: usize) -> usize {
        self.scaled_length(sample_rate, self.delay_factor(pass))
    }

    /// Window length at activation (delay factor 1).
    pub fn base_window_length(&self, sample_rate: u32) -> usize {
        self.scaled_length(sample_rate, 1.0)
    }

    /// Longest window any pass or activation will request.
    pub fn max_window_length(&self, sample_rate: u32) -> usize {
        self.delay_factors
            .iter()
            .map(|&factor| self.scaled_length(sample_rate, factor))
            .fold(self.base_window_length(sample_rate), usize::max)
    }

    // Never zero: the streaming loop writes at least one sample per refill.
    fn scaled_length(&self, sample_rate: u32, factor: f64) -> usize {
        let length = round(self.microsample_duration_s * factor * f64::from(sample_rate));
        (length as usize).max(1)
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), EngineError> {
        let d = self.microsample_duration_s;
        if !d.is_finite() || d <= 0.0 || d > MAX_MICROSAMPLE_DURATION_S {
            return Err(EngineError::InvalidConfig {
                field: "microsample_duration_s",
                reason: "must be finite and in (0, 1] seconds",
            });
        }
        if self.pass_count == 0 || self.pass_count > MAX_PASS_COUNT {
            return Err(EngineError::InvalidConfig {
                field: "pass_count",
                reason: "must be between 1 and 64",
            });
        }
        if self.delay_factors.is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "delay_factors",
                reason: "must contain at least one factor",
            });
        }
        if self
            .delay_factors
            .iter()
            .any(|&f| !f.is_finite() || f <= 0.0 || f > MAX_DELAY_FACTOR)
        {
            return Err(EngineError::InvalidConfig {
                field: "delay_factors",
                reason: "every factor must be finite and in (0, 8]",
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_lengths_at_44k() {
        let config = EngineConfig::default();
        let lengths: Vec<usize> = (0..4).map(|p| config.window_length(44000, p)).collect();
        assert_eq!(lengths, [440, 518, 595, 673]);
        assert_eq!(config.base_window_length(44000), 440);
        assert_eq!(config.max_window_length(44000), 673);
    }

    #[test]
    fn default_factors_are_evenly_spaced() {
        for (k, &factor) in DEFAULT_DELAY_FACTORS.iter().enumerate() {
            assert!((factor - (1.0 + DELAY_FACTOR_STEP * k as f64)).abs() < 1e-12);
        }
    }

    #[test]
    fn passes_cycle_through_factor_table() {
        let config = EngineConfig::default().with_pass_count(9);
        assert_eq!(config.delay_factor(4), config.delay_factor(0));
        assert_eq!(config.delay_factor(7), config.delay_factor(3));
        assert_eq!(config.window_length(48000, 5), config.window_length(48000, 1));
    }

    #[test]
    fn tiny_windows_never_reach_zero() {
        let config = EngineConfig::default().with_microsample_duration_s(1e-6);
        assert_eq!(config.window_length(8000, 0), 1);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_duration() {
        for d in [0.0, -0.01, f64::NAN, f64::INFINITY, 2.0] {
            let err = EngineConfig::default()
                .with_microsample_duration_s(d)
                .validate()
                .unwrap_err();
            assert!(matches!(
                err,
                EngineError::InvalidConfig {
                    field: "microsample_duration_s",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_bad_pass_count() {
        assert!(EngineConfig::default().with_pass_count(0).validate().is_err());
        assert!(EngineConfig::default().with_pass_count(65).validate().is_err());
        assert!(EngineConfig::default().with_pass_count(64).validate().is_ok());
    }

    #[test]
    fn rejects_bad_delay_factors() {
        assert!(EngineConfig::default().with_delay_factors(&[]).validate().is_err());
        assert!(EngineConfig::default().with_delay_factors(&[1.0, -1.0]).validate().is_err());
        assert!(EngineConfig::default().with_delay_factors(&[9.0]).validate().is_err());
        assert!(EngineConfig::default().with_delay_factors(&[0.5, 2.0]).validate().is_ok());
    }
}
