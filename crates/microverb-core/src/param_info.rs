//! Parameter introspection for the engine's control inputs.
//!
//! Control values arrive from the host as plain `f32`s; the metadata here
//! carries their names, units, bounds and defaults so that hosts, presets and
//! validators all agree on them. Parameters are addressed by zero-based index
//! and also carry a stable [`ParamId`].
//!
//! # Example
//!
//! ```rust
//! use microverb_core::{MixingEngine, ParameterInfo};
//!
//! let engine = MixingEngine::new(48000).unwrap();
//! for i in 0..engine.param_count() {
//!     let desc = engine.param_info(i).unwrap();
//!     println!("{}: {} ({} to {})", desc.name, engine.get_param(i), desc.min, desc.max);
//! }
//! ```

/// Unit of a parameter value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Time in seconds.
    Seconds,
    /// Dimensionless ratio (1.0 = unity).
    Ratio,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter; presets
/// and automation refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name, at most 8 characters.
    pub short_name: &'static str,
    /// Unit for formatting.
    pub unit: ParamUnit,
    /// Lower bound. Values below it are clamped.
    pub min: f32,
    /// Upper bound hint. See the individual parameter for whether it clamps.
    pub max: f32,
    /// Value used when no control is bound.
    pub default: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID for presets, e.g. `"rev_decay"`.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to `[min, max]`.
    ///
    /// ```rust
    /// use microverb_core::params::wet_level_descriptor;
    ///
    /// let desc = wet_level_descriptor();
    /// assert_eq!(desc.clamp(0.0), 0.1);
    /// assert_eq!(desc.clamp(100.0), 10.0);
    /// assert_eq!(desc.clamp(2.0), 2.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Trait for types that expose introspectable parameters.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current effective value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoParams;

    impl ParameterInfo for TwoParams {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            let base = ParamDescriptor {
                name: "First",
                short_name: "One",
                unit: ParamUnit::Ratio,
                min: 0.0,
                max: 1.0,
                default: 0.5,
                id: ParamId(0),
                string_id: "",
            };
            match index {
                0 => Some(base.with_id(ParamId(10), "first")),
                1 => Some(
                    ParamDescriptor {
                        name: "Second",
                        short_name: "Two",
                        ..base
                    }
                    .with_id(ParamId(11), "second"),
                ),
                _ => None,
            }
        }

        fn get_param(&self, _index: usize) -> f32 {
            0.0
        }
    }

    #[test]
    fn find_by_name_matches_either_name() {
        let p = TwoParams;
        assert_eq!(p.find_param_by_name("second"), Some(1));
        assert_eq!(p.find_param_by_name("ONE"), Some(0));
        assert_eq!(p.find_param_by_name("third"), None);
    }

    #[test]
    fn find_by_id() {
        let p = TwoParams;
        assert_eq!(p.param_index_by_id(ParamId(11)), Some(1));
        assert_eq!(p.param_index_by_id(ParamId(99)), None);
    }

    #[test]
    fn clamp_bounds_infinities() {
        let desc = TwoParams.param_info(0).unwrap();
        assert_eq!(desc.clamp(0.0), 0.0);
        assert_eq!(desc.clamp(1.0), 1.0);
        assert_eq!(desc.clamp(f32::NEG_INFINITY), 0.0);
        assert_eq!(desc.clamp(f32::INFINITY), 1.0);
    }
}
