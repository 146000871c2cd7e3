//! Configuration and preset management for the microverb reverb engine.
//!
//! A [`ReverbPreset`] describes one engine: its sample rate, the pass layout
//! ([`EngineSection`]) and optional control values ([`ControlSection`]).
//! Presets are stored as TOML and turned into a ready-to-run
//! [`MixingEngine`](microverb_core::MixingEngine) with
//! [`ReverbPreset::build_engine`].
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Check sample rate, pass layout and control ranges
//! - **Factory Presets**: Built-in presets for common room sizes
//!
//! # Example
//!
//! ```rust,no_run
//! use microverb_config::{ReverbPreset, get_factory_preset};
//!
//! // Load a preset from file
//! let preset = ReverbPreset::load("hall.toml").unwrap();
//!
//! // Or start from a factory preset and tweak it
//! let preset = get_factory_preset("small_room")
//!     .unwrap()
//!     .with_wet_level(0.8);
//! preset.save("my_room.toml").unwrap();
//!
//! let mut engine = preset.build_engine().unwrap();
//! let input = vec![0.0f32; 512];
//! let mut output = vec![0.0f32; 512];
//! engine.run(&input, &mut output, 512);
//! ```

mod error;
mod preset;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use preset::{ControlSection, EngineSection, ReverbPreset};
pub use validation::{ValidationError, ValidationResult, validate_preset};
