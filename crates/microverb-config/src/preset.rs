//! Preset file format and operations.

use microverb_core::{
    ControlValue, DEFAULT_DELAY_FACTORS, DEFAULT_MICROSAMPLE_DURATION_S, DEFAULT_PASS_COUNT,
    EngineConfig, MixingEngine, PortId,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_preset;

/// Reverb preset: one engine configuration plus control values.
///
/// # TOML Format
///
/// ```toml
/// name = "Small Room"
/// description = "Short, dense reflections"
/// sample_rate = 44100
///
/// [engine]
/// microsample_duration_s = 0.01
/// pass_count = 4
/// delay_factors = [1.0, 1.1765, 1.353, 1.5295]
///
/// [controls]
/// decay_s = 0.1
/// wet_level = 1.0
/// ```
///
/// Every field except `name` may be omitted. A missing control leaves that
/// port unbound, so the engine's default applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReverbPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the engine is built for (defaults to 44100).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Pass layout.
    #[serde(default)]
    pub engine: EngineSection,

    /// Control values bound at build time.
    #[serde(default)]
    pub controls: ControlSection,
}

fn default_sample_rate() -> u32 {
    44100
}

/// `[engine]` table of a preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSection {
    /// Base window duration in seconds.
    #[serde(default = "default_microsample_duration_s")]
    pub microsample_duration_s: f64,

    /// Number of passes per block.
    #[serde(default = "default_pass_count")]
    pub pass_count: usize,

    /// Per-pass window scale factors, cycled when shorter than `pass_count`.
    #[serde(default = "default_delay_factors")]
    pub delay_factors: Vec<f64>,
}

fn default_microsample_duration_s() -> f64 {
    DEFAULT_MICROSAMPLE_DURATION_S
}

fn default_pass_count() -> usize {
    DEFAULT_PASS_COUNT
}

fn default_delay_factors() -> Vec<f64> {
    DEFAULT_DELAY_FACTORS.to_vec()
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            microsample_duration_s: default_microsample_duration_s(),
            pass_count: default_pass_count(),
            delay_factors: default_delay_factors(),
        }
    }
}

impl From<&EngineConfig> for EngineSection {
    fn from(config: &EngineConfig) -> Self {
        Self {
            microsample_duration_s: config.microsample_duration_s(),
            pass_count: config.pass_count(),
            delay_factors: config.delay_factors().to_vec(),
        }
    }
}

impl EngineSection {
    /// Convert to an engine configuration. Not validated here.
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_microsample_duration_s(self.microsample_duration_s)
            .with_pass_count(self.pass_count)
            .with_delay_factors(&self.delay_factors)
    }
}

/// `[controls]` table of a preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlSection {
    /// Decay time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_s: Option<f32>,

    /// Relative wet level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wet_level: Option<f32>,
}

impl ReverbPreset {
    /// Create a preset with the default engine layout and no controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            engine: EngineSection::default(),
            controls: ControlSection::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Take the pass layout from an engine configuration.
    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.engine = EngineSection::from(config);
        self
    }

    /// Set the decay time control.
    pub fn with_decay(mut self, decay_s: f32) -> Self {
        self.controls.decay_s = Some(decay_s);
        self
    }

    /// Set the wet level control.
    pub fn with_wet_level(mut self, wet_level: f32) -> Self {
        self.controls.wet_level = Some(wet_level);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Engine configuration described by the `[engine]` table.
    pub fn engine_config(&self) -> EngineConfig {
        self.engine.to_config()
    }

    /// Validate the preset and build an activated engine from it.
    ///
    /// Every control present in the preset is bound to its own
    /// [`ControlValue`]; fetch it with
    /// [`MixingEngine::control`] to automate it later.
    pub fn build_engine(&self) -> Result<MixingEngine, ConfigError> {
        validate_preset(self)?;

        let mut engine = MixingEngine::with_config(self.sample_rate, self.engine_config())?;
        if let Some(decay_s) = self.controls.decay_s {
            engine.connect_control(PortId::Decay.index(), ControlValue::new(decay_s))?;
        }
        if let Some(wet_level) = self.controls.wet_level {
            engine.connect_control(PortId::WetLevel.index(), ControlValue::new(wet_level))?;
        }
        engine.activate();
        Ok(engine)
    }
}

impl Default for ReverbPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microverb_core::EngineState;

    #[test]
    fn test_preset_new() {
        let preset = ReverbPreset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert_eq!(preset.sample_rate, 44100);
        assert_eq!(preset.engine, EngineSection::default());
        assert_eq!(preset.controls, ControlSection::default());
    }

    #[test]
    fn test_preset_builder() {
        let config = EngineConfig::default().with_pass_count(2);
        let preset = ReverbPreset::new("Builder")
            .with_description("built in code")
            .with_sample_rate(48000)
            .with_engine_config(&config)
            .with_decay(0.7)
            .with_wet_level(2.0);

        assert_eq!(preset.description.as_deref(), Some("built in code"));
        assert_eq!(preset.sample_rate, 48000);
        assert_eq!(preset.engine.pass_count, 2);
        assert_eq!(preset.controls.decay_s, Some(0.7));
        assert_eq!(preset.controls.wet_level, Some(2.0));
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
name = "Hall"
description = "Long and wide"
sample_rate = 48000

[engine]
microsample_duration_s = 0.02
pass_count = 3
delay_factors = [1.0, 1.5]

[controls]
decay_s = 2.5
wet_level = 0.6
"#;

        let preset = ReverbPreset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Hall");
        assert_eq!(preset.sample_rate, 48000);
        assert_eq!(preset.engine.microsample_duration_s, 0.02);
        assert_eq!(preset.engine.pass_count, 3);
        assert_eq!(preset.engine.delay_factors, vec![1.0, 1.5]);
        assert_eq!(preset.controls.decay_s, Some(2.5));
        assert_eq!(preset.controls.wet_level, Some(0.6));

        let config = preset.engine_config();
        assert_eq!(config.delay_factor(2), 1.0);
        assert_eq!(config.window_length(48000, 1), 1440);
    }

    #[test]
    fn test_minimal_toml() {
        let preset = ReverbPreset::from_toml("name = \"Minimal\"").unwrap();
        assert_eq!(preset.name, "Minimal");
        assert_eq!(preset.sample_rate, 44100);
        assert_eq!(preset.engine.pass_count, DEFAULT_PASS_COUNT);
        assert_eq!(preset.engine.delay_factors, DEFAULT_DELAY_FACTORS.to_vec());
        assert!(preset.controls.decay_s.is_none());
        assert!(preset.controls.wet_level.is_none());
    }

    #[test]
    fn test_partial_engine_table() {
        let toml = r#"
name = "Two passes"
[engine]
pass_count = 2
"#;
        let preset = ReverbPreset::from_toml(toml).unwrap();
        assert_eq!(preset.engine.pass_count, 2);
        assert_eq!(
            preset.engine.microsample_duration_s,
            DEFAULT_MICROSAMPLE_DURATION_S
        );
    }

    #[test]
    fn test_unset_controls_not_serialized() {
        let toml = ReverbPreset::new("Bare").with_wet_level(0.5).to_toml().unwrap();
        assert!(toml.contains("name = \"Bare\""));
        assert!(toml.contains("wet_level = 0.5"));
        assert!(!toml.contains("decay_s"));
        assert!(!toml.contains("description"));
    }

    #[test]
    fn test_preset_roundtrip() {
        let original = ReverbPreset::new("Roundtrip")
            .with_description("serialization")
            .with_sample_rate(96000)
            .with_decay(1.25)
            .with_wet_level(0.5);

        let parsed = ReverbPreset::from_toml(&original.to_toml().unwrap()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = ReverbPreset::from_toml("name = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));

        let err = ReverbPreset::from_toml("name = \"x\"\n[engine]\npass_count = \"four\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_build_engine_binds_present_controls() {
        let engine = ReverbPreset::new("Bound")
            .with_sample_rate(44000)
            .with_decay(0.5)
            .build_engine()
            .unwrap();

        assert_eq!(engine.state(), EngineState::Active);
        assert_eq!(engine.sample_rate(), 44000);
        assert_eq!(engine.window_len(), 440);
        assert_eq!(engine.decay_s(), 0.5);
        assert!(engine.control(PortId::Decay).is_some());
        assert!(engine.control(PortId::WetLevel).is_none());
    }

    #[test]
    fn test_build_engine_rejects_invalid_preset() {
        let preset = ReverbPreset::new("Broken").with_sample_rate(0);
        assert!(matches!(
            preset.build_engine(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_preset_default() {
        let preset = ReverbPreset::default();
        assert_eq!(preset.name, "Untitled");
    }
}
