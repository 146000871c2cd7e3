//! Integration tests for microverb-config.
//!
//! These tests verify end-to-end functionality across modules: files on disk,
//! factory presets and the engines built from them.

use microverb_config::{
    ConfigError, ReverbPreset, ValidationError, factory_presets, get_factory_preset,
};
use microverb_core::{ControlValue, EngineConfig, EngineState, PortId};
use tempfile::TempDir;

/// Test saving a preset to disk and loading it back.
#[test]
fn test_preset_save_load_roundtrip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("nested").join("hall.toml");

    let preset = ReverbPreset::new("Hall")
        .with_description("Saved and reloaded")
        .with_sample_rate(48000)
        .with_engine_config(&EngineConfig::default().with_pass_count(6))
        .with_decay(2.0)
        .with_wet_level(1.5);

    preset.save(&path).expect("should save preset");
    assert!(path.exists(), "save should create parent directories");

    let loaded = ReverbPreset::load(&path).expect("should load preset");
    assert_eq!(loaded, preset);
}

#[test]
fn test_load_missing_file_reports_path() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("missing.toml");

    match ReverbPreset::load(&path) {
        Err(ConfigError::ReadFile { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ReadFile error, got {other:?}"),
    }
}

#[test]
fn test_load_hand_written_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("plate.toml");
    std::fs::write(
        &path,
        r#"
name = "Plate"
sample_rate = 44000

[controls]
wet_level = 3.0
"#,
    )
    .unwrap();

    let engine = ReverbPreset::load(&path).unwrap().build_engine().unwrap();
    assert_eq!(engine.wet_level(), 3.0);
    assert_eq!(engine.decay_s(), 0.1);
    assert_eq!(engine.window_len(), 440);
}

/// Every factory preset builds an engine that processes audio.
#[test]
fn test_factory_presets_build_and_process() {
    let presets = factory_presets();
    assert!(!presets.is_empty(), "should have factory presets");

    let input: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();
    for preset in presets {
        let mut engine = preset
            .build_engine()
            .unwrap_or_else(|e| panic!("factory preset '{}' failed: {e}", preset.name));
        assert_eq!(engine.state(), EngineState::Active);

        let mut output = vec![0.0f32; input.len()];
        engine.run(&input, &mut output, input.len());

        assert!(output.iter().all(|s| s.is_finite()), "preset '{}'", preset.name);
        assert!(
            output.iter().zip(&input).any(|(o, i)| o != i),
            "preset '{}' produced no wet signal",
            preset.name
        );
    }
}

/// Controls bound from a preset stay live: writing the bound cell changes
/// the engine on the next block.
#[test]
fn test_built_engine_controls_are_live() {
    let mut engine = get_factory_preset("small_room")
        .unwrap()
        .build_engine()
        .unwrap();
    let wet: ControlValue = engine
        .control(PortId::WetLevel)
        .cloned()
        .expect("small_room binds wet level");

    wet.set(4.0);
    let input = [0.1f32; 64];
    let mut output = [0.0f32; 64];
    engine.run(&input, &mut output, 64);
    assert_eq!(engine.wet_level(), 4.0);
}

#[test]
fn test_invalid_file_is_not_built() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
name = "Bad"
[engine]
pass_count = 100
[controls]
decay_s = -1.0
"#,
    )
    .unwrap();

    let preset = ReverbPreset::load(&path).unwrap();
    match preset.build_engine() {
        Err(ConfigError::Validation(ValidationError::Multiple(errors))) => {
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}
