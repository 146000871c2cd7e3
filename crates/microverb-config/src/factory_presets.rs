//! Factory presets bundled with the microverb library.
//!
//! These presets are always available without external files and serve as
//! starting points for user presets.

use crate::ReverbPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["init", "small_room", "long_tail", "ambience"];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("long_tail", LONG_TAIL_PRESET),
    ("ambience", AMBIENCE_PRESET),
];

/// Initialization preset - engine defaults, controls unbound.
const INIT_PRESET: &str = r#"
name = "Init"
description = "Default engine layout; decay and wet level at their defaults"
sample_rate = 44100

[engine]
microsample_duration_s = 0.01
pass_count = 4
delay_factors = [1.0, 1.1765, 1.353, 1.5295]
"#;

/// Short, dense room.
const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short decay with tight 5 ms microsamples"
sample_rate = 44100

[engine]
microsample_duration_s = 0.005
pass_count = 4
delay_factors = [1.0, 1.1765, 1.353, 1.5295]

[controls]
decay_s = 0.05
wet_level = 0.6
"#;

/// Long decay with more passes.
const LONG_TAIL_PRESET: &str = r#"
name = "Long Tail"
description = "Slow decay spread over six passes"
sample_rate = 48000

[engine]
microsample_duration_s = 0.02
pass_count = 6
delay_factors = [1.0, 1.1765, 1.353, 1.5295]

[controls]
decay_s = 3.0
wet_level = 1.5
"#;

/// Wide, diffuse wash with staggered windows.
const AMBIENCE_PRESET: &str = r#"
name = "Ambience"
description = "Long microsamples and staggered windows for a diffuse wash"
sample_rate = 48000

[engine]
microsample_duration_s = 0.03
pass_count = 5
delay_factors = [1.0, 1.25, 1.6, 2.0, 2.5]

[controls]
decay_s = 1.2
wet_level = 2.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use microverb_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<ReverbPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| ReverbPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitive.
///
/// # Example
///
/// ```rust
/// use microverb_config::get_factory_preset;
///
/// let room = get_factory_preset("small_room").unwrap();
/// assert_eq!(room.name, "Small Room");
/// assert!(get_factory_preset("Small Room").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<ReverbPreset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return ReverbPreset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name matches a factory preset (identifier or display name).
///
/// ```rust
/// use microverb_config::is_factory_preset;
///
/// assert!(is_factory_preset("long_tail"));
/// assert!(is_factory_preset("Long Tail"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_preset;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESETS_TOML.len());
    }

    #[test]
    fn test_factory_preset_names_match_table() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES.to_vec());
    }

    #[test]
    fn test_get_factory_preset() {
        assert_eq!(get_factory_preset("init").unwrap().name, "Init");
        assert_eq!(get_factory_preset("LONG_TAIL").unwrap().name, "Long Tail");
        assert_eq!(get_factory_preset("ambience").unwrap().engine.pass_count, 5);
        assert!(get_factory_preset("cathedral").is_none());
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for preset in factory_presets() {
            assert!(
                validate_preset(&preset).is_ok(),
                "factory preset '{}' failed validation: {:?}",
                preset.name,
                validate_preset(&preset)
            );
        }
    }

    #[test]
    fn test_init_preset_leaves_controls_unbound() {
        let init = get_factory_preset("init").unwrap();
        assert!(init.controls.decay_s.is_none());
        assert!(init.controls.wet_level.is_none());
        assert_eq!(init.engine, crate::EngineSection::default());
    }
}
