//! Preset demo: factory presets, TOML round trip and rendering an impulse.
//!
//! Run with: cargo run -p microverb-config --example preset_demo

use microverb_config::{
    ReverbPreset, factory_preset_names, get_factory_preset, is_factory_preset, validate_preset,
};

fn main() {
    // --- Factory presets ---
    println!("=== Factory Presets ===\n");

    for name in factory_preset_names() {
        if let Some(preset) = get_factory_preset(name) {
            println!(
                "{:<12} {:<12} {} passes, {:.0} ms microsamples",
                name,
                preset.name,
                preset.engine.pass_count,
                preset.engine.microsample_duration_s * 1000.0
            );
        }
    }

    println!("\nis_factory_preset(\"Long Tail\") = {}", is_factory_preset("Long Tail"));

    // --- Custom preset ---
    println!("\n=== Custom Preset ===\n");

    let preset = ReverbPreset::new("Demo Room")
        .with_description("Medium decay, slightly dry")
        .with_decay(0.4)
        .with_wet_level(0.8);

    match preset.to_toml() {
        Ok(toml) => println!("{toml}"),
        Err(e) => eprintln!("serialization failed: {e}"),
    }

    let broken = ReverbPreset::new("Broken").with_wet_level(25.0);
    if let Err(e) = validate_preset(&broken) {
        println!("Rejected '{}': {e}", broken.name);
    }

    // --- Impulse response energy per 10 ms ---
    println!("\n=== Impulse Response ===\n");

    let mut engine = match preset.build_engine() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("could not build engine: {e}");
            return;
        }
    };

    let block = (preset.sample_rate / 100) as usize;
    let mut input = vec![0.0f32; block];
    input[0] = 1.0;
    let mut output = vec![0.0f32; block];

    for i in 0..8 {
        engine.run(&input, &mut output, block);
        let energy: f32 = output.iter().map(|s| s * s).sum();
        println!("{:>3} ms  {:.6}", i * 10, energy);
        input[0] = 0.0;
    }

    engine.dispose();
}
