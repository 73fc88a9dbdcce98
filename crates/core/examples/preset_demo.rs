//! Example building a processing chain from a TOML preset
//!
//! Run with: cargo run --package compandor-core --example preset_demo

use compandor_core::{ChainPreset, Compressor, CompressorConfig};

const PRESET: &str = r#"
[[processors]]
type = "NoiseGate"
[processors.params]
sample_rate = 48000
threshold_db = -50.0
attack_sec = 0.001
release_sec = 0.05

[[processors]]
type = "Compressor"
[processors.params]
sample_rate = 48000
threshold_db = -18.0
attack_sec = 0.005
release_sec = 0.1
ratio = 4.0
knee_width_db = 6.0

[[processors]]
type = "Limiter"
[processors.params]
sample_rate = 48000
threshold_db = -1.0
attack_sec = 0.001
release_sec = 0.05
"#;

fn peak_db(buffer: &[f32]) -> f32 {
    let peak = buffer.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    20.0 * peak.max(1e-6).log10()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("compandor_core=debug,info")
        .init();

    println!("=== Dynamics Preset Demo ===\n");

    // 1. Parse and build the chain
    let preset = ChainPreset::from_toml_str(PRESET)?;
    let mut chain = preset.build()?;
    println!("1. Chain: {}", chain.names().join(" -> "));

    // 2. Run a loud burst followed by hiss
    let mut signal: Vec<f32> = (0..48000)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * 220.0 * i as f32 / 48000.0;
            let level = if i < 24000 { 0.9 } else { 0.001 };
            level * phase.sin()
        })
        .collect();
    chain.process(&mut signal);
    println!("2. Burst peak after chain: {:.1} dBFS", peak_db(&signal[12000..24000]));
    println!("   Hiss peak after chain:  {:.1} dBFS", peak_db(&signal[40000..]));

    // 3. Reconfigure a standalone compressor without losing its state
    let mut compressor = Compressor::new(CompressorConfig::default())?;
    let mut loud = vec![0.8; 4800];
    compressor.process(&mut loud);
    println!("\n3. Gain change before reconfiguration: {:.2} dB", compressor.gain_db());

    compressor.set_configuration(CompressorConfig {
        ratio: 8.0,
        ..CompressorConfig::default()
    })?;
    println!("   Makeup gain after reconfiguration:  {:.2} dB", compressor.makeup_gain_db());
    println!("   Gain change kept:                   {:.2} dB", compressor.gain_db());

    // 4. Write the preset back out
    println!("\n4. Preset as TOML:\n{}", preset.to_toml_string()?);

    Ok(())
}
