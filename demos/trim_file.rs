//! Example: Trim silence from an audio file and save it as 16-bit PCM WAV
//!
//! Usage:
//!   cargo run --example trim_file -- [--threshold T] [--per-frame] <input> <output.wav>

use std::env;

use stratum_pcm::{decode_audio, save_wav, trim_buffer, PcmFormat, TrimConfig, TrimMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut config = TrimConfig::with_threshold(0.01);
    let mut paths: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--threshold" => {
                config.threshold = args
                    .next()
                    .ok_or("--threshold requires a value")?
                    .parse::<f32>()?;
            }
            "--per-frame" => config.mode = TrimMode::PerFrame,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: trim_file [--threshold T] [--per-frame] <input> <output.wav>\n\
                     \n\
                     --threshold T   Silence threshold in linear amplitude (default: 0.01)\n\
                     --per-frame     Trim whole frames instead of single samples\n"
                );
                return Ok(());
            }
            _ => paths.push(arg),
        }
    }

    let [input, output] = paths.as_slice() else {
        eprintln!("ERROR: Provide an input and an output path. Use --help for usage.");
        std::process::exit(2);
    };

    let buffer = decode_audio(input)?;
    let trimmed = trim_buffer(&buffer, &config)?;
    save_wav(output, &trimmed, &PcmFormat::default())?;

    println!("Trim Results:");
    println!("  Channels: {} @ {} Hz", buffer.channel_count(), buffer.sample_rate());
    println!("  Before: {:.3} s", buffer.duration_seconds());
    println!("  After:  {:.3} s", trimmed.duration_seconds());
    println!("  Written: {}", output);

    Ok(())
}
