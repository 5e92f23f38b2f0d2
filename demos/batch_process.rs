//! Example: Trim and re-encode multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example batch_process -- [--jobs N] [--json] [--threshold T] --out DIR <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each trim/encode call is single-threaded and
//!   shares nothing with the others.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.
//! - Files are always trimmed per frame so multi-channel output stays encodable.
//! - JSONL output includes the header read back from each written file.

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use stratum_pcm::{
    decode_audio, save_wav, trim_buffer, PcmError, PcmFormat, TrimConfig, TrimMode, WavHeader,
    HEADER_SIZE,
};

#[derive(Serialize)]
struct ItemOut {
    file: String,
    output: Option<String>,
    input_seconds: f32,
    output_seconds: f32,
    processing_time_ms: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<WavHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn output_path(out_dir: &Path, input: &str) -> PathBuf {
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{}.wav", stem))
}

fn read_header(path: &Path) -> Result<WavHeader, PcmError> {
    let mut bytes = [0u8; HEADER_SIZE];
    File::open(path)?.read_exact(&mut bytes)?;
    WavHeader::parse(&bytes)
}

fn process(path: &str, out_dir: &Path, config: &TrimConfig) -> ItemOut {
    let t0 = Instant::now();
    let target = output_path(out_dir, path);

    let result = decode_audio(path).and_then(|buffer| {
        let trimmed = trim_buffer(&buffer, config)?;
        save_wav(&target, &trimmed, &PcmFormat::default())?;
        let header = read_header(&target)?;
        Ok((buffer.duration_seconds(), trimmed.duration_seconds(), header))
    });

    let processing_time_ms = t0.elapsed().as_secs_f32() * 1000.0;
    match result {
        Ok((input_seconds, output_seconds, header)) => ItemOut {
            file: path.to_string(),
            output: Some(target.display().to_string()),
            input_seconds,
            output_seconds,
            processing_time_ms,
            header: Some(header),
            error: None,
        },
        Err(e) => ItemOut {
            file: path.to_string(),
            output: None,
            input_seconds: 0.0,
            output_seconds: 0.0,
            processing_time_ms,
            header: None,
            error: Some(e.to_string()),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut out_dir: Option<PathBuf> = None;
    let mut config = TrimConfig {
        threshold: 0.01,
        mode: TrimMode::PerFrame,
    };
    let mut paths: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args.next().ok_or("--jobs requires a value")?.parse::<usize>()?;
                jobs = Some(std::cmp::max(1, v));
            }
            "--threshold" => {
                config.threshold = args
                    .next()
                    .ok_or("--threshold requires a value")?
                    .parse::<f32>()?;
            }
            "--out" => {
                out_dir = Some(PathBuf::from(args.next().ok_or("--out requires a value")?));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: batch_process [--jobs N] [--json] [--threshold T] --out DIR <file1> <file2> ...\n\
                     \n\
                     --jobs N        Parallel workers (default: CPU-1)\n\
                     --json          Emit one JSON object per line (JSONL)\n\
                     --threshold T   Silence threshold (default: 0.01)\n\
                     --out DIR       Output directory (created if missing)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    let Some(out_dir) = out_dir else {
        eprintln!("ERROR: --out is required. Use --help for usage.");
        std::process::exit(2);
    };
    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| process(path, &out_dir, &config))
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
        } else if let Some(err) = &o.error {
            println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.file, err);
        } else {
            println!(
                "[{}/{}] {}: {:.2}s -> {:.2}s time={:.2}ms",
                idx + 1,
                outs.len(),
                o.file,
                o.input_seconds,
                o.output_seconds,
                o.processing_time_ms
            );
        }
    }

    let ok = outs.iter().filter(|o| o.error.is_none()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
