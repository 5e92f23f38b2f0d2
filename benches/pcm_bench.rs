//! Performance benchmarks for trimming and encoding

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stratum_pcm::{encode_to_vec, trim_buffer, AudioBuffer, PcmFormat, TrimConfig, TrimMode};

/// 30 seconds of stereo 44.1 kHz audio with a second of silence at each end
fn synthetic_buffer() -> AudioBuffer {
    let sample_rate = 44100;
    let frames = sample_rate * 30;
    let samples: Vec<f32> = (0..frames)
        .flat_map(|i| {
            let value = if i < sample_rate || i >= frames - sample_rate {
                0.0
            } else {
                (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / sample_rate as f32).sin() * 0.5
            };
            [value, value]
        })
        .collect();
    AudioBuffer::new(samples, 2, sample_rate as u32).expect("Synthetic buffer is frame-aligned")
}

fn bench_encode(c: &mut Criterion) {
    let buffer = synthetic_buffer();
    let format = PcmFormat::default();

    c.bench_function("encode_to_vec_30s_stereo", |b| {
        b.iter(|| {
            let _ = encode_to_vec(black_box(&buffer), black_box(&format));
        });
    });
}

fn bench_trim(c: &mut Criterion) {
    let buffer = synthetic_buffer();
    let per_sample = TrimConfig::with_threshold(0.01);
    let per_frame = TrimConfig {
        threshold: 0.01,
        mode: TrimMode::PerFrame,
    };

    c.bench_function("trim_per_sample_30s_stereo", |b| {
        b.iter(|| {
            let _ = trim_buffer(black_box(&buffer), black_box(&per_sample));
        });
    });

    c.bench_function("trim_per_frame_30s_stereo", |b| {
        b.iter(|| {
            let _ = trim_buffer(black_box(&buffer), black_box(&per_frame));
        });
    });
}

criterion_group!(benches, bench_encode, bench_trim);
criterion_main!(benches);
