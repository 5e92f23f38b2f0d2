//! Silence trimming utilities
//!
//! Removes leading and trailing near-silence from a buffer. A sample is
//! silent when its magnitude does not exceed the threshold.
//!
//! Algorithm (per sample):
//! 1. Forward scan: drop samples up to the first loud one
//! 2. Reverse scan over the remainder: drop trailing silent samples, never
//!    going below index 1, so the first remaining sample is always kept
//!
//! The input is never modified; trimming produces a new [`AudioBuffer`].
//!
//! # Example
//!
//! ```
//! use stratum_pcm::preprocessing::silence::trim_silence;
//!
//! let trimmed = trim_silence(&[0.0, 0.0, 0.5, -0.5, 0.0], 0.1, 1, 44100)?;
//! assert_eq!(trimmed.samples(), &[0.5, -0.5]);
//! # Ok::<(), stratum_pcm::PcmError>(())
//! ```

use std::ops::Range;

use crate::config::{TrimConfig, TrimMode};
use crate::error::PcmError;
use crate::io::audio_buffer::{validate_layout, AudioBuffer};

/// A sample is loud when its magnitude exceeds the threshold; NaN is never loud
fn is_loud(sample: f32, threshold: f32) -> bool {
    sample.abs() > threshold
}

fn validate_threshold(threshold: f32) -> Result<(), PcmError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(PcmError::InvalidInput(format!(
            "Silence threshold must be >= 0, got {}",
            threshold
        )));
    }
    Ok(())
}

/// Range of samples kept by per-sample trimming
///
/// Empty (at `samples.len()`) when every sample is silent.
pub fn silence_bounds(samples: &[f32], threshold: f32) -> Range<usize> {
    let start = samples
        .iter()
        .position(|&s| is_loud(s, threshold))
        .unwrap_or(samples.len());

    let rest = &samples[start..];
    let mut end = rest.len();
    while end > 1 && !is_loud(rest[end - 1], threshold) {
        end -= 1;
    }

    start..start + end
}

/// Range of samples kept by per-frame trimming
///
/// A frame is loud if any of its channels is loud. Bounds are always on frame
/// boundaries. `samples` must hold whole frames.
fn frame_silence_bounds(samples: &[f32], channel_count: usize, threshold: f32) -> Range<usize> {
    let frames: Vec<&[f32]> = samples.chunks_exact(channel_count).collect();
    let frame_is_loud = |frame: &[f32]| frame.iter().any(|&s| is_loud(s, threshold));

    let start = frames
        .iter()
        .position(|f| frame_is_loud(*f))
        .unwrap_or(frames.len());

    let rest = &frames[start..];
    let mut end = rest.len();
    while end > 1 && !frame_is_loud(rest[end - 1]) {
        end -= 1;
    }

    start * channel_count..(start + end) * channel_count
}

/// Trim leading and trailing silence from interleaved samples, one sample at a time
///
/// # Arguments
///
/// * `samples` - Interleaved audio samples (left untouched)
/// * `threshold` - Magnitudes <= threshold are silent; 0.0 trims only exact zeros
/// * `channel_count` - Channel count of the result
/// * `sample_rate` - Sample rate of the result in Hz
///
/// # Returns
///
/// A new buffer holding the kept samples. All-silent input yields an empty
/// buffer. For multi-channel input the scan ignores frame boundaries, so the
/// result may hold a partial frame at either end; such a buffer is rejected
/// by the encoder. Use [`TrimMode::PerFrame`] via [`trim_buffer`] to keep
/// frames intact.
///
/// # Errors
///
/// Returns `PcmError::InvalidInput` for a negative or NaN threshold, or a zero
/// channel count or sample rate.
pub fn trim_silence(
    samples: &[f32],
    threshold: f32,
    channel_count: u16,
    sample_rate: u32,
) -> Result<AudioBuffer, PcmError> {
    validate_threshold(threshold)?;
    validate_layout(channel_count, sample_rate)?;

    let kept = silence_bounds(samples, threshold);
    log_trim(samples.len(), &kept, threshold);

    let trimmed =
        AudioBuffer::from_parts_unaligned(samples[kept].to_vec(), channel_count, sample_rate);

    if !trimmed.is_frame_aligned() {
        log::warn!(
            "Per-sample trim left {} samples, not a whole number of {}-channel frames",
            trimmed.len(),
            channel_count
        );
    }

    Ok(trimmed)
}

/// Trim leading and trailing silence from a buffer using `config`
///
/// # Errors
///
/// Returns `PcmError::InvalidInput` for an invalid threshold, or when
/// `TrimMode::PerFrame` is given a buffer with a partial frame.
pub fn trim_buffer(buffer: &AudioBuffer, config: &TrimConfig) -> Result<AudioBuffer, PcmError> {
    match config.mode {
        TrimMode::PerSample => trim_silence(
            buffer.samples(),
            config.threshold,
            buffer.channel_count(),
            buffer.sample_rate(),
        ),
        TrimMode::PerFrame => {
            validate_threshold(config.threshold)?;
            if !buffer.is_frame_aligned() {
                return Err(PcmError::InvalidInput(format!(
                    "{} samples is not a whole number of {}-channel frames",
                    buffer.len(),
                    buffer.channel_count()
                )));
            }

            let kept = frame_silence_bounds(
                buffer.samples(),
                buffer.channel_count() as usize,
                config.threshold,
            );
            log_trim(buffer.len(), &kept, config.threshold);

            AudioBuffer::new(
                buffer.samples()[kept].to_vec(),
                buffer.channel_count(),
                buffer.sample_rate(),
            )
        }
    }
}

fn log_trim(total: usize, kept: &Range<usize>, threshold: f32) {
    log::debug!(
        "Trimmed silence at threshold {:.4}: {} leading, {} trailing, {} of {} samples kept",
        threshold,
        kept.start,
        total - kept.end,
        kept.len(),
        total
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_reference_scenario() {
        let samples = [0.0, 0.0, 0.5, -0.5, 0.0];
        let trimmed = trim_silence(&samples, 0.1, 1, 44100).unwrap();
        assert_eq!(trimmed.samples(), &[0.5, -0.5]);
        assert_eq!(trimmed.channel_count(), 1);
        assert_eq!(trimmed.sample_rate(), 44100);
    }

    #[test]
    fn test_trim_all_silent_yields_empty() {
        let samples = [0.05, -0.1, 0.0, 0.1];
        let trimmed = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert!(trimmed.is_empty());
        assert_eq!(silence_bounds(&samples, 0.1), 4..4);
    }

    #[test]
    fn test_trim_empty_input() {
        let trimmed = trim_silence(&[], 0.1, 2, 8000).unwrap();
        assert!(trimmed.is_empty());
        assert_eq!(trimmed.channel_count(), 2);
    }

    #[test]
    fn test_trim_all_loud_unchanged() {
        let samples = [0.5, -0.9, 0.2, -0.3];
        let trimmed = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &samples);
    }

    #[test]
    fn test_trim_is_idempotent() {
        let samples = [0.0, 0.01, 0.3, 0.0, -0.4, 0.02, 0.0];
        let once = trim_silence(&samples, 0.05, 1, 8000).unwrap();
        let twice = trim_silence(once.samples(), 0.05, 1, 8000).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.samples(), &[0.3, 0.0, -0.4]);
    }

    #[test]
    fn test_trim_keeps_interior_silence() {
        let samples = [0.0, 0.8, 0.0, 0.0, 0.0, 0.7, 0.0];
        let trimmed = trim_silence(&samples, 0.0, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &[0.8, 0.0, 0.0, 0.0, 0.7]);
    }

    #[test]
    fn test_zero_threshold_trims_only_exact_zeros() {
        let samples = [0.0, 1e-6, 0.0, -1e-6, 0.0, 0.0];
        let trimmed = trim_silence(&samples, 0.0, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &[1e-6, 0.0, -1e-6]);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // |0.1| is not > 0.1, so it counts as silence
        let samples = [0.1, -0.1, 0.11, 0.1];
        let trimmed = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &[0.11]);
    }

    #[test]
    fn test_single_loud_sample_at_front() {
        let samples = [0.9, 0.0, 0.0, 0.0];
        let trimmed = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &[0.9]);
    }

    #[test]
    fn test_input_not_mutated() {
        let samples = vec![0.0, 0.5, 0.0];
        let copy = samples.clone();
        let _ = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert_eq!(samples, copy);
    }

    #[test]
    fn test_nan_samples_count_as_silent() {
        let samples = [f32::NAN, 0.5, f32::NAN];
        let trimmed = trim_silence(&samples, 0.1, 1, 8000).unwrap();
        assert_eq!(trimmed.samples(), &[0.5]);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            trim_silence(&[0.5], -0.1, 1, 8000),
            Err(PcmError::InvalidInput(_))
        ));
        assert!(trim_silence(&[0.5], f32::NAN, 1, 8000).is_err());
        assert!(trim_silence(&[0.5], 0.1, 0, 8000).is_err());
        assert!(trim_silence(&[0.5], 0.1, 1, 0).is_err());
    }

    #[test]
    fn test_per_sample_trim_can_split_frames() {
        // L/R pairs: (0.0, 0.0) (0.0, 0.5) (0.3, 0.3)
        let samples = [0.0, 0.0, 0.0, 0.5, 0.3, 0.3];
        let trimmed = trim_silence(&samples, 0.1, 2, 44100).unwrap();
        assert_eq!(trimmed.samples(), &[0.5, 0.3, 0.3]);
        assert!(!trimmed.is_frame_aligned());
    }

    #[test]
    fn test_per_frame_trim_keeps_frames_whole() {
        let buffer = AudioBuffer::new(vec![0.0, 0.0, 0.0, 0.5, 0.3, 0.3, 0.0, 0.0], 2, 44100)
            .unwrap();
        let config = TrimConfig {
            threshold: 0.1,
            mode: TrimMode::PerFrame,
        };
        let trimmed = trim_buffer(&buffer, &config).unwrap();
        assert_eq!(trimmed.samples(), &[0.0, 0.5, 0.3, 0.3]);
        assert!(trimmed.is_frame_aligned());
        assert_eq!(trimmed.frame_count(), 2);
    }

    #[test]
    fn test_per_frame_trim_all_silent() {
        let buffer = AudioBuffer::new(vec![0.0; 8], 2, 44100).unwrap();
        let config = TrimConfig {
            threshold: 0.0,
            mode: TrimMode::PerFrame,
        };
        assert!(trim_buffer(&buffer, &config).unwrap().is_empty());
    }

    #[test]
    fn test_per_frame_rejects_partial_frame() {
        let buffer = AudioBuffer::from_parts_unaligned(vec![0.5, 0.5, 0.5], 2, 44100);
        let config = TrimConfig {
            threshold: 0.1,
            mode: TrimMode::PerFrame,
        };
        assert!(matches!(
            trim_buffer(&buffer, &config),
            Err(PcmError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trim_buffer_per_sample_matches_trim_silence() {
        let buffer = AudioBuffer::new(vec![0.0, 0.0, 0.5, -0.5, 0.0], 1, 44100).unwrap();
        let trimmed = trim_buffer(&buffer, &TrimConfig::with_threshold(0.1)).unwrap();
        assert_eq!(
            trimmed,
            trim_silence(buffer.samples(), 0.1, 1, 44100).unwrap()
        );
    }
}
