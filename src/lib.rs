//! # Stratum PCM
//!
//! Canonical uncompressed WAV output for in-memory float audio, with
//! leading/trailing silence trimming.
//!
//! ## Features
//!
//! - **PCM Encoding**: 44-byte RIFF/WAVE header + interleaved 16-bit little-endian samples,
//!   written in two passes to any `Write + Seek` sink
//! - **Silence Trimming**: removes near-silent prefixes and suffixes, per sample or per frame
//! - **Atomic Saving**: encodes to a temporary file and renames it over the destination
//! - **Decoding**: loads existing audio files into buffers via Symphonia
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_pcm::{save_wav, trim_buffer, AudioBuffer, PcmFormat, TrimConfig};
//!
//! // Interleaved samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![0.0, 0.0, 0.5, -0.5, 0.0];
//! let buffer = AudioBuffer::new(samples, 1, 44100)?;
//!
//! let trimmed = trim_buffer(&buffer, &TrimConfig::with_threshold(0.1))?;
//! save_wav("out/clip.wav", &trimmed, &PcmFormat::default())?;
//! # Ok::<(), stratum_pcm::PcmError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Audio Input → AudioBuffer → (SilenceTrimmer) → PcmEncoder → Sink
//! ```
//!
//! Trimming and encoding are independent pure transformations over
//! [`AudioBuffer`]; neither holds shared state, so calls on distinct buffers
//! and sinks may run concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod preprocessing;

use std::io::{Seek, Write};

// Re-export main types
pub use config::{OverflowMode, PcmFormat, TrimConfig, TrimMode};
pub use error::PcmError;
pub use io::audio_buffer::AudioBuffer;
pub use io::decoder::decode_audio;
pub use io::destination::save_wav;
pub use io::encoder::{convert_sample, encode, encode_to_vec};
pub use io::wav::{WavHeader, HEADER_SIZE};
pub use preprocessing::silence::{trim_buffer, trim_silence};

/// Trim silence from `buffer`, then encode the result into `sink`
///
/// Returns the trimmed buffer that was written.
///
/// # Errors
///
/// Returns `PcmError::InvalidInput` if the threshold or buffer is invalid, or
/// if per-sample trimming of a multi-channel buffer leaves a partial frame
/// (use `TrimMode::PerFrame` to avoid that). Sink failures surface as
/// `PcmError::Io`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use stratum_pcm::{trim_and_encode, AudioBuffer, PcmFormat, TrimConfig};
///
/// let buffer = AudioBuffer::new(vec![0.0, 0.0, 0.5, -0.5, 0.0], 1, 44100)?;
/// let mut sink = Cursor::new(Vec::new());
/// let trimmed = trim_and_encode(
///     &mut sink,
///     &buffer,
///     &TrimConfig::with_threshold(0.1),
///     &PcmFormat::default(),
/// )?;
///
/// assert_eq!(trimmed.samples(), &[0.5, -0.5]);
/// assert_eq!(sink.into_inner().len(), 48);
/// # Ok::<(), stratum_pcm::PcmError>(())
/// ```
pub fn trim_and_encode<W: Write + Seek>(
    sink: &mut W,
    buffer: &AudioBuffer,
    trim: &TrimConfig,
    format: &PcmFormat,
) -> Result<AudioBuffer, PcmError> {
    log::debug!(
        "Trim and encode: {} samples, {} ch @ {} Hz, threshold {:.4} ({:?})",
        buffer.len(),
        buffer.channel_count(),
        buffer.sample_rate(),
        trim.threshold,
        trim.mode
    );

    let trimmed = trim_buffer(buffer, trim)?;
    encode(sink, &trimmed, format)?;
    Ok(trimmed)
}
