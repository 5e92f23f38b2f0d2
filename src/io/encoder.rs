//! PCM WAV encoding
//!
//! Writes an [`AudioBuffer`] as a complete RIFF/WAVE file in two passes:
//! 1. Reserve the 44-byte header with zero bytes
//! 2. Convert and append every sample as little-endian 16-bit PCM
//! 3. Seek back and write the finalized header once the total length is known
//!
//! The sink must support `Seek`. Callers with a stream-only destination can
//! encode into memory with [`encode_to_vec`] and write the bytes in one go.
//!
//! # Example
//!
//! ```
//! use stratum_pcm::{encode_to_vec, AudioBuffer, PcmFormat};
//!
//! let buffer = AudioBuffer::new(vec![0.5, -0.5], 1, 44100)?;
//! let bytes = encode_to_vec(&buffer, &PcmFormat::default())?;
//! assert_eq!(bytes.len(), 48);
//! # Ok::<(), stratum_pcm::PcmError>(())
//! ```

use std::io::{Cursor, Seek, SeekFrom, Write};

use crate::config::{OverflowMode, PcmFormat};
use crate::error::PcmError;
use crate::io::audio_buffer::{validate_layout, AudioBuffer};
use crate::io::wav::{WavHeader, HEADER_SIZE};

/// Samples converted per write call
const CHUNK_SAMPLES: usize = 4096;

/// Convert one float amplitude to a 16-bit sample
///
/// Truncates toward zero, no rounding or dithering. Out-of-range amplitudes
/// follow `format.overflow`: with `OverflowMode::Wrap` the value is truncated
/// to a 32-bit integer and its low 16 bits are kept, so 1.5 encodes as
/// -16386. NaN encodes as 0.
pub fn convert_sample(amplitude: f32, format: &PcmFormat) -> i16 {
    match format.overflow {
        OverflowMode::Wrap => (amplitude * format.scale) as i32 as i16,
        OverflowMode::Clamp => (amplitude.clamp(-1.0, 1.0) * format.scale) as i16,
    }
}

/// Encode `buffer` as a WAV file into `sink`
///
/// The file starts at the sink's current position. On success the sink is
/// left positioned at the end of the written file.
///
/// # Errors
///
/// * `PcmError::InvalidInput` - zero channel count or sample rate, a partial
///   trailing frame, an unsupported format, or a payload, byte rate or block
///   align too large for its header field. Nothing is written in these cases.
/// * `PcmError::Io` - any write, seek or flush failure. The sink content is
///   then indeterminate; use [`crate::io::destination::save_wav`] for an
///   atomic file replacement.
pub fn encode<W: Write + Seek>(
    sink: &mut W,
    buffer: &AudioBuffer,
    format: &PcmFormat,
) -> Result<(), PcmError> {
    let mut header = check_encodable(buffer, format)?;

    log::debug!(
        "Encoding {} frames ({} ch @ {} Hz) as {}-bit PCM, {} payload bytes",
        buffer.frame_count(),
        buffer.channel_count(),
        buffer.sample_rate(),
        format.bits_per_sample,
        header.data_size
    );

    // Pass 1: placeholder header, then the payload
    let start = sink.stream_position()?;
    sink.write_all(&[0u8; HEADER_SIZE])?;
    write_samples(sink, buffer.samples(), format)?;
    let end = sink.stream_position()?;

    // Pass 2: finalize the header from the measured length
    header.chunk_size = u32::try_from(end - start - 8).map_err(|_| {
        PcmError::InvalidInput(format!("File length {} exceeds RIFF limit", end - start))
    })?;

    sink.seek(SeekFrom::Start(start))?;
    sink.write_all(&header.to_bytes())?;
    sink.seek(SeekFrom::Start(end))?;
    sink.flush()?;

    Ok(())
}

/// Encode `buffer` into an in-memory WAV file
pub fn encode_to_vec(buffer: &AudioBuffer, format: &PcmFormat) -> Result<Vec<u8>, PcmError> {
    let capacity = HEADER_SIZE + buffer.len() * format.bytes_per_sample() as usize;
    let mut cursor = Cursor::new(Vec::with_capacity(capacity));
    encode(&mut cursor, buffer, format)?;
    Ok(cursor.into_inner())
}

/// Validate `buffer` and `format` without touching any sink
///
/// Returns the header for the payload, with every field checked against its
/// on-disk width.
pub(crate) fn check_encodable(
    buffer: &AudioBuffer,
    format: &PcmFormat,
) -> Result<WavHeader, PcmError> {
    format.validate()?;
    validate_layout(buffer.channel_count(), buffer.sample_rate())?;

    if !buffer.is_frame_aligned() {
        return Err(PcmError::InvalidInput(format!(
            "{} samples is not a whole number of {}-channel frames",
            buffer.len(),
            buffer.channel_count()
        )));
    }

    let data_size = payload_size(buffer, format)?;
    WavHeader::for_payload(
        buffer.channel_count(),
        buffer.sample_rate(),
        format,
        data_size,
    )
}

/// Payload length in bytes, checked against the 32-bit RIFF size fields
fn payload_size(buffer: &AudioBuffer, format: &PcmFormat) -> Result<u32, PcmError> {
    let bytes = buffer.frame_count() as u64
        * buffer.channel_count() as u64
        * format.bytes_per_sample() as u64;
    let limit = (u32::MAX - (HEADER_SIZE as u32 - 8)) as u64;
    if bytes > limit {
        return Err(PcmError::InvalidInput(format!(
            "Payload of {} bytes does not fit a WAV file",
            bytes
        )));
    }
    Ok(bytes as u32)
}

fn write_samples<W: Write>(
    sink: &mut W,
    samples: &[f32],
    format: &PcmFormat,
) -> Result<(), PcmError> {
    let mut bytes = Vec::with_capacity(CHUNK_SAMPLES.min(samples.len()) * 2);
    for chunk in samples.chunks(CHUNK_SAMPLES) {
        bytes.clear();
        for &amplitude in chunk {
            bytes.extend_from_slice(&convert_sample(amplitude, format).to_le_bytes());
        }
        sink.write_all(&bytes)?;
    }
    Ok(())
}
