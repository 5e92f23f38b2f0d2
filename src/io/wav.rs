//! RIFF/WAVE container header
//!
//! The canonical 44-byte header for linear PCM, little-endian throughout:
//!
//! | Offset | Size | Field         |
//! |--------|------|---------------|
//! | 0      | 4    | "RIFF"        |
//! | 4      | 4    | file size - 8 |
//! | 8      | 4    | "WAVE"        |
//! | 12     | 4    | "fmt "        |
//! | 16     | 4    | 16            |
//! | 20     | 2    | 1 (PCM)       |
//! | 22     | 2    | channels      |
//! | 24     | 4    | sample rate   |
//! | 28     | 4    | byte rate     |
//! | 32     | 2    | block align   |
//! | 34     | 2    | bits/sample   |
//! | 36     | 4    | "data"        |
//! | 40     | 4    | payload size  |

use serde::Serialize;

use crate::config::PcmFormat;
use crate::error::PcmError;

/// Size of the header in bytes; the sample payload starts at this offset
pub const HEADER_SIZE: usize = 44;

/// Size of the `fmt ` sub-chunk body for plain PCM
const FMT_CHUNK_SIZE: u32 = 16;

/// `AudioFormat` tag for linear PCM
const FORMAT_PCM: u16 = 1;

/// Bytes counted by `chunk_size` that precede it ("RIFF" + the field itself)
const RIFF_PREAMBLE: u32 = 8;

/// Decoded header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    /// Total file length minus 8
    pub chunk_size: u32,
    /// Audio format tag (1 = linear PCM)
    pub audio_format: u16,
    /// Number of interleaved channels
    pub channel_count: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Payload length in bytes
    pub data_size: u32,
}

impl WavHeader {
    /// Build the header for a payload of `data_size` bytes directly after it
    ///
    /// # Errors
    ///
    /// Returns `PcmError::InvalidInput` if the block align, byte rate or chunk
    /// size does not fit its header field.
    pub fn for_payload(
        channel_count: u16,
        sample_rate: u32,
        format: &PcmFormat,
        data_size: u32,
    ) -> Result<Self, PcmError> {
        let block_align = format.block_align(channel_count).ok_or_else(|| {
            PcmError::InvalidInput(format!(
                "Block align for {} channels exceeds the 16-bit header field",
                channel_count
            ))
        })?;
        let byte_rate = format.byte_rate(sample_rate, channel_count).ok_or_else(|| {
            PcmError::InvalidInput(format!(
                "Byte rate for {} channels @ {} Hz exceeds the 32-bit header field",
                channel_count, sample_rate
            ))
        })?;
        let chunk_size = data_size
            .checked_add(HEADER_SIZE as u32 - RIFF_PREAMBLE)
            .ok_or_else(|| {
                PcmError::InvalidInput(format!(
                    "Payload of {} bytes does not fit a WAV file",
                    data_size
                ))
            })?;

        Ok(Self {
            chunk_size,
            audio_format: FORMAT_PCM,
            channel_count,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: format.bits_per_sample,
            data_size,
        })
    }

    /// Total file length described by this header
    pub fn file_len(&self) -> u64 {
        self.chunk_size as u64 + RIFF_PREAMBLE as u64
    }

    /// Serialize to the 44-byte on-disk layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.chunk_size.to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        out[20..22].copy_from_slice(&self.audio_format.to_le_bytes());
        out[22..24].copy_from_slice(&self.channel_count.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_size.to_le_bytes());
        out
    }

    /// Parse the canonical header from the start of `bytes`
    ///
    /// Only the fixed 44-byte layout written by this crate is accepted; files
    /// with extra chunks before `data` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `PcmError::InvalidInput` if the input is too short, a chunk tag
    /// does not match, or the format is not plain PCM.
    pub fn parse(bytes: &[u8]) -> Result<Self, PcmError> {
        if bytes.len() < HEADER_SIZE {
            return Err(PcmError::InvalidInput(format!(
                "Header needs {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        expect_tag(bytes, 0, b"RIFF")?;
        expect_tag(bytes, 8, b"WAVE")?;
        expect_tag(bytes, 12, b"fmt ")?;
        expect_tag(bytes, 36, b"data")?;

        let fmt_size = read_u32(bytes, 16);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(PcmError::InvalidInput(format!(
                "Unexpected fmt chunk size {}",
                fmt_size
            )));
        }

        let audio_format = read_u16(bytes, 20);
        if audio_format != FORMAT_PCM {
            return Err(PcmError::InvalidInput(format!(
                "Unsupported audio format tag {}",
                audio_format
            )));
        }

        Ok(Self {
            chunk_size: read_u32(bytes, 4),
            audio_format,
            channel_count: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_size: read_u32(bytes, 40),
        })
    }
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> Result<(), PcmError> {
    if &bytes[offset..offset + 4] != tag {
        return Err(PcmError::InvalidInput(format!(
            "Expected {:?} at offset {}",
            String::from_utf8_lossy(tag),
            offset
        )));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
