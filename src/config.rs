//! Configuration parameters for encoding and trimming

use serde::{Deserialize, Serialize};

use crate::error::PcmError;

/// How amplitudes that scale past the 16-bit range are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowMode {
    /// Truncate toward zero to a 32-bit integer, then keep the low 16 bits
    ///
    /// Out-of-range amplitudes wrap around (1.5 becomes a large negative
    /// sample). This matches the long-standing output of the capture pipeline
    /// and is the default.
    Wrap,
    /// Clamp amplitudes into [-1.0, 1.0] before scaling
    Clamp,
}

/// Numeric model used to turn float amplitudes into integer PCM samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Bits per stored sample (only 16 is currently supported)
    pub bits_per_sample: u16,

    /// Multiplier applied to each amplitude before truncation (default: 32767.0)
    ///
    /// 32767 rather than 32768 keeps +1.0 and -1.0 symmetric.
    pub scale: f32,

    /// Overflow policy for amplitudes outside [-1.0, 1.0] (default: Wrap)
    pub overflow: OverflowMode,
}

impl PcmFormat {
    /// Signed 16-bit linear PCM, scale 32767, truncation toward zero, wrapping overflow
    pub const PCM16: PcmFormat = PcmFormat {
        bits_per_sample: 16,
        scale: 32767.0,
        overflow: OverflowMode::Wrap,
    };

    /// Bytes used by one stored sample
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes used by one frame (one sample per channel)
    ///
    /// `None` if the value does not fit the 16-bit header field.
    pub fn block_align(&self, channel_count: u16) -> Option<u16> {
        channel_count.checked_mul(self.bytes_per_sample())
    }

    /// Bytes of payload per second of audio
    ///
    /// `None` if the value does not fit the 32-bit header field.
    pub fn byte_rate(&self, sample_rate: u32, channel_count: u16) -> Option<u32> {
        let rate = sample_rate as u64 * channel_count as u64 * self.bytes_per_sample() as u64;
        u32::try_from(rate).ok()
    }

    /// Check that the encoder supports this format
    pub fn validate(&self) -> Result<(), PcmError> {
        if self.bits_per_sample != 16 {
            return Err(PcmError::InvalidInput(format!(
                "Unsupported bit depth {} (only 16-bit PCM is supported)",
                self.bits_per_sample
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PcmError::InvalidInput(format!(
                "Scale factor must be finite and > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self::PCM16
    }
}

/// Granularity of the silence scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrimMode {
    /// Scan raw interleaved samples one at a time
    ///
    /// Multi-channel buffers may come out with a partial frame at either end.
    #[default]
    PerSample,
    /// Scan whole frames; a frame is silent only if every channel is silent
    ///
    /// Keeps the output frame-aligned.
    PerFrame,
}

/// Silence trimming configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimConfig {
    /// Amplitudes with magnitude <= threshold count as silence (default: 0.0)
    pub threshold: f32,

    /// Scan granularity (default: PerSample)
    pub mode: TrimMode,
}

impl TrimConfig {
    /// Per-sample trimming at the given threshold
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            mode: TrimMode::PerSample,
        }
    }
}
