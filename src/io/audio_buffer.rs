//! Interleaved float audio buffer

use crate::error::PcmError;

/// Interleaved floating-point audio with a fixed channel count and sample rate
///
/// Samples are stored in playback order: frame 0 channel 0, frame 0 channel 1,
/// ..., frame 1 channel 0, and so on. Amplitudes are nominally in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channel_count: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new buffer from interleaved samples
    ///
    /// # Errors
    ///
    /// Returns `PcmError::InvalidInput` if the channel count or sample rate is
    /// zero, or if the sample count is not a whole number of frames.
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_pcm::AudioBuffer;
    ///
    /// let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 0.0], 2, 48000)?;
    /// assert_eq!(buffer.frame_count(), 2);
    /// # Ok::<(), stratum_pcm::PcmError>(())
    /// ```
    pub fn new(samples: Vec<f32>, channel_count: u16, sample_rate: u32) -> Result<Self, PcmError> {
        validate_layout(channel_count, sample_rate)?;
        if samples.len() % channel_count as usize != 0 {
            return Err(PcmError::InvalidInput(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                channel_count
            )));
        }
        Ok(Self {
            samples,
            channel_count,
            sample_rate,
        })
    }

    /// Build a buffer without the whole-frame check
    ///
    /// Per-sample trimming can cut through a frame; its result still needs to
    /// be representable.
    pub(crate) fn from_parts_unaligned(
        samples: Vec<f32>,
        channel_count: u16,
        sample_rate: u32,
    ) -> Self {
        Self {
            samples,
            channel_count,
            sample_rate,
        }
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of interleaved channels
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total number of samples across all channels
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of complete frames
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channel_count as usize
    }

    /// True if the sample count is a whole number of frames
    pub fn is_frame_aligned(&self) -> bool {
        self.samples.len() % self.channel_count as usize == 0
    }

    /// Playback duration of the complete frames
    pub fn duration_seconds(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate as f32
    }

    /// Iterate over complete frames, one slice of `channel_count` samples each
    ///
    /// A trailing partial frame is skipped.
    pub fn frames(&self) -> std::slice::ChunksExact<'_, f32> {
        self.samples.chunks_exact(self.channel_count as usize)
    }

    /// Consume the buffer and return its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

/// Reject zero channel counts and sample rates
pub(crate) fn validate_layout(channel_count: u16, sample_rate: u32) -> Result<(), PcmError> {
    if channel_count == 0 {
        return Err(PcmError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(PcmError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_buffer() {
        let buffer = AudioBuffer::new(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], 2, 44100).unwrap();
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.frame_count(), 3);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!(buffer.is_frame_aligned());
    }

    #[test]
    fn test_new_rejects_bad_layout() {
        assert!(matches!(
            AudioBuffer::new(vec![0.0; 4], 0, 44100),
            Err(PcmError::InvalidInput(_))
        ));
        assert!(matches!(
            AudioBuffer::new(vec![0.0; 4], 1, 0),
            Err(PcmError::InvalidInput(_))
        ));
        assert!(matches!(
            AudioBuffer::new(vec![0.0; 5], 2, 44100),
            Err(PcmError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buffer = AudioBuffer::new(Vec::new(), 2, 48000).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.duration_seconds(), 0.0);
    }

    #[test]
    fn test_frames_iteration() {
        let buffer = AudioBuffer::new(vec![1.0, -1.0, 0.5, -0.5], 2, 8000).unwrap();
        let frames: Vec<&[f32]> = buffer.frames().collect();
        assert_eq!(frames, vec![&[1.0, -1.0][..], &[0.5, -0.5][..]]);
    }

    #[test]
    fn test_unaligned_buffer_reports_partial_frame() {
        let buffer = AudioBuffer::from_parts_unaligned(vec![0.1, 0.2, 0.3], 2, 8000);
        assert!(!buffer.is_frame_aligned());
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.frames().count(), 1);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 44100 * 2], 2, 44100).unwrap();
        assert!((buffer.duration_seconds() - 1.0).abs() < 1e-6);
    }
}
