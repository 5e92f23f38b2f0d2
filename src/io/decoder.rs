//! Audio decoding using Symphonia
//!
//! Loads an existing audio file into an [`AudioBuffer`], keeping the source's
//! interleaved channel layout and sample rate (no remixing, no resampling).

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::PcmError;
use crate::io::audio_buffer::AudioBuffer;

/// Decode an audio file to interleaved f32 samples
///
/// Corrupt packets are skipped with a warning rather than aborting the decode.
///
/// # Arguments
///
/// * `path` - Path to audio file (any container/codec enabled in Symphonia)
///
/// # Errors
///
/// * `PcmError::Io` - the file cannot be opened or read
/// * `PcmError::Decoding` - unknown format, no audio track, or no decodable packets
pub fn decode_audio<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, PcmError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| PcmError::Decoding("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channel_count = track.codec_params.channels.map(|c| c.count());
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = Some(spec.rate);
                channel_count = Some(spec.channels.count());

                let mut interleaved = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                interleaved.copy_interleaved_ref(decoded);
                samples.extend_from_slice(interleaved.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                skipped_packets += 1;
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let sample_rate = sample_rate
        .ok_or_else(|| PcmError::Decoding("Unknown sample rate".to_string()))?;
    let channel_count = channel_count
        .and_then(|c| u16::try_from(c).ok())
        .ok_or_else(|| PcmError::Decoding("Unknown channel layout".to_string()))?;

    log::debug!(
        "Decoded {} samples ({} ch @ {} Hz), {} packets skipped",
        samples.len(),
        channel_count,
        sample_rate,
        skipped_packets
    );

    AudioBuffer::new(samples, channel_count, sample_rate)
}
