//! Saving encoded audio to a file path
//!
//! The destination directory is created if needed and the file is replaced
//! atomically: the WAV is written to a temporary file next to the target and
//! renamed over it only after both encoding passes and a sync succeed.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::config::PcmFormat;
use crate::error::PcmError;
use crate::io::audio_buffer::AudioBuffer;
use crate::io::encoder::{check_encodable, encode};

/// Encode `buffer` and store it at `path`
///
/// Missing parent directories are created. An existing file at `path` is
/// replaced only on success; on failure it is left as it was and the
/// temporary file is removed.
///
/// # Errors
///
/// * `PcmError::InvalidInput` - the buffer or format cannot be encoded (no
///   directory or file is created)
/// * `PcmError::Io` - directory creation, write, sync or rename failure
///
/// # Example
///
/// ```no_run
/// use stratum_pcm::{save_wav, AudioBuffer, PcmFormat};
///
/// let buffer = AudioBuffer::new(vec![0.0f32; 44100], 1, 44100)?;
/// save_wav("recordings/take1.wav", &buffer, &PcmFormat::default())?;
/// # Ok::<(), stratum_pcm::PcmError>(())
/// ```
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    buffer: &AudioBuffer,
    format: &PcmFormat,
) -> Result<(), PcmError> {
    let path = path.as_ref();
    check_encodable(buffer, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".stratum-pcm-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(&mut writer, buffer, format)?;
        writer.into_inner().map_err(|e| e.into_error())?;
    }
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| PcmError::Io(e.error))?;

    log::debug!(
        "Saved {} frames to {}",
        buffer.frame_count(),
        path.display()
    );

    Ok(())
}
