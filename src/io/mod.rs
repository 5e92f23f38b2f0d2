//! Audio I/O modules
//!
//! The buffer model, WAV container encoding, file destinations, and decoding
//! using Symphonia.

pub mod audio_buffer;
pub mod decoder;
pub mod destination;
pub mod encoder;
pub mod wav;
