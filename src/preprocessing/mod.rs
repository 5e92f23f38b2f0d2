//! Audio preprocessing modules
//!
//! This module contains utilities applied to a buffer before encoding:
//! - Silence detection and trimming
//!
//! Preprocessing never mutates its input; each step returns a new buffer.

pub mod silence;
