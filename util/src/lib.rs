//! Test utilities for the pcmwav codec
//!
//! This crate builds hand-crafted WAV byte streams so that tests can feed
//! the decoder layouts the encoder never produces: extended `fmt` chunks,
//! float bit depths, foreign format codes and truncated payloads.

pub mod error;
pub mod wav_fixture;

// Re-export commonly used functions and types
pub use error::*;
pub use wav_fixture::*;
