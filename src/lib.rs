//! # pcmwav
//!
//! A small codec for uncompressed WAV audio. Files are decoded into a
//! [`SoundBuffer`] of normalized `f32` channels and encoded back as
//! 16-bit PCM. 16-bit integer as well as 32- and 64-bit float sources are
//! accepted, mono or stereo.
//!
//! ```no_run
//! let sound = pcmwav::read("voice.wav")?;
//! println!("{} Hz, {:.2} s", sound.sample_rate(), sound.duration_secs());
//! pcmwav::write(&sound, "copy.wav")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod buffer;
pub mod bytestream;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod pcm_utils;

pub use buffer::{SoundBuffer, OUTPUT_BIT_DEPTH};
pub use decoder::{decode, inspect};
pub use encoder::{data_len_for, encode, encode_to, quantize_sample};
pub use error::{
    BufferError, DecodeError, DecodeResult, EncodeError, EncodeResult, ErrorKind, FormatError,
    UnsupportedFormatError,
};
pub use format::{Channels, FmtChunk, SampleFormat, WavHeader};

use log::debug;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Read and decode a WAV file.
///
/// The whole file is loaded before any sample is converted.
pub fn read(path: impl AsRef<Path>) -> DecodeResult<SoundBuffer> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes)
}

/// Encode a buffer as 16-bit PCM and write it to `path`.
///
/// An existing file is replaced. If an error is returned the file may hold
/// a partial image and should be discarded.
pub fn write(buffer: &SoundBuffer, path: impl AsRef<Path>) -> EncodeResult<()> {
    let path = path.as_ref();
    // Refuse oversized buffers before the destination is truncated
    encoder::data_byte_count(buffer)?;
    let file = File::create(path)?;
    encode_to(buffer, BufWriter::new(file))?;
    debug!("Wrote {} frame(s) to {}", buffer.frame_count(), path.display());
    Ok(())
}
