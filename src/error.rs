//! Error types for the WAV codec
//!
//! Decoding and encoding each return their own top-level error. Narrower
//! enums describe the individual failure classes and convert into the
//! top-level errors with `?`.

use thiserror::Error;

/// Coarse classification shared by [`DecodeError`] and [`EncodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened, read, or written
    Io,
    /// A magic value, chunk identifier or chunk size is wrong
    Format,
    /// Well-formed, but outside the supported channel/depth/code set
    UnsupportedFormat,
    /// A declared size runs past the end of the input
    Truncated,
    /// The output would not fit the 32-bit RIFF size fields
    TooLarge,
}

/// Main error type for decoding
#[derive(Debug, Error)]
pub enum DecodeError {
    /// I/O failure at the file boundary
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural errors in the RIFF/WAVE layout
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Valid layout that this codec does not handle
    #[error("Unsupported format: {0}")]
    Unsupported(#[from] UnsupportedFormatError),

    /// Input ended before a declared size was satisfied
    #[error("Truncated {chunk} chunk: declared {declared} bytes, only {available} available")]
    Truncated {
        chunk: &'static str,
        declared: u64,
        available: u64,
    },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Io(_) => ErrorKind::Io,
            DecodeError::Format(_) => ErrorKind::Format,
            DecodeError::Unsupported(_) => ErrorKind::UnsupportedFormat,
            DecodeError::Truncated { .. } => ErrorKind::Truncated,
        }
    }
}

/// Layout violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// First four bytes are not `RIFF`
    #[error("Invalid RIFF magic: {found:?}")]
    InvalidRiffMagic { found: [u8; 4] },

    /// RIFF form type is not `WAVE`
    #[error("Invalid form type: {found:?}")]
    InvalidFormType { found: [u8; 4] },

    /// A sub-chunk identifier is not the one expected at this position
    #[error("Unexpected chunk: expected {expected:?}, found {found:?}")]
    UnexpectedChunk { expected: [u8; 4], found: [u8; 4] },

    /// `fmt ` chunk size is neither 16 nor 18
    #[error("Invalid fmt chunk size: {0}")]
    InvalidFmtSize(u32),

    /// Sample rate field is zero
    #[error("Sample rate must be non-zero")]
    ZeroSampleRate,
}

/// Formats that parse correctly but cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnsupportedFormatError {
    /// Channel count other than 1 or 2
    #[error("Unsupported channel count: {0}")]
    ChannelCount(u16),

    /// Bit depth other than 16, 32 or 64
    #[error("Unsupported bit depth: {0}")]
    BitDepth(u16),

    /// Compressed or otherwise non-linear sample encoding
    #[error("Unsupported format code: {0:#06x}")]
    FormatCode(u16),
}

/// Main error type for encoding
#[derive(Debug, Error)]
pub enum EncodeError {
    /// I/O failure while writing the destination
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data chunk would overflow the 32-bit RIFF size fields
    #[error("Audio data too large for WAV: {data_bytes} bytes exceeds the 32-bit chunk size limit")]
    TooLarge { data_bytes: u64 },
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Io(_) => ErrorKind::Io,
            EncodeError::TooLarge { .. } => ErrorKind::TooLarge,
        }
    }
}

/// Sound buffer construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Left and right channels differ in length
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch { left: usize, right: usize },

    /// Sample rate of zero
    #[error("Sample rate must be non-zero")]
    ZeroSampleRate,
}

/// Specialized result types for different modules
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type BufferResult<T> = std::result::Result<T, BufferError>;
