//! RIFF/WAVE layout shared by the decoder and the encoder
//!
//! This module holds the chunk identifiers, the `fmt ` chunk model, the
//! supported sample formats and the limits imposed by the 32-bit size
//! fields of the container.

use crate::buffer::OUTPUT_BIT_DEPTH;
use crate::error::UnsupportedFormatError;

/// `RIFF` container magic
pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";
/// Form type of WAVE audio inside a RIFF container
pub const WAVE_FORM: [u8; 4] = *b"WAVE";
/// Format sub-chunk identifier
pub const FMT_ID: [u8; 4] = *b"fmt ";
/// Data sub-chunk identifier
pub const DATA_ID: [u8; 4] = *b"data";

/// Size of the plain `fmt ` chunk body
pub const FMT_CHUNK_SIZE: u32 = 16;
/// Size of the `fmt ` chunk body carrying an extension-size field
pub const FMT_CHUNK_SIZE_EXTENDED: u32 = 18;

/// Linear PCM
pub const FORMAT_PCM: u16 = 0x0001;
/// IEEE floating point
pub const FORMAT_IEEE_FLOAT: u16 = 0x0003;
/// WAVE_FORMAT_EXTENSIBLE; the sub-format GUID is not inspected
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Registered codes for non-linear encodings that must never be read as PCM:
/// MS ADPCM, A-law, µ-law, IMA ADPCM, GSM 6.10, MPEG, MPEG layer 3
pub const COMPRESSED_FORMAT_CODES: [u16; 7] =
    [0x0002, 0x0006, 0x0007, 0x0011, 0x0031, 0x0050, 0x0055];

/// Bytes counted by the RIFF size field in front of the sample data:
/// form type (4), `fmt ` header and body (8 + 16), `data` header (8)
pub const HEADER_OVERHEAD: u32 = 36;
/// Length of a canonical 16-byte-`fmt ` WAV header
pub const CANONICAL_HEADER_LEN: usize = 44;

/// Largest `data` payload the RIFF size field can describe.
///
/// The RIFF size field counts [`HEADER_OVERHEAD`] bytes plus the payload,
/// so the payload tops out 36 bytes short of `u32::MAX`. For 16-bit stereo
/// at 44.1 kHz that is roughly 6 hours 45 minutes of audio.
pub const MAX_DATA_BYTES: u32 = u32::MAX - HEADER_OVERHEAD;

/// Scale between normalized floats and 16-bit samples
pub const PCM16_SCALE: f32 = i16::MAX as f32;

/// Number of audio channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono audio (1 channel)
    Mono = 1,
    /// Stereo audio (2 channels)
    Stereo = 2,
}

impl Channels {
    pub fn count(self) -> u16 {
        self as u16
    }

    pub fn from_count(count: u16) -> Result<Self, UnsupportedFormatError> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            other => Err(UnsupportedFormatError::ChannelCount(other)),
        }
    }
}

/// Sample encodings accepted by the decoder, keyed by bit depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Signed 16-bit integers
    Int16,
    /// IEEE single precision
    Float32,
    /// IEEE double precision
    Float64,
}

impl SampleFormat {
    pub fn from_bit_depth(bits: u16) -> Result<Self, UnsupportedFormatError> {
        match bits {
            16 => Ok(SampleFormat::Int16),
            32 => Ok(SampleFormat::Float32),
            64 => Ok(SampleFormat::Float64),
            other => Err(UnsupportedFormatError::BitDepth(other)),
        }
    }

    pub fn bit_depth(self) -> u16 {
        match self {
            SampleFormat::Int16 => 16,
            SampleFormat::Float32 => 32,
            SampleFormat::Float64 => 64,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        usize::from(self.bit_depth() / 8)
    }

    /// Format code a well-behaved writer would pair with this depth
    pub fn expected_format_code(self) -> u16 {
        match self {
            SampleFormat::Int16 => FORMAT_PCM,
            SampleFormat::Float32 | SampleFormat::Float64 => FORMAT_IEEE_FLOAT,
        }
    }
}

/// Body of the `fmt ` sub-chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    pub format_code: u16,
    pub channels: u16,
    pub sample_rate: u32,
    /// Informational; never trusted by the decoder
    pub byte_rate: u32,
    /// Informational; never trusted by the decoder
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl FmtChunk {
    /// Header for the encoder's fixed 16-bit PCM output.
    ///
    /// Block align is `channels * bits_per_sample / 8`, i.e. 2 for mono and
    /// 4 for stereo. Older writers of this layout always stored 4, which
    /// is wrong for mono streams.
    pub fn pcm16(channels: Channels, sample_rate: u32) -> Self {
        let block_align = channels.count() * (OUTPUT_BIT_DEPTH / 8);
        Self {
            format_code: FORMAT_PCM,
            channels: channels.count(),
            sample_rate,
            byte_rate: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample: OUTPUT_BIT_DEPTH,
        }
    }

    /// Check format code, channel count and bit depth.
    ///
    /// The bit depth decides how samples are read. Only codes of known
    /// compressed encodings are refused; any other code is accepted.
    pub fn validate(&self) -> Result<(Channels, SampleFormat), UnsupportedFormatError> {
        if COMPRESSED_FORMAT_CODES.contains(&self.format_code) {
            return Err(UnsupportedFormatError::FormatCode(self.format_code));
        }
        let channels = Channels::from_count(self.channels)?;
        let format = SampleFormat::from_bit_depth(self.bits_per_sample)?;
        Ok((channels, format))
    }

    /// Bytes per frame implied by channels and depth, ignoring `block_align`
    pub fn frame_bytes(&self) -> u32 {
        u32::from(self.channels) * u32::from(self.bits_per_sample) / 8
    }
}

/// Parsed header of a WAV stream, as returned by [`crate::decoder::inspect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub fmt: FmtChunk,
    /// Extension bytes skipped after an 18-byte `fmt ` chunk
    pub fmt_extra_len: u16,
    /// Declared (and verified present) `data` payload length
    pub data_len: u32,
    /// Declared RIFF size; informational
    pub riff_len: u32,
    /// Offset of the first sample byte
    pub data_offset: usize,
}

impl WavHeader {
    /// Whole frames in the payload; a partial trailing frame is not counted
    pub fn frame_count(&self) -> usize {
        match self.fmt.frame_bytes() {
            0 => 0,
            frame => (self.data_len / frame) as usize,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.fmt.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / f64::from(self.fmt.sample_rate)
    }
}

/// Longest 16-bit output the container can hold at this rate and layout
pub fn max_duration_secs(sample_rate: u32, channels: Channels) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    let frame_bytes = u64::from(channels.count()) * u64::from(OUTPUT_BIT_DEPTH / 8);
    let frames = u64::from(MAX_DATA_BYTES) / frame_bytes;
    frames as f64 / f64::from(sample_rate)
}
