//! Hand-built WAV byte streams
//!
//! `WavFixture` serializes the canonical `RIFF`/`fmt `/`data` layout field
//! by field. Every field can be overridden, which lets tests produce files
//! that are malformed in exactly one place.

use crate::error::{UtilError, UtilResult};
use std::fs;
use std::path::Path;

/// PCM format code
pub const FORMAT_PCM: u16 = 1;
/// IEEE floating-point format code
pub const FORMAT_IEEE_FLOAT: u16 = 3;

/// Builder for a single-file WAV fixture
#[derive(Debug, Clone)]
pub struct WavFixture {
    riff_magic: [u8; 4],
    riff_len: Option<u32>,
    form_type: [u8; 4],
    fmt_id: [u8; 4],
    fmt_size: Option<u32>,
    format_code: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: Option<u32>,
    block_align: Option<u16>,
    bits_per_sample: u16,
    fmt_extra: Option<Vec<u8>>,
    data_id: [u8; 4],
    data_len: Option<u32>,
    payload: Vec<u8>,
    trailing: Vec<u8>,
}

impl WavFixture {
    /// Raw payload with the given layout; nothing is validated
    pub fn raw(bits_per_sample: u16, channels: u16, sample_rate: u32, payload: Vec<u8>) -> Self {
        let format_code = if bits_per_sample >= 32 {
            FORMAT_IEEE_FLOAT
        } else {
            FORMAT_PCM
        };
        Self {
            riff_magic: *b"RIFF",
            riff_len: None,
            form_type: *b"WAVE",
            fmt_id: *b"fmt ",
            fmt_size: None,
            format_code,
            channels,
            sample_rate,
            byte_rate: None,
            block_align: None,
            bits_per_sample,
            fmt_extra: None,
            data_id: *b"data",
            data_len: None,
            payload,
            trailing: Vec::new(),
        }
    }

    /// Interleaved 16-bit PCM samples
    pub fn pcm16(channels: u16, sample_rate: u32, samples: &[i16]) -> Self {
        let payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::raw(16, channels, sample_rate, payload)
    }

    /// Interleaved 32-bit float samples
    pub fn float32(channels: u16, sample_rate: u32, samples: &[f32]) -> Self {
        let payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::raw(32, channels, sample_rate, payload)
    }

    /// Interleaved 64-bit float samples
    pub fn float64(channels: u16, sample_rate: u32, samples: &[f64]) -> Self {
        let payload = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self::raw(64, channels, sample_rate, payload)
    }

    /// 16-bit PCM from one vector per channel, interleaving frame by frame
    pub fn pcm16_channels(sample_rate: u32, channels: &[Vec<i16>]) -> UtilResult<Self> {
        let frames = channels.first().map_or(0, Vec::len);
        if let Some(bad) = channels.iter().position(|ch| ch.len() != frames) {
            return Err(UtilError::ValidationError(format!(
                "channel {} has {} samples, expected {}",
                bad,
                channels[bad].len(),
                frames
            )));
        }

        let mut interleaved = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            for ch in channels {
                interleaved.push(ch[frame]);
            }
        }
        Ok(Self::pcm16(channels.len() as u16, sample_rate, &interleaved))
    }

    pub fn riff_magic(mut self, magic: &[u8; 4]) -> Self {
        self.riff_magic = *magic;
        self
    }

    pub fn riff_len(mut self, len: u32) -> Self {
        self.riff_len = Some(len);
        self
    }

    pub fn form_type(mut self, form: &[u8; 4]) -> Self {
        self.form_type = *form;
        self
    }

    pub fn fmt_id(mut self, id: &[u8; 4]) -> Self {
        self.fmt_id = *id;
        self
    }

    /// Override the declared `fmt ` chunk size without changing its body
    pub fn fmt_size(mut self, size: u32) -> Self {
        self.fmt_size = Some(size);
        self
    }

    pub fn format_code(mut self, code: u16) -> Self {
        self.format_code = code;
        self
    }

    pub fn byte_rate(mut self, rate: u32) -> Self {
        self.byte_rate = Some(rate);
        self
    }

    pub fn block_align(mut self, align: u16) -> Self {
        self.block_align = Some(align);
        self
    }

    /// Use the 18-byte `fmt ` layout, followed by `extra` extension bytes
    pub fn fmt_extra(mut self, extra: Vec<u8>) -> Self {
        self.fmt_extra = Some(extra);
        self
    }

    pub fn data_id(mut self, id: &[u8; 4]) -> Self {
        self.data_id = *id;
        self
    }

    /// Override the declared `data` size without changing the payload
    pub fn data_len(mut self, len: u32) -> Self {
        self.data_len = Some(len);
        self
    }

    /// Bytes appended after the `data` payload
    pub fn trailing(mut self, bytes: Vec<u8>) -> Self {
        self.trailing = bytes;
        self
    }

    /// Serialize the fixture
    pub fn to_bytes(&self) -> Vec<u8> {
        let bytes_per_frame = u32::from(self.channels) * u32::from(self.bits_per_sample) / 8;
        let byte_rate = self
            .byte_rate
            .unwrap_or_else(|| self.sample_rate.wrapping_mul(bytes_per_frame));
        let block_align = self.block_align.unwrap_or(bytes_per_frame as u16);

        let extended = self.fmt_extra.is_some();
        let fmt_size = self.fmt_size.unwrap_or(if extended { 18 } else { 16 });
        let data_len = self.data_len.unwrap_or(self.payload.len() as u32);
        let extra_len = self.fmt_extra.as_ref().map_or(0, |e| 2 + e.len());
        let body_len = 4 + 8 + 16 + extra_len + 8 + self.payload.len() + self.trailing.len();
        let riff_len = self.riff_len.unwrap_or(body_len as u32);

        let mut out = Vec::with_capacity(8 + body_len);
        out.extend_from_slice(&self.riff_magic);
        out.extend_from_slice(&riff_len.to_le_bytes());
        out.extend_from_slice(&self.form_type);

        out.extend_from_slice(&self.fmt_id);
        out.extend_from_slice(&fmt_size.to_le_bytes());
        out.extend_from_slice(&self.format_code.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&byte_rate.to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        if let Some(extra) = &self.fmt_extra {
            out.extend_from_slice(&(extra.len() as u16).to_le_bytes());
            out.extend_from_slice(extra);
        }

        out.extend_from_slice(&self.data_id);
        out.extend_from_slice(&data_len.to_le_bytes());
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.trailing);
        out
    }

    /// Serialize the fixture into a file, replacing any existing one
    pub fn write_to(&self, path: impl AsRef<Path>) -> UtilResult<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}
