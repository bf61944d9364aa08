//! WAV decoding
//!
//! The decoder expects the canonical layout: a `RIFF`/`WAVE` header, then a
//! `fmt ` chunk of 16 or 18 bytes, then the `data` chunk. 16-bit integer
//! samples are normalized by dividing by 32767; 32- and 64-bit samples are
//! read as IEEE floats. Any failure aborts the whole decode.

use crate::buffer::SoundBuffer;
use crate::bytestream::ByteReader;
use crate::error::{DecodeResult, FormatError};
use crate::format::{
    Channels, FmtChunk, SampleFormat, WavHeader, DATA_ID, FMT_CHUNK_SIZE,
    FMT_CHUNK_SIZE_EXTENDED, FMT_ID, FORMAT_EXTENSIBLE, PCM16_SCALE, RIFF_MAGIC, WAVE_FORM,
};
use crate::pcm_utils::deinterleave_stereo;
use log::{debug, warn};

/// Decode a complete WAV image into a sound buffer
pub fn decode(bytes: &[u8]) -> DecodeResult<SoundBuffer> {
    let (header, channels, format) = parse_header(bytes)?;

    let frames = header.frame_count();
    let usable = frames * header.fmt.frame_bytes() as usize;
    if usable < header.data_len as usize {
        warn!(
            "Ignoring {} trailing byte(s) that do not form a whole frame",
            header.data_len as usize - usable
        );
    }

    let payload = &bytes[header.data_offset..header.data_offset + usable];
    let samples = convert_samples(payload, format);

    let sample_rate = header.fmt.sample_rate;
    let buffer = match channels {
        Channels::Mono => SoundBuffer::from_validated(sample_rate, samples, None),
        Channels::Stereo => {
            let (left, right) = deinterleave_stereo(&samples);
            SoundBuffer::from_validated(sample_rate, left, Some(right))
        }
    };
    Ok(buffer)
}

/// Parse and validate the header without converting any samples.
///
/// On success the whole declared `data` payload is present in `bytes`.
pub fn inspect(bytes: &[u8]) -> DecodeResult<WavHeader> {
    parse_header(bytes).map(|(header, _, _)| header)
}

fn parse_header(bytes: &[u8]) -> DecodeResult<(WavHeader, Channels, SampleFormat)> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_fourcc("RIFF")?;
    if magic != RIFF_MAGIC {
        return Err(FormatError::InvalidRiffMagic { found: magic }.into());
    }
    let riff_len = reader.read_u32("RIFF")?;
    let form = reader.read_fourcc("RIFF")?;
    if form != WAVE_FORM {
        return Err(FormatError::InvalidFormType { found: form }.into());
    }

    let (fmt, fmt_extra_len) = read_fmt_chunk(&mut reader)?;
    let (channels, format) = fmt.validate()?;
    if fmt.sample_rate == 0 {
        return Err(FormatError::ZeroSampleRate.into());
    }
    check_informational_fields(&fmt, format);

    expect_chunk(&mut reader, DATA_ID, "data")?;
    let data_len = reader.read_u32("data")?;
    let data_offset = reader.position();
    reader.skip(data_len as usize, "data")?;

    let actual_riff_len = bytes.len().saturating_sub(8);
    if riff_len as usize != actual_riff_len {
        debug!(
            "RIFF size field says {} bytes, file holds {}",
            riff_len, actual_riff_len
        );
    }

    let header = WavHeader {
        fmt,
        fmt_extra_len,
        data_len,
        riff_len,
        data_offset,
    };
    debug!(
        "Parsed WAV header: {} Hz, {} channel(s), {}-bit, {} data bytes",
        fmt.sample_rate, fmt.channels, fmt.bits_per_sample, data_len
    );
    Ok((header, channels, format))
}

fn expect_chunk(
    reader: &mut ByteReader<'_>,
    expected: [u8; 4],
    chunk: &'static str,
) -> DecodeResult<()> {
    let found = reader.read_fourcc(chunk)?;
    if found != expected {
        return Err(FormatError::UnexpectedChunk { expected, found }.into());
    }
    Ok(())
}

fn read_fmt_chunk(reader: &mut ByteReader<'_>) -> DecodeResult<(FmtChunk, u16)> {
    expect_chunk(reader, FMT_ID, "fmt ")?;
    let size = reader.read_u32("fmt ")?;
    if size != FMT_CHUNK_SIZE && size != FMT_CHUNK_SIZE_EXTENDED {
        return Err(FormatError::InvalidFmtSize(size).into());
    }

    let fmt = FmtChunk {
        format_code: reader.read_u16("fmt ")?,
        channels: reader.read_u16("fmt ")?,
        sample_rate: reader.read_u32("fmt ")?,
        byte_rate: reader.read_u32("fmt ")?,
        block_align: reader.read_u16("fmt ")?,
        bits_per_sample: reader.read_u16("fmt ")?,
    };

    // The extension-size field is followed by that many bytes, which are
    // not counted in the 18-byte chunk size.
    let mut extra_len = 0;
    if size == FMT_CHUNK_SIZE_EXTENDED {
        extra_len = reader.read_u16("fmt ")?;
        reader.skip(usize::from(extra_len), "fmt ")?;
    }
    Ok((fmt, extra_len))
}

fn check_informational_fields(fmt: &FmtChunk, format: SampleFormat) {
    let frame_bytes = fmt.frame_bytes();
    if u32::from(fmt.block_align) != frame_bytes {
        debug!(
            "block_align is {}, expected {} for {} channel(s) at {} bits",
            fmt.block_align, frame_bytes, fmt.channels, fmt.bits_per_sample
        );
    }
    let byte_rate = u64::from(fmt.sample_rate) * u64::from(frame_bytes);
    if u64::from(fmt.byte_rate) != byte_rate {
        debug!("byte_rate is {}, expected {}", fmt.byte_rate, byte_rate);
    }

    let expected = format.expected_format_code();
    if fmt.format_code != expected && fmt.format_code != FORMAT_EXTENSIBLE {
        warn!(
            "Format code {:#06x} does not match {}-bit samples; decoding as {:?}",
            fmt.format_code, fmt.bits_per_sample, format
        );
    }
}

/// Convert raw little-endian sample bytes to normalized floats
fn convert_samples(payload: &[u8], format: SampleFormat) -> Vec<f32> {
    payload
        .chunks_exact(format.bytes_per_sample())
        .map(|b| match format {
            SampleFormat::Int16 => f32::from(i16::from_le_bytes([b[0], b[1]])) / PCM16_SCALE,
            SampleFormat::Float32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            SampleFormat::Float64 => {
                f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32
            }
        })
        .collect()
}
