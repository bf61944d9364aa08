//! WAV encoding
//!
//! Every buffer is written as canonical 16-bit PCM: a 44-byte header
//! followed by the samples, interleaved `L, R, L, R, ...` for stereo.
//!
//! # Saturation
//!
//! Floats are clamped to `[-1.0, 1.0]` before being scaled by 32767 and
//! truncated toward zero, so out-of-range input saturates at `±32767`
//! instead of wrapping around. NaN is written as silence. Note that
//! `-32768` is never produced.

use crate::buffer::{SoundBuffer, OUTPUT_BIT_DEPTH};
use crate::bytestream::ByteWriter;
use crate::error::{EncodeError, EncodeResult};
use crate::format::{
    Channels, FmtChunk, DATA_ID, FMT_CHUNK_SIZE, FMT_ID, HEADER_OVERHEAD, MAX_DATA_BYTES,
    PCM16_SCALE, RIFF_MAGIC, WAVE_FORM,
};
use crate::pcm_utils::interleave_stereo;
use log::debug;
use std::io::Write;

/// Encode a buffer into an in-memory WAV image
pub fn encode(buffer: &SoundBuffer) -> EncodeResult<Vec<u8>> {
    let data_len = data_byte_count(buffer)?;
    let mut out = Vec::with_capacity((HEADER_OVERHEAD + data_len) as usize + 8);
    encode_to(buffer, &mut out)?;
    Ok(out)
}

/// Encode a buffer into any byte sink.
///
/// The size check runs before the first byte is written. After an I/O
/// error the sink holds an unspecified prefix of the file.
pub fn encode_to<W: Write>(buffer: &SoundBuffer, sink: W) -> EncodeResult<()> {
    let data_len = data_byte_count(buffer)?;
    let fmt = FmtChunk::pcm16(buffer.channels(), buffer.sample_rate());
    let mut writer = ByteWriter::new(sink);

    write_header(&mut writer, &fmt, data_len)?;
    match buffer.right() {
        None => {
            for &sample in buffer.left() {
                writer.write_i16(quantize_sample(sample))?;
            }
        }
        Some(right) => {
            for &sample in &interleave_stereo(buffer.left(), right) {
                writer.write_i16(quantize_sample(sample))?;
            }
        }
    }

    debug!(
        "Encoded {} frame(s) at {} Hz into {} bytes",
        buffer.frame_count(),
        buffer.sample_rate(),
        writer.bytes_written()
    );
    writer.finish()?;
    Ok(())
}

/// Convert one normalized sample to 16-bit PCM with saturation
pub fn quantize_sample(sample: f32) -> i16 {
    // `as` maps NaN to 0; the clamp keeps the product inside i16
    (sample.clamp(-1.0, 1.0) * PCM16_SCALE) as i16
}

/// `data` payload size of `frames` output frames, or `TooLarge` when the
/// RIFF size fields cannot hold it
pub fn data_len_for(frames: usize, channels: Channels) -> EncodeResult<u32> {
    let frame_bytes = u64::from(channels.count()) * u64::from(OUTPUT_BIT_DEPTH / 8);
    let data_bytes = frames as u64 * frame_bytes;
    if data_bytes > u64::from(MAX_DATA_BYTES) {
        return Err(EncodeError::TooLarge { data_bytes });
    }
    Ok(data_bytes as u32)
}

pub(crate) fn data_byte_count(buffer: &SoundBuffer) -> EncodeResult<u32> {
    data_len_for(buffer.frame_count(), buffer.channels())
}

fn write_header<W: Write>(
    writer: &mut ByteWriter<W>,
    fmt: &FmtChunk,
    data_len: u32,
) -> EncodeResult<()> {
    writer.write_bytes(&RIFF_MAGIC)?;
    writer.write_u32(HEADER_OVERHEAD + data_len)?;
    writer.write_bytes(&WAVE_FORM)?;

    writer.write_bytes(&FMT_ID)?;
    writer.write_u32(FMT_CHUNK_SIZE)?;
    writer.write_u16(fmt.format_code)?;
    writer.write_u16(fmt.channels)?;
    writer.write_u32(fmt.sample_rate)?;
    writer.write_u32(fmt.byte_rate)?;
    writer.write_u16(fmt.block_align)?;
    writer.write_u16(fmt.bits_per_sample)?;

    writer.write_bytes(&DATA_ID)?;
    writer.write_u32(data_len)?;
    Ok(())
}
