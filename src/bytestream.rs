//! Little-endian byte cursors for RIFF chunks
//!
//! `ByteReader` walks an in-memory WAV image and reports running out of
//! input as a truncation of the chunk being read. `ByteWriter` is the
//! mirror image over any `io::Write` sink.

use crate::error::{DecodeError, DecodeResult};
use std::io::{self, Write};

/// Reading cursor over a complete WAV image
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Current offset from the start of the input
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Borrow the next `len` bytes, failing as a truncated `chunk`
    pub fn take(&mut self, len: usize, chunk: &'static str) -> DecodeResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                chunk,
                declared: len as u64,
                available: available as u64,
            });
        }
        let bytes = self.bytes;
        let start = self.position;
        self.position += len;
        Ok(&bytes[start..self.position])
    }

    pub fn skip(&mut self, len: usize, chunk: &'static str) -> DecodeResult<()> {
        self.take(len, chunk).map(|_| ())
    }

    pub fn read_fourcc(&mut self, chunk: &'static str) -> DecodeResult<[u8; 4]> {
        let b = self.take(4, chunk)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    pub fn read_u16(&mut self, chunk: &'static str) -> DecodeResult<u16> {
        let b = self.take(2, chunk)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self, chunk: &'static str) -> DecodeResult<u32> {
        let b = self.take(4, chunk)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Little-endian writer over an output sink
pub struct ByteWriter<W: Write> {
    inner: W,
    /// Bytes written so far
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
