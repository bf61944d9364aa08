//! Decoded audio held as normalized floating-point channels

use crate::error::{BufferError, BufferResult};
use crate::format::Channels;

/// Bit depth of everything the encoder writes
pub const OUTPUT_BIT_DEPTH: u16 = 16;

/// Normalized sample data for one mono or stereo sound.
///
/// Samples nominally lie in `[-1.0, 1.0]`; decoded float sources may
/// exceed that range and are kept as-is. A buffer is immutable once built:
/// the constructors check the invariants (`sample_rate > 0`, equal channel
/// lengths) and no method can break them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundBuffer {
    sample_rate: u32,
    left: Vec<f32>,
    right: Option<Vec<f32>>,
}

impl SoundBuffer {
    /// Build a buffer, mono when `right` is `None`
    pub fn new(sample_rate: u32, left: Vec<f32>, right: Option<Vec<f32>>) -> BufferResult<Self> {
        if sample_rate == 0 {
            return Err(BufferError::ZeroSampleRate);
        }
        if let Some(right) = &right {
            if right.len() != left.len() {
                return Err(BufferError::ChannelLengthMismatch {
                    left: left.len(),
                    right: right.len(),
                });
            }
        }
        Ok(Self {
            sample_rate,
            left,
            right,
        })
    }

    /// Constructor for callers that have already checked the invariants
    pub(crate) fn from_validated(sample_rate: u32, left: Vec<f32>, right: Option<Vec<f32>>) -> Self {
        debug_assert!(sample_rate > 0);
        debug_assert!(right.as_ref().map_or(true, |r| r.len() == left.len()));
        Self {
            sample_rate,
            left,
            right,
        }
    }

    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> BufferResult<Self> {
        Self::new(sample_rate, samples, None)
    }

    pub fn stereo(sample_rate: u32, left: Vec<f32>, right: Vec<f32>) -> BufferResult<Self> {
        Self::new(sample_rate, left, Some(right))
    }

    /// Frames per second
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Left channel, or the only channel of a mono sound
    pub fn left(&self) -> &[f32] {
        &self.left
    }

    /// Right channel; `None` for mono
    pub fn right(&self) -> Option<&[f32]> {
        self.right.as_deref()
    }

    pub fn channels(&self) -> Channels {
        match self.right {
            Some(_) => Channels::Stereo,
            None => Channels::Mono,
        }
    }

    /// Samples per channel
    pub fn frame_count(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }

    /// Take the channel vectors without copying
    pub fn into_parts(self) -> (u32, Vec<f32>, Option<Vec<f32>>) {
        (self.sample_rate, self.left, self.right)
    }
}
