//! Channel interleaving utilities
//!
//! WAV stores the samples of one frame next to each other
//! (`L0, R0, L1, R1, ...`), while `SoundBuffer` keeps one vector per
//! channel. These helpers convert between the two layouts.

/// Split `L, R, L, R, ...` into two equal-length vectors.
///
/// An unpaired trailing sample is dropped.
pub fn deinterleave_stereo<T: Copy>(interleaved: &[T]) -> (Vec<T>, Vec<T>) {
    let frames = interleaved.len() / 2;
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for pair in interleaved.chunks_exact(2) {
        left.push(pair[0]);
        right.push(pair[1]);
    }
    (left, right)
}

/// Merge two channels into `L, R, L, R, ...`, stopping at the shorter one
pub fn interleave_stereo<T: Copy>(left: &[T], right: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(2 * left.len().min(right.len()));
    for (l, r) in left.iter().zip(right) {
        out.push(*l);
        out.push(*r);
    }
    out
}
