//! Frame layout shared by the STEIM1 and STEIM2 kernels.
//!
//! Data is a sequence of 64-byte frames of sixteen 32-bit words. Word 0 of
//! each frame is a control word holding one 2-bit nibble per word of the
//! frame. In the first frame, words 1 and 2 hold the forward (X0) and reverse
//! (Xn) integration constants. Every other word carries packed differences.

use crate::error::FissuresError;

pub const FRAME_BYTES: usize = 64;
pub const WORDS_PER_FRAME: usize = 16;

//==================================================================================
// 1. Word Access
//==================================================================================

/// Reads the buffer as host-order 32-bit words, byte-swapping each if `swap`.
pub(crate) fn read_words(raw: &[u8], swap: bool) -> Result<Vec<u32>, FissuresError> {
    if raw.len() % FRAME_BYTES != 0 {
        return Err(FissuresError::BufferMismatch(FRAME_BYTES, raw.len()));
    }
    Ok(raw
        .chunks_exact(4)
        .map(|bytes| {
            let word: u32 = bytemuck::pod_read_unaligned(bytes);
            if swap {
                word.swap_bytes()
            } else {
                word
            }
        })
        .collect())
}

/// The 2-bit nibble describing word `index` of a frame.
#[inline]
pub(crate) fn nibble(control: u32, index: usize) -> u8 {
    ((control >> (30 - 2 * index)) & 0b11) as u8
}

/// Sign-extends the low `bits` bits of `value`.
#[inline]
pub(crate) fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Pushes `count` signed differences of `bits` width, most significant first.
/// `count * bits` must not exceed 30.
#[inline]
pub(crate) fn push_packed(word: u32, count: u32, bits: u32, diffs: &mut Vec<i32>) {
    let mask = (1u32 << bits) - 1;
    for i in (0..count).rev() {
        diffs.push(sign_extend((word >> (i * bits)) & mask, bits));
    }
}

/// Pushes the four 8-bit differences of a byte-packed word.
#[inline]
pub(crate) fn push_bytes(word: u32, diffs: &mut Vec<i32>) {
    for byte in word.to_be_bytes() {
        diffs.push(byte as i8 as i32);
    }
}

//==================================================================================
// 2. Frame Walk & Integration
//==================================================================================

/// Walks all frames, unpacking differences with `unpack`, then integrates them
/// into exactly `sample_count` samples.
///
/// `unpack` receives the nibble and the data word and appends any differences
/// the word carries.
pub(crate) fn decode_frames<F>(
    raw: &[u8],
    sample_count: usize,
    swap: bool,
    codec_name: &str,
    mut unpack: F,
) -> Result<Vec<i32>, FissuresError>
where
    F: FnMut(u8, u32, &mut Vec<i32>) -> Result<(), FissuresError>,
{
    if sample_count == 0 {
        return Ok(Vec::new());
    }
    let words = read_words(raw, swap)?;
    if words.is_empty() {
        return Err(FissuresError::SteimDecodeError(format!(
            "{}: no frames for {} samples",
            codec_name, sample_count
        )));
    }

    let forward = words[1] as i32;
    let reverse = words[2] as i32;

    // At most seven differences per word; the declared count is untrusted.
    let mut diffs: Vec<i32> = Vec::with_capacity(sample_count.min(words.len() * 7));
    for (frame_idx, frame) in words.chunks_exact(WORDS_PER_FRAME).enumerate() {
        if diffs.len() >= sample_count {
            break;
        }
        let control = frame[0];
        let first_data_word = if frame_idx == 0 { 3 } else { 1 };
        for (word_idx, &word) in frame.iter().enumerate().skip(first_data_word) {
            unpack(nibble(control, word_idx), word, &mut diffs)?;
        }
    }

    if diffs.len() < sample_count {
        return Err(FissuresError::SteimDecodeError(format!(
            "{}: expected {} samples, frames hold only {}",
            codec_name,
            sample_count,
            diffs.len()
        )));
    }

    // The first difference refers to the previous record and is replaced by X0.
    let mut samples = Vec::with_capacity(sample_count);
    let mut last = forward;
    samples.push(last);
    for &diff in &diffs[1..sample_count] {
        last = last.wrapping_add(diff);
        samples.push(last);
    }

    if last != reverse {
        log::warn!(
            "{}: last sample {} does not match reverse integration constant {}",
            codec_name,
            last,
            reverse
        );
    }
    Ok(samples)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
