//! This module contains the pure, stateless kernel for STEIM1 decoding.
//!
//! STEIM1 packs first differences into 32-bit words as four 8-bit, two 16-bit
//! or one 32-bit value, selected per word by the frame's control nibbles.

use crate::error::FissuresError;
use crate::kernels::frames::{decode_frames, push_bytes, push_packed};

/// Unpacks the differences carried by one STEIM1 data word.
fn unpack_word(nibble: u8, word: u32, diffs: &mut Vec<i32>) -> Result<(), FissuresError> {
    match nibble {
        0b00 => {} // no data in this word
        0b01 => push_bytes(word, diffs),
        0b10 => push_packed(word, 2, 16, diffs),
        _ => diffs.push(word as i32),
    }
    Ok(())
}

/// Decodes `sample_count` samples from STEIM1 frames.
pub fn decode(raw: &[u8], sample_count: usize, swap: bool) -> Result<Vec<i32>, FissuresError> {
    decode_frames(raw, sample_count, swap, "STEIM1", unpack_word)
}
