//! Fixture builders for kernel and pipeline tests.

use crate::kernels::frames::{FRAME_BYTES, WORDS_PER_FRAME};
use crate::types::ByteOrder;

/// Builds a control word from `(word_index, nibble)` pairs.
pub(crate) fn control_word(nibbles: &[(usize, u32)]) -> u32 {
    nibbles
        .iter()
        .fold(0u32, |acc, &(idx, nib)| acc | (nib << (30 - 2 * idx)))
}

/// Serializes words in the given byte order, zero-padding to whole frames.
pub(crate) fn words_to_bytes(words: &[u32], order: ByteOrder) -> Vec<u8> {
    let mut bytes: Vec<u8> = words
        .iter()
        .flat_map(|w| match order {
            ByteOrder::Big => w.to_be_bytes(),
            ByteOrder::Little => w.to_le_bytes(),
        })
        .collect();
    let padded = bytes.len().div_ceil(FRAME_BYTES) * FRAME_BYTES;
    bytes.resize(padded, 0);
    bytes
}

/// Encodes samples as STEIM1 with one 32-bit difference per word.
///
/// Not space-efficient, but trivially correct, which is what the pipeline
/// tests need from a fixture.
pub(crate) fn steim1_wide(samples: &[i32], order: ByteOrder) -> Vec<u8> {
    let Some(&first) = samples.first() else {
        return Vec::new();
    };
    let last = samples[samples.len() - 1];

    let mut diffs = vec![0i32];
    diffs.extend(samples.windows(2).map(|w| w[1].wrapping_sub(w[0])));

    let mut words = Vec::new();
    let mut pending = diffs.into_iter().peekable();
    let mut frame_idx = 0;
    while pending.peek().is_some() {
        let first_data_word = if frame_idx == 0 { 3 } else { 1 };
        let mut frame = vec![0u32; WORDS_PER_FRAME];
        let mut nibbles = Vec::new();
        if frame_idx == 0 {
            frame[1] = first as u32;
            frame[2] = last as u32;
        }
        for (word_idx, slot) in frame.iter_mut().enumerate().skip(first_data_word) {
            match pending.next() {
                Some(diff) => {
                    *slot = diff as u32;
                    nibbles.push((word_idx, 0b11));
                }
                None => break,
            }
        }
        frame[0] = control_word(&nibbles);
        words.extend(frame);
        frame_idx += 1;
    }
    words_to_bytes(&words, order)
}

/// `swap` flag a decoder on this machine needs for data stored in `order`.
pub(crate) fn swap_for(order: ByteOrder) -> bool {
    order.needs_swap(ByteOrder::native())
}
