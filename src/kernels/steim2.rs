//! This module contains the pure, stateless kernel for STEIM2 decoding.
//!
//! STEIM2 extends STEIM1 with denser packings. For nibbles `10` and `11` the
//! top two bits of the data word (the "dnib") select how the remaining 30
//! bits are split:
//!
//! | nibble | dnib | differences      |
//! |--------|------|------------------|
//! | 01     | -    | 4 x 8 bit        |
//! | 10     | 01   | 1 x 30 bit       |
//! | 10     | 10   | 2 x 15 bit       |
//! | 10     | 11   | 3 x 10 bit       |
//! | 11     | 00   | 5 x 6 bit        |
//! | 11     | 01   | 6 x 5 bit        |
//! | 11     | 10   | 7 x 4 bit        |

use crate::error::FissuresError;
use crate::kernels::frames::{decode_frames, push_bytes, push_packed};

fn unpack_word(nibble: u8, word: u32, diffs: &mut Vec<i32>) -> Result<(), FissuresError> {
    let dnib = word >> 30;
    match nibble {
        0b00 => {}
        0b01 => push_bytes(word, diffs),
        0b10 => match dnib {
            0b01 => push_packed(word, 1, 30, diffs),
            0b10 => push_packed(word, 2, 15, diffs),
            0b11 => push_packed(word, 3, 10, diffs),
            _ => {
                return Err(FissuresError::SteimDecodeError(format!(
                    "STEIM2: invalid dnib {:02b} for nibble 10",
                    dnib
                )))
            }
        },
        _ => match dnib {
            0b00 => push_packed(word, 5, 6, diffs),
            0b01 => push_packed(word, 6, 5, diffs),
            0b10 => push_packed(word, 7, 4, diffs),
            _ => {
                return Err(FissuresError::SteimDecodeError(format!(
                    "STEIM2: invalid dnib {:02b} for nibble 11",
                    dnib
                )))
            }
        },
    }
    Ok(())
}

/// Decodes `sample_count` samples from STEIM2 frames.
pub fn decode(raw: &[u8], sample_count: usize, swap: bool) -> Result<Vec<i32>, FissuresError> {
    decode_frames(raw, sample_count, swap, "STEIM2", unpack_word)
}
