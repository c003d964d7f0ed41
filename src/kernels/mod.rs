//! This module collects the pure, stateless decoding kernels for the STEIM
//! difference-encoding family, and the `SteimCodec` seam the decoder dispatch
//! calls through.
//!
//! The dispatch in `pipeline::decoder` only ever talks to a `SteimCodec`. The
//! built-in `NativeSteimCodec` routes to the kernels below; callers with their
//! own codec library (or tests with a stub) plug in their own implementation.

use crate::error::FissuresError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Shared frame layout and integration logic.
pub mod frames;

pub mod steim1;
pub mod steim2;

#[cfg(test)]
pub(crate) mod test_support;

//==================================================================================
// 2. Codec Seam
//==================================================================================

/// The codec collaborator: one decode call per registered encoding.
///
/// Implementations must be deterministic and keep no state between calls.
/// `swap` is `true` when the chunk's byte order differs from the host's.
pub trait SteimCodec: Send + Sync {
    fn decode_steim1(
        &self,
        raw: &[u8],
        sample_count: usize,
        swap: bool,
    ) -> Result<Vec<i32>, FissuresError>;

    fn decode_steim2(
        &self,
        raw: &[u8],
        sample_count: usize,
        swap: bool,
    ) -> Result<Vec<i32>, FissuresError>;
}

/// The built-in, pure-Rust STEIM codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSteimCodec;

impl SteimCodec for NativeSteimCodec {
    fn decode_steim1(
        &self,
        raw: &[u8],
        sample_count: usize,
        swap: bool,
    ) -> Result<Vec<i32>, FissuresError> {
        steim1::decode(raw, sample_count, swap)
    }

    fn decode_steim2(
        &self,
        raw: &[u8],
        sample_count: usize,
        swap: bool,
    ) -> Result<Vec<i32>, FissuresError> {
        steim2::decode(raw, sample_count, swap)
    }
}
