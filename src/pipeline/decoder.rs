//! Chunk decoder dispatch: compression code + byte order -> codec call.

use crate::error::FissuresError;
use crate::kernels::SteimCodec;
use crate::types::{ByteOrder, EncodedChunk, Encoding};

/// Decodes one chunk through `codec`.
///
/// The compression code is resolved against the closed `Encoding` registry
/// first, so an unknown code fails with `UnsupportedCodec` before any codec
/// call. A codec result whose length disagrees with the chunk's declared
/// sample count is rejected; no partial output is ever returned.
pub fn decode_chunk<C>(
    codec: &C,
    chunk: &EncodedChunk,
    host_byte_order: ByteOrder,
) -> Result<Vec<i32>, FissuresError>
where
    C: SteimCodec + ?Sized,
{
    let encoding = Encoding::try_from(chunk.compression_code)?;
    let swap = chunk.byte_order.needs_swap(host_byte_order);

    let samples = match encoding {
        Encoding::Steim1 => codec.decode_steim1(&chunk.values, chunk.sample_count, swap)?,
        Encoding::Steim2 => codec.decode_steim2(&chunk.values, chunk.sample_count, swap)?,
    };

    if samples.len() != chunk.sample_count {
        return Err(FissuresError::SampleCountMismatch {
            expected: chunk.sample_count as u64,
            actual: samples.len() as u64,
        });
    }

    log_metric!(
        "event" = "decode_chunk",
        "encoding" = encoding,
        "swap" = swap,
        "samples" = samples.len()
    );
    Ok(samples)
}
