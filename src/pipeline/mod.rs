// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Waveform Pipeline
// ====================================================================================
//
// Data Flow (per seismogram record):
//
//   1. [Assembler]        -> Receives `&[SeismogramRecord]` from the directory collaborator
//         |
//         `-> skips keep-alive records (sample_count == 0)
//         |
//   2. [Rate Resolver]    -> sampling interval descriptor + sample count -> Hz
//         |
//   3. [Decoder Dispatch] -> for each `EncodedChunk`, in received order:
//         |                  compression code -> `Encoding` -> `SteimCodec` call
//         |
//         `-> concatenated samples, verified against the declared sample count
//         |
//   4. [Assembler]        -> `Trace` per record, collected into an `AssemblyReport`
//
// ====================================================================================
pub mod assembler;
pub mod decoder;
pub mod rate;

pub use assembler::{assemble, assemble_record, Assembler, AssemblyReport, RecordFailure};
pub use decoder::decode_chunk;
pub use rate::{interval_seconds, resolve_rate};
