// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` hands assembled traces to the columnar world. The pipeline never
// sees Arrow types; everything Arrow-specific lives here.
//
// Data Flow:
//
//   1. [Pipeline Engine (pipeline::Assembler)] -> Returns `Vec<Trace>`
//         |
//         `-> for each trace ->
//
//   2. [arrow_impl::trace_to_record_batch]    -> Receives `&Trace`
//         |
//         `-> a. Derives one timestamp per sample from start time and rate
//         |
//         `-> b. Builds the `time` / `sample` columns and the identity metadata
//
//   3. [Caller]                               -> `RecordBatch` per trace
//
// ====================================================================================
pub mod arrow_impl;

pub use arrow_impl::{
    trace_to_record_batch, traces_to_record_batches, META_CHANNEL, META_LOCATION, META_NETWORK,
    META_SAMPLING_RATE, META_STATION, SAMPLE_COLUMN, TIME_COLUMN,
};
