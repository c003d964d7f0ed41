// In: src/error.rs

//! This module defines the single, unified error type for the fissures core.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

use crate::types::{FilterKind, LocationType, UnitBase};

#[derive(Error, Debug)]
pub enum FissuresError {
    // =========================================================================
    // === Decode & Assembly Errors (fatal for one record)
    // =========================================================================
    #[error("Compression {0} not implemented")]
    UnsupportedCodec(i32),

    #[error("Unsupported sampling interval unit: {0} (expected SECOND)")]
    UnsupportedUnit(UnitBase),

    #[error("Invalid sampling interval: {0}")]
    InvalidInterval(String),

    #[error("Steim decoding failed: {0}")]
    SteimDecodeError(String),

    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: u64, actual: u64 },

    #[error("Record {index} ({channel}) failed: {source}")]
    RecordFailed {
        index: usize,
        channel: String,
        #[source]
        source: Box<FissuresError>,
    },

    // =========================================================================
    // === Metadata Extraction Errors (fatal for one extraction call)
    // =========================================================================
    #[error("Location types != \"GEOGRAPHIC\" are not supported (type: \"{0}\")")]
    UnsupportedLocationType(LocationType),

    #[error("Unexpected response filter type: {0} (expected POLEZERO)")]
    UnsupportedFilterVariant(FilterKind),

    #[error("Instrument response has no {0}")]
    IncompleteResponse(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // =========================================================================
    // === Collaborator Failures
    // =========================================================================
    /// Propagated unchanged from the directory collaborator, tagged with the request.
    #[error("Directory request {request} failed: {source}")]
    Directory {
        request: String,
        #[source]
        source: DirectoryError,
    },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically while loading configuration.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),
}

impl FissuresError {
    /// Strips `RecordFailed` wrappers and returns the underlying cause.
    pub fn root_cause(&self) -> &FissuresError {
        match self {
            FissuresError::RecordFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Failure categories of the network/seismogram directory collaborator.
/// The core never interprets or retries these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("service unreachable: {0}")]
    Unreachable(String),

    #[error("no data")]
    NoData,

    #[error("server returned ambiguous data ({0} matches)")]
    Ambiguous(usize),

    #[error("remote error: {0}")]
    Remote(String),
}
