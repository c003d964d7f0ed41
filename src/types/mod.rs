//! This module defines the core, strongly-typed data representations used
//! throughout the waveform assembly pipeline.
//!
//! It includes the records handed over by the directory collaborator
//! (`SeismogramRecord`, `EncodedChunk`), the canonical output `Trace`, and the
//! station/response metadata shapes consumed by the extractors.

pub mod byte_order;
pub mod encoding;
pub mod metadata;
pub mod records;
pub mod trace;

// Re-export the main types for easier access.
pub use byte_order::ByteOrder;
pub use encoding::Encoding;
pub use metadata::{
    Channel, CoefficientFilter, Complex, ComplexNumberErrored, CoordinateRecord, Filter,
    FilterKind, InstrumentResponse, ListFilter, LocationType, Normalization, PoleZeroFilter,
    PoleZeroFilterData, ResponseStage, Station, StationId, StationLocation, TimeRange,
};
pub use records::{ChannelId, EncodedChunk, RequestFilter, SamplingInterval, SeismogramRecord, UnitBase};
pub use trace::Trace;
