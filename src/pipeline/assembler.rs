// In: src/pipeline/assembler.rs

//! The trace assembler: seismogram records in, one `Trace` per data record out.
//!
//! For every record the assembler skips keep-alive placeholders, resolves the
//! sampling rate, decodes every chunk in received order and concatenates the
//! results left-to-right. Records are never merged with each other, even when
//! they belong to the same channel.
//!
//! A failing record never contributes partial data. How the batch reacts is
//! governed by `AssemblyConfig::error_policy`.

use std::sync::Arc;

use crate::config::{AssemblyConfig, ErrorPolicy, ExecutionMode};
use crate::error::FissuresError;
use crate::kernels::SteimCodec;
use crate::pipeline::decoder::decode_chunk;
use crate::pipeline::rate::resolve_rate;
use crate::types::{ByteOrder, SeismogramRecord, Trace};

//==================================================================================
// 1. Outcome Types
//==================================================================================

/// One record that could not be assembled.
#[derive(Debug)]
pub struct RecordFailure {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// `NET.STA.LOC.CHA` of the record.
    pub channel: String,
    pub error: FissuresError,
}

impl RecordFailure {
    /// Converts into the contextual `RecordFailed` error.
    pub fn into_error(self) -> FissuresError {
        FissuresError::RecordFailed {
            index: self.index,
            channel: self.channel,
            source: Box::new(self.error),
        }
    }
}

/// The result of assembling a batch of records.
#[derive(Debug, Default)]
pub struct AssemblyReport {
    /// Traces in input record order.
    pub traces: Vec<Trace>,
    /// Failed records in input order. Always empty under `ErrorPolicy::FailFast`.
    pub failures: Vec<RecordFailure>,
    pub keep_alive_skipped: usize,
}

impl AssemblyReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_traces(self) -> Vec<Trace> {
        self.traces
    }
}

//==================================================================================
// 2. The Assembler
//==================================================================================

/// Assembles records through a shared codec under a fixed configuration.
///
/// The assembler holds no per-call state; `assemble` may be called any number
/// of times, from any thread.
#[derive(Clone)]
pub struct Assembler {
    codec: Arc<dyn SteimCodec>,
    config: Arc<AssemblyConfig>,
}

impl Assembler {
    pub fn new(codec: Arc<dyn SteimCodec>, config: AssemblyConfig) -> Self {
        Self {
            codec,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Assembles a batch according to the configured error policy.
    ///
    /// Under `FailFast` the first failing record (by input index) is returned
    /// as `FissuresError::RecordFailed`. Under `CollectErrors` this never
    /// fails; failures are listed in the report.
    pub fn assemble(&self, records: &[SeismogramRecord]) -> Result<AssemblyReport, FissuresError> {
        let outcomes = match (self.config.execution, self.config.error_policy) {
            (ExecutionMode::Sequential, ErrorPolicy::FailFast) => {
                let mut outcomes = Vec::with_capacity(records.len());
                for (index, record) in records.iter().enumerate() {
                    let outcome = self.assemble_record(record);
                    let failed = outcome.is_err();
                    outcomes.push(outcome);
                    if failed {
                        log::debug!("Stopping batch at failing record {}", index);
                        break;
                    }
                }
                outcomes
            }
            (ExecutionMode::Sequential, ErrorPolicy::CollectErrors) => {
                records.iter().map(|r| self.assemble_record(r)).collect()
            }
            (ExecutionMode::Parallel { workers }, _) => self.assemble_parallel(records, workers),
        };

        let mut report = AssemblyReport::default();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(Some(trace)) => report.traces.push(trace),
                Ok(None) => report.keep_alive_skipped += 1,
                Err(error) => {
                    let failure = RecordFailure {
                        index,
                        channel: records[index].channel_id.to_string(),
                        error,
                    };
                    log::warn!(
                        "Record {} ({}) failed: {}",
                        failure.index,
                        failure.channel,
                        failure.error
                    );
                    match self.config.error_policy {
                        ErrorPolicy::FailFast => return Err(failure.into_error()),
                        ErrorPolicy::CollectErrors => report.failures.push(failure),
                    }
                }
            }
        }

        log::info!(
            "Assembled {} trace(s) from {} record(s): {} keep-alive skipped, {} failed",
            report.traces.len(),
            records.len(),
            report.keep_alive_skipped,
            report.failures.len()
        );
        Ok(report)
    }

    /// Assembles a single record. Returns `Ok(None)` for a keep-alive record.
    pub fn assemble_record(&self, record: &SeismogramRecord) -> Result<Option<Trace>, FissuresError> {
        assemble_record(self.codec.as_ref(), record, self.config.host_byte_order)
    }

    /// Decodes records on scoped worker threads, each taking a contiguous
    /// slice, and stitches the outcomes back in input order.
    fn assemble_parallel(
        &self,
        records: &[SeismogramRecord],
        workers: usize,
    ) -> Vec<Result<Option<Trace>, FissuresError>> {
        if records.is_empty() {
            return Vec::new();
        }
        let slice_len = records.len().div_ceil(workers.max(1));
        std::thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks(slice_len)
                .map(|slice| {
                    scope.spawn(move || {
                        slice
                            .iter()
                            .map(|record| self.assemble_record(record))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }
}

//==================================================================================
// 3. Stateless API
//==================================================================================

/// Builds the trace for one record, or `None` for a keep-alive record.
pub fn assemble_record<C>(
    codec: &C,
    record: &SeismogramRecord,
    host_byte_order: ByteOrder,
) -> Result<Option<Trace>, FissuresError>
where
    C: SteimCodec + ?Sized,
{
    if record.is_keep_alive() {
        log::debug!("Skipping keep-alive record for {}", record.channel_id);
        return Ok(None);
    }

    let sampling_rate = resolve_rate(&record.sampling_interval, record.sample_count)?;

    // Grown from decoded output only; declared counts are checked per chunk.
    let mut data: Vec<i32> = Vec::new();
    for chunk in &record.chunks {
        let samples = decode_chunk(codec, chunk, host_byte_order)?;
        data.extend_from_slice(&samples);
    }

    let id = &record.channel_id;
    let trace = Trace {
        network: id.network_code.clone(),
        station: id.station_code.clone(),
        location: id.site_code.trim_end().to_string(),
        channel: id.channel_code.clone(),
        start_time: record.begin_time,
        sample_count: record.sample_count,
        sampling_rate,
        data,
    };
    trace.verify()?;

    log_metric!(
        "event" = "assemble_record",
        "channel" = id,
        "chunks" = record.chunks.len(),
        "samples" = trace.sample_count,
        "rate" = trace.sampling_rate
    );
    Ok(Some(trace))
}

/// Assembles records fail-fast on the calling thread: one trace per record
/// with a nonzero sample count, in input order.
pub fn assemble<C>(
    records: &[SeismogramRecord],
    codec: &C,
    host_byte_order: ByteOrder,
) -> Result<Vec<Trace>, FissuresError>
where
    C: SteimCodec + ?Sized,
{
    let mut traces = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match assemble_record(codec, record, host_byte_order) {
            Ok(Some(trace)) => traces.push(trace),
            Ok(None) => {}
            Err(error) => {
                return Err(FissuresError::RecordFailed {
                    index,
                    channel: record.channel_id.to_string(),
                    source: Box::new(error),
                })
            }
        }
    }
    Ok(traces)
}
