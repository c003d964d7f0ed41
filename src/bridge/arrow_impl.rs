// In: src/bridge/arrow_impl.rs

//! Conversions from `Trace` into Arrow record batches.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;

use crate::error::FissuresError;
use crate::types::Trace;

pub const TIME_COLUMN: &str = "time";
pub const SAMPLE_COLUMN: &str = "sample";

pub const META_NETWORK: &str = "network";
pub const META_STATION: &str = "station";
pub const META_LOCATION: &str = "location";
pub const META_CHANNEL: &str = "channel";
pub const META_SAMPLING_RATE: &str = "sampling_rate";

const UTC: &str = "UTC";

/// Builds a two-column batch (`time`, `sample`) for one trace.
///
/// Sample `i` is stamped `start_time + round(i * 1e6 / sampling_rate)` µs.
/// The trace identity and sampling rate are carried as schema metadata.
pub fn trace_to_record_batch(trace: &Trace) -> Result<RecordBatch, FissuresError> {
    trace.verify()?;
    if !trace.sampling_rate.is_finite() || trace.sampling_rate <= 0.0 {
        return Err(FissuresError::InvalidInterval(format!(
            "trace {} has sampling rate {}",
            trace.id(),
            trace.sampling_rate
        )));
    }

    let start_us = trace.start_time.timestamp_micros();
    let step_us = 1e6 / trace.sampling_rate;
    let times: Vec<i64> = (0..trace.data.len())
        .map(|i| start_us + (i as f64 * step_us).round() as i64)
        .collect();

    let metadata: HashMap<String, String> = [
        (META_NETWORK, trace.network.clone()),
        (META_STATION, trace.station.clone()),
        (META_LOCATION, trace.location.clone()),
        (META_CHANNEL, trace.channel.clone()),
        (META_SAMPLING_RATE, trace.sampling_rate.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let schema = Arc::new(Schema::new_with_metadata(
        vec![
            Field::new(
                TIME_COLUMN,
                DataType::Timestamp(TimeUnit::Microsecond, Some(UTC.into())),
                false,
            ),
            Field::new(SAMPLE_COLUMN, DataType::Int32, false),
        ],
        metadata,
    ));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampMicrosecondArray::from(times).with_timezone(UTC)),
        Arc::new(Int32Array::from(trace.data.clone())),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Converts traces one batch per trace, in order. Stops at the first failure.
pub fn traces_to_record_batches(traces: &[Trace]) -> Result<Vec<RecordBatch>, FissuresError> {
    traces.iter().map(trace_to_record_batch).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use chrono::{Duration, TimeZone, Utc};

    fn trace(data: Vec<i32>, sampling_rate: f64) -> Trace {
        Trace {
            network: "GE".to_string(),
            station: "APE".to_string(),
            location: String::new(),
            channel: "SHZ".to_string(),
            start_time: Utc.with_ymd_and_hms(2003, 6, 20, 5, 59, 9).unwrap()
                + Duration::milliseconds(401),
            sample_count: data.len() as u64,
            sampling_rate,
            data,
        }
    }

    #[test]
    fn test_columns_and_metadata() {
        let t = trace(vec![10, -3, 7], 50.0);
        let batch = trace_to_record_batch(&t).unwrap();

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 2);

        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), TIME_COLUMN);
        assert_eq!(
            schema.field(0).data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        );
        assert_eq!(schema.metadata().get(META_STATION).map(String::as_str), Some("APE"));
        assert_eq!(schema.metadata().get(META_LOCATION).map(String::as_str), Some(""));
        assert_eq!(schema.metadata().get(META_SAMPLING_RATE).map(String::as_str), Some("50"));

        let times = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .unwrap();
        let start = t.start_time.timestamp_micros();
        assert_eq!(times.value(0), start);
        assert_eq!(times.value(1), start + 20_000);
        assert_eq!(times.value(2), start + 40_000);

        let samples = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(samples.values().to_vec(), vec![10, -3, 7]);
        assert_eq!(samples.null_count(), 0);
    }

    #[test]
    fn test_last_timestamp_matches_end_time() {
        let t = trace(vec![0; 33060], 50.0);
        let batch = trace_to_record_batch(&t).unwrap();
        let times = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .unwrap();
        assert_eq!(times.value(33059), t.end_time().timestamp_micros());
    }

    #[test]
    fn test_rejects_inconsistent_traces() {
        let mut short = trace(vec![1, 2], 50.0);
        short.sample_count = 3;
        assert!(matches!(
            trace_to_record_batch(&short),
            Err(FissuresError::SampleCountMismatch { .. })
        ));

        let zero_rate = trace(vec![1], 0.0);
        assert!(matches!(
            trace_to_record_batch(&zero_rate),
            Err(FissuresError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_batches_follow_trace_order() {
        let traces = vec![trace(vec![1], 1.0), trace(vec![2, 3], 1.0)];
        let batches = traces_to_record_batches(&traces).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].num_rows(), 2);
        assert!(traces_to_record_batches(&[]).unwrap().is_empty());
    }
}
