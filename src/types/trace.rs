//! The canonical, analysis-ready time series produced by the assembler.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FissuresError;

/// One continuous series of samples for a single channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trace {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
    pub start_time: DateTime<Utc>,
    pub sample_count: u64,
    /// Samples per second.
    pub sampling_rate: f64,
    pub data: Vec<i32>,
}

impl Trace {
    /// `NET.STA.LOC.CHA`
    pub fn id(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }

    /// Seconds between consecutive samples.
    pub fn delta(&self) -> f64 {
        1.0 / self.sampling_rate
    }

    /// Time of the last sample.
    pub fn end_time(&self) -> DateTime<Utc> {
        if self.sample_count <= 1 {
            return self.start_time;
        }
        let span_ns = ((self.sample_count - 1) as f64 / self.sampling_rate * 1e9).round();
        self.start_time + Duration::nanoseconds(span_ns as i64)
    }

    /// Checks that the header sample count agrees with the data.
    pub fn verify(&self) -> Result<(), FissuresError> {
        let actual = self.data.len() as u64;
        if actual != self.sample_count {
            return Err(FissuresError::SampleCountMismatch {
                expected: self.sample_count,
                actual,
            });
        }
        Ok(())
    }
}
