//! Station and instrument-response shapes returned by network metadata queries,
//! and the extracted records built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ChannelId;

//==================================================================================
// I. Effective Time
//==================================================================================

/// The effective time of a station or channel epoch. An open epoch has no end.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Strict containment: `start < at < end`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at > self.start_time && self.end_time.map_or(true, |end| at < end)
    }
}

//==================================================================================
// II. Stations & Channels
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Geographic,
    Geocentric,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationType::Geographic => f.write_str("GEOGRAPHIC"),
            LocationType::Geocentric => f.write_str("GEOCENTRIC"),
        }
    }
}

/// A station position as reported by the network service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StationLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    /// Unit name of the elevation quantity, e.g. `"METER"`.
    pub elevation_unit: String,
    pub location_type: LocationType,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationId {
    pub network_code: String,
    pub station_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub location: StationLocation,
    pub effective_time: TimeRange,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub effective_time: TimeRange,
}

/// Coordinates pulled out of a `StationLocation`, values unconverted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub elevation_unit: String,
    pub location_type: LocationType,
}

//==================================================================================
// III. Instrument Response
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ComplexNumberErrored {
    pub real: f64,
    pub imaginary: f64,
    #[serde(default)]
    pub real_error: f64,
    #[serde(default)]
    pub imaginary_error: f64,
}

impl ComplexNumberErrored {
    pub fn new(real: f64, imaginary: f64) -> Self {
        Self {
            real,
            imaginary,
            real_error: 0.0,
            imaginary_error: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PoleZeroFilterData {
    pub poles: Vec<ComplexNumberErrored>,
    pub zeros: Vec<ComplexNumberErrored>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CoefficientFilter {
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ListFilter {
    pub frequency: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub phase: Vec<f64>,
}

/// A response filter, discriminated the way the Fissures `Filter` union is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Filter {
    PoleZero(PoleZeroFilterData),
    Coefficient(CoefficientFilter),
    List(ListFilter),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::PoleZero(_) => FilterKind::PoleZero,
            Filter::Coefficient(_) => FilterKind::Coefficient,
            Filter::List(_) => FilterKind::List,
        }
    }
}

/// The bare discriminant of a `Filter`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterKind {
    PoleZero,
    Coefficient,
    List,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::PoleZero => f.write_str("POLEZERO"),
            FilterKind::Coefficient => f.write_str("COEFFICIENT"),
            FilterKind::List => f.write_str("LIST"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub ao_normalization_factor: f64,
    pub normalization_freq: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ResponseStage {
    #[serde(default)]
    pub normalization: Option<Normalization>,
    pub filters: Vec<Filter>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InstrumentResponse {
    pub stages: Vec<ResponseStage>,
}

//==================================================================================
// IV. Extracted Pole/Zero Parameters
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// Pole/zero parameter set of the first response stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PoleZeroFilter {
    pub poles: Vec<Complex>,
    pub zeros: Vec<Complex>,
    pub gain: f64,
    #[serde(default)]
    pub normalization_frequency: Option<f64>,
}
