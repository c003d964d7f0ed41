//! Seismogram records as handed over by the directory collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ByteOrder;

/// Identity of one channel: network, station, site (location) and channel codes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId {
    pub network_code: String,
    pub station_code: String,
    /// Raw site code. Blank locations are usually two spaces on the wire.
    pub site_code: String,
    pub channel_code: String,
}

impl ChannelId {
    pub fn new(network: &str, station: &str, site: &str, channel: &str) -> Self {
        Self {
            network_code: network.to_string(),
            station_code: station.to_string(),
            site_code: site.to_string(),
            channel_code: channel.to_string(),
        }
    }
}

/// Renders as `NET.STA.LOC.CHA` with the site code right-trimmed.
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.network_code,
            self.station_code,
            self.site_code.trim_end(),
            self.channel_code
        )
    }
}

/// Base unit of a Fissures `UnitImpl`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitBase {
    Meter,
    Second,
    Gram,
    Ampere,
    Kelvin,
    Mole,
    Candela,
    Count,
    Composite,
}

impl fmt::Display for UnitBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitBase::Meter => "METER",
            UnitBase::Second => "SECOND",
            UnitBase::Gram => "GRAM",
            UnitBase::Ampere => "AMPERE",
            UnitBase::Kelvin => "KELVIN",
            UnitBase::Mole => "MOLE",
            UnitBase::Candela => "CANDELA",
            UnitBase::Count => "COUNT",
            UnitBase::Composite => "COMPOSITE",
        };
        f.write_str(name)
    }
}

/// The sampling interval quantity of a record.
///
/// The physical interval is `(value * 10^power * multiplier)^exponent` in units
/// of `unit_base`; only seconds are accepted by the rate resolver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SamplingInterval {
    pub value: f64,
    pub unit_base: UnitBase,
    pub power: i32,
    pub multiplier: f64,
    pub exponent: i32,
}

impl SamplingInterval {
    /// A plain interval of `value` seconds.
    pub fn seconds(value: f64) -> Self {
        Self {
            value,
            unit_base: UnitBase::Second,
            power: 0,
            multiplier: 1.0,
            exponent: 1,
        }
    }
}

/// A contiguous block of compressed samples inside one seismogram record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedChunk {
    pub compression_code: i32,
    pub byte_order: ByteOrder,
    pub sample_count: usize,
    pub values: Vec<u8>,
}

/// One channel-interval worth of data returned by a seismogram query.
///
/// A record with `sample_count == 0` is a keep-alive placeholder and carries
/// no data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeismogramRecord {
    pub channel_id: ChannelId,
    pub begin_time: DateTime<Utc>,
    pub sample_count: u64,
    pub sampling_interval: SamplingInterval,
    pub chunks: Vec<EncodedChunk>,
}

impl SeismogramRecord {
    pub fn is_keep_alive(&self) -> bool {
        self.sample_count == 0
    }
}

/// A request for one channel over a time window.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    pub channel_id: ChannelId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_id_display_trims_site() {
        let id = ChannelId::new("GE", "APE", "  ", "SHZ");
        assert_eq!(id.to_string(), "GE.APE..SHZ");
        let id = ChannelId::new("IU", "ANMO", "00 ", "BHZ");
        assert_eq!(id.to_string(), "IU.ANMO.00.BHZ");
    }

    #[test]
    fn test_unit_base_serde_tag() {
        let json = serde_json::to_string(&UnitBase::Second).unwrap();
        assert_eq!(json, "\"SECOND\"");
        assert_eq!(UnitBase::Meter.to_string(), "METER");
    }
}
