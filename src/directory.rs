// In: src/directory.rs

//! The directory/lookup collaborator seam.
//!
//! Everything that talks to the remote network and seismogram services sits
//! behind `DirectoryService`. The core never resolves object handles or
//! composes directory names itself; it only asks for stations, channels,
//! records and responses, and passes any `DirectoryError` straight through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, FissuresError};
use crate::types::{
    Channel, ChannelId, InstrumentResponse, RequestFilter, SeismogramRecord, Station, StationId,
    TimeRange,
};

//==================================================================================
// I. The Collaborator Trait
//==================================================================================

/// The narrow query interface the core consumes.
///
/// Implementations may block (remote calls); the core calls them strictly
/// before any assembly work starts and never retries a failure.
pub trait DirectoryService: Send + Sync {
    /// Codes of all networks the service knows.
    fn network_codes(&self) -> Result<Vec<String>, DirectoryError>;

    /// All stations, or only those of one network.
    fn stations(&self, network: Option<&str>) -> Result<Vec<Station>, DirectoryError>;

    /// Channels matching the exact four codes. The site code is compared as given.
    fn channels_by_code(
        &self,
        network: &str,
        station: &str,
        site: &str,
        channel: &str,
    ) -> Result<Vec<Channel>, DirectoryError>;

    /// Channels of one station.
    fn channels_for_station(&self, station: &StationId) -> Result<Vec<Channel>, DirectoryError>;

    /// Seismogram records for the requested channel windows, in service order.
    fn seismograms(&self, requests: &[RequestFilter])
        -> Result<Vec<SeismogramRecord>, DirectoryError>;

    /// The instrument response of `channel` in effect at `at`.
    fn instrumentation(
        &self,
        channel: &ChannelId,
        at: DateTime<Utc>,
    ) -> Result<InstrumentResponse, DirectoryError>;
}

//==================================================================================
// II. In-Memory Directory
//==================================================================================

/// A response epoch for one channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseEpoch {
    pub channel: ChannelId,
    pub effective_time: TimeRange,
    pub response: InstrumentResponse,
}

/// A directory served from memory, e.g. a replayed JSON capture.
///
/// A seismogram record is returned for a request when its channel matches
/// and its begin time lies in `[start_time, end_time)`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StaticDirectory {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub seismograms: Vec<SeismogramRecord>,
    #[serde(default)]
    pub responses: Vec<ResponseEpoch>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a capture from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, FissuresError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_seismogram(mut self, record: SeismogramRecord) -> Self {
        self.seismograms.push(record);
        self
    }

    pub fn with_response(mut self, epoch: ResponseEpoch) -> Self {
        self.responses.push(epoch);
        self
    }
}

impl DirectoryService for StaticDirectory {
    fn network_codes(&self) -> Result<Vec<String>, DirectoryError> {
        let mut codes: Vec<String> = Vec::new();
        for station in &self.stations {
            if !codes.contains(&station.id.network_code) {
                codes.push(station.id.network_code.clone());
            }
        }
        Ok(codes)
    }

    fn stations(&self, network: Option<&str>) -> Result<Vec<Station>, DirectoryError> {
        Ok(self
            .stations
            .iter()
            .filter(|s| network.map_or(true, |net| s.id.network_code == net))
            .cloned()
            .collect())
    }

    fn channels_by_code(
        &self,
        network: &str,
        station: &str,
        site: &str,
        channel: &str,
    ) -> Result<Vec<Channel>, DirectoryError> {
        Ok(self
            .channels
            .iter()
            .filter(|c| {
                c.id.network_code == network
                    && c.id.station_code == station
                    && c.id.site_code == site
                    && c.id.channel_code == channel
            })
            .cloned()
            .collect())
    }

    fn channels_for_station(&self, station: &StationId) -> Result<Vec<Channel>, DirectoryError> {
        Ok(self
            .channels
            .iter()
            .filter(|c| {
                c.id.network_code == station.network_code && c.id.station_code == station.station_code
            })
            .cloned()
            .collect())
    }

    fn seismograms(
        &self,
        requests: &[RequestFilter],
    ) -> Result<Vec<SeismogramRecord>, DirectoryError> {
        let mut records = Vec::new();
        for request in requests {
            records.extend(
                self.seismograms
                    .iter()
                    .filter(|r| {
                        r.channel_id == request.channel_id
                            && r.begin_time >= request.start_time
                            && r.begin_time < request.end_time
                    })
                    .cloned(),
            );
        }
        Ok(records)
    }

    fn instrumentation(
        &self,
        channel: &ChannelId,
        at: DateTime<Utc>,
    ) -> Result<InstrumentResponse, DirectoryError> {
        // The epoch start itself is a valid lookup time.
        self.responses
            .iter()
            .find(|epoch| {
                epoch.channel == *channel
                    && (epoch.effective_time.start_time == at || epoch.effective_time.contains(at))
            })
            .map(|epoch| epoch.response.clone())
            .ok_or(DirectoryError::NoData)
    }
}
