// In: src/client.rs

//! The client facade: directory lookups in, traces and metadata out.
//!
//! `Client` owns a `DirectoryService`, an `Assembler` and a pole/zero
//! converter. Each public method performs its directory calls first, then
//! hands the fetched records to the pure assembly or extraction code.
//! Directory failures are tagged with the request and returned unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::FissuresConfig;
use crate::directory::DirectoryService;
use crate::error::{DirectoryError, FissuresError};
use crate::kernels::{NativeSteimCodec, SteimCodec};
use crate::metadata::{
    extract_coordinates, extract_pole_zero, Extraction, PoleZeroConverter,
    StandardPoleZeroConverter,
};
use crate::pipeline::{Assembler, AssemblyReport};
use crate::time::to_fissures_time;
use crate::types::{CoordinateRecord, PoleZeroFilter, RequestFilter};

/// Site code the directory expects for a blank location.
pub const BLANK_SITE_CODE: &str = "  ";

pub struct Client<D> {
    directory: D,
    assembler: Assembler,
    converter: Arc<dyn PoleZeroConverter>,
}

impl<D: DirectoryService> Client<D> {
    /// A client with the default configuration and the built-in codec.
    pub fn new(directory: D) -> Self {
        Self::with_config(directory, &FissuresConfig::default())
    }

    pub fn with_config(directory: D, config: &FissuresConfig) -> Self {
        Self {
            directory,
            assembler: Assembler::new(Arc::new(NativeSteimCodec), config.assembly),
            converter: Arc::new(StandardPoleZeroConverter),
        }
    }

    /// Replaces the STEIM codec, keeping the assembly configuration.
    pub fn with_codec(mut self, codec: Arc<dyn SteimCodec>) -> Self {
        self.assembler = Assembler::new(codec, *self.assembler.config());
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn PoleZeroConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Fetches and assembles every record of one channel in `[start, end)`.
    ///
    /// A blank `location` is sent as two spaces. The result holds one trace
    /// per non-keep-alive record, in the order the service returned them.
    pub fn get_waveform(
        &self,
        network: &str,
        station: &str,
        location: &str,
        channel: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AssemblyReport, FissuresError> {
        let site = if location.trim().is_empty() {
            BLANK_SITE_CODE
        } else {
            location
        };
        let request = format!(
            "waveform {}.{}.{}.{} {} - {}",
            network,
            station,
            site.trim_end(),
            channel,
            to_fissures_time(start),
            to_fissures_time(end)
        );

        let channels = self
            .directory
            .channels_by_code(network, station, site, channel)
            .map_err(directory_failure(&request))?;
        if channels.is_empty() {
            return Err(directory_failure(&request)(DirectoryError::NoData));
        }

        let requests: Vec<RequestFilter> = channels
            .into_iter()
            .map(|c| RequestFilter {
                channel_id: c.id,
                start_time: start,
                end_time: end,
            })
            .collect();
        let records = self
            .directory
            .seismograms(&requests)
            .map_err(directory_failure(&request))?;
        log::debug!("{}: {} record(s) fetched", request, records.len());

        self.assembler.assemble(&records)
    }

    pub fn get_network_ids(&self) -> Result<Vec<String>, FissuresError> {
        self.directory
            .network_codes()
            .map_err(directory_failure("network ids"))
    }

    /// Station codes of one network, or of all networks.
    pub fn get_station_ids(&self, network: Option<&str>) -> Result<Vec<String>, FissuresError> {
        let request = format!("station ids {}", network.unwrap_or("*"));
        let stations = self
            .directory
            .stations(network)
            .map_err(directory_failure(&request))?;
        Ok(stations.into_iter().map(|s| s.id.station_code).collect())
    }

    /// Coordinates of the station epoch that strictly contains `at`.
    pub fn get_coordinates(
        &self,
        network: &str,
        station: &str,
        at: DateTime<Utc>,
    ) -> Result<Extraction<CoordinateRecord>, FissuresError> {
        let request = format!("coordinates {}.{} at {}", network, station, to_fissures_time(at));
        let stations = self
            .directory
            .stations(Some(network))
            .map_err(directory_failure(&request))?;

        let mut matching: Vec<_> = stations
            .into_iter()
            .filter(|s| s.id.station_code == station && s.effective_time.contains(at))
            .collect();
        let selected = match matching.len() {
            0 => return Err(directory_failure(&request)(DirectoryError::NoData)),
            1 => matching.remove(0),
            n => return Err(directory_failure(&request)(DirectoryError::Ambiguous(n))),
        };

        extract_coordinates(&selected.location)
    }

    /// Pole/zero response of the first channel of a station, at that
    /// channel's effective start. Units and scalings are not verified.
    pub fn get_paz(&self, network: &str, station: &str) -> Result<PoleZeroFilter, FissuresError> {
        let request = format!("paz {}.{}", network, station);
        let fail = directory_failure(&request);

        let stations = self.directory.stations(Some(network)).map_err(&fail)?;
        let selected = stations
            .into_iter()
            .find(|s| s.id.station_code == station)
            .ok_or_else(|| fail(DirectoryError::NoData))?;

        let channels = self
            .directory
            .channels_for_station(&selected.id)
            .map_err(&fail)?;
        let first = channels
            .into_iter()
            .next()
            .ok_or_else(|| fail(DirectoryError::NoData))?;

        let response = self
            .directory
            .instrumentation(&first.id, first.effective_time.start_time)
            .map_err(&fail)?;

        log::warn!("{}: pole/zero extraction is experimental", request);
        extract_pole_zero(&response, self.converter.as_ref())
    }
}

fn directory_failure(request: &str) -> impl Fn(DirectoryError) -> FissuresError + '_ {
    move |source| FissuresError::Directory {
        request: request.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{ResponseEpoch, StaticDirectory};
    use crate::kernels::test_support::steim1_wide;
    use crate::types::{
        ByteOrder, Channel, ChannelId, ComplexNumberErrored, EncodedChunk, Encoding, Filter,
        InstrumentResponse, LocationType, Normalization, PoleZeroFilterData, ResponseStage,
        SamplingInterval, SeismogramRecord, Station, StationId, StationLocation, TimeRange,
    };
    use chrono::{Duration, TimeZone};

    struct DownDirectory;

    impl DirectoryService for DownDirectory {
        fn network_codes(&self) -> Result<Vec<String>, DirectoryError> {
            Err(DirectoryError::Unreachable("NetworkDC".to_string()))
        }
        fn stations(&self, _: Option<&str>) -> Result<Vec<Station>, DirectoryError> {
            Err(DirectoryError::Unreachable("NetworkDC".to_string()))
        }
        fn channels_by_code(&self, _: &str, _: &str, _: &str, _: &str) -> Result<Vec<Channel>, DirectoryError> {
            Err(DirectoryError::Unreachable("NetworkDC".to_string()))
        }
        fn channels_for_station(&self, _: &StationId) -> Result<Vec<Channel>, DirectoryError> {
            Err(DirectoryError::Unreachable("NetworkDC".to_string()))
        }
        fn seismograms(&self, _: &[RequestFilter]) -> Result<Vec<SeismogramRecord>, DirectoryError> {
            Err(DirectoryError::Unreachable("DataCenter".to_string()))
        }
        fn instrumentation(&self, _: &ChannelId, _: DateTime<Utc>) -> Result<InstrumentResponse, DirectoryError> {
            Err(DirectoryError::Unreachable("NetworkDC".to_string()))
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2003, 6, 20, 5, 59, 9).unwrap() + Duration::milliseconds(401)
    }

    fn open_since(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> TimeRange {
        TimeRange {
            start_time: start,
            end_time: end,
        }
    }

    fn station(sta: &str, unit: &str, effective_time: TimeRange) -> Station {
        Station {
            id: StationId {
                network_code: "GE".to_string(),
                station_code: sta.to_string(),
            },
            location: StationLocation {
                latitude: 37.07,
                longitude: 25.53,
                elevation: 620.0,
                elevation_unit: unit.to_string(),
                location_type: LocationType::Geographic,
            },
            effective_time,
        }
    }

    fn ape_record(samples: &[i32], begin: DateTime<Utc>) -> SeismogramRecord {
        SeismogramRecord {
            channel_id: ChannelId::new("GE", "APE", "  ", "SHZ"),
            begin_time: begin,
            sample_count: samples.len() as u64,
            sampling_interval: SamplingInterval::seconds(samples.len() as f64 * 0.02),
            chunks: vec![EncodedChunk {
                compression_code: Encoding::STEIM1_CODE,
                byte_order: ByteOrder::Big,
                sample_count: samples.len(),
                values: steim1_wide(samples, ByteOrder::Big),
            }],
        }
    }

    fn ape_directory() -> StaticDirectory {
        let epoch = open_since(Utc.with_ymd_and_hms(1998, 1, 1, 0, 0, 0).unwrap(), None);
        let shz = ChannelId::new("GE", "APE", "  ", "SHZ");
        let mut keep_alive = ape_record(&[], t0() + Duration::seconds(2));
        keep_alive.chunks.clear();

        StaticDirectory::new()
            .with_station(station("APE", "METER", epoch))
            .with_channel(Channel {
                id: shz.clone(),
                effective_time: epoch,
            })
            .with_seismogram(ape_record(&[1, 2, 3, 4], t0()))
            .with_seismogram(keep_alive)
            .with_seismogram(ape_record(&[9, 8], t0() + Duration::seconds(5)))
            .with_response(ResponseEpoch {
                channel: shz,
                effective_time: epoch,
                response: InstrumentResponse {
                    stages: vec![ResponseStage {
                        normalization: Some(Normalization {
                            ao_normalization_factor: 2.0,
                            normalization_freq: 1.0,
                        }),
                        filters: vec![Filter::PoleZero(PoleZeroFilterData {
                            poles: vec![ComplexNumberErrored::new(-4.44, 4.44)],
                            zeros: vec![ComplexNumberErrored::new(0.0, 0.0)],
                        })],
                    }],
                },
            })
    }

    #[test]
    fn test_get_waveform_with_blank_location() {
        let client = Client::new(ape_directory());
        let report = client
            .get_waveform("GE", "APE", "", "SHZ", t0() - Duration::seconds(1), t0() + Duration::seconds(600))
            .unwrap();

        assert_eq!(report.traces.len(), 2);
        assert_eq!(report.keep_alive_skipped, 1);
        assert_eq!(report.traces[0].id(), "GE.APE..SHZ");
        assert_eq!(report.traces[0].data, vec![1, 2, 3, 4]);
        assert_eq!(report.traces[1].data, vec![9, 8]);
        assert!((report.traces[0].sampling_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_get_waveform_unknown_channel_is_no_data() {
        let client = Client::new(ape_directory());
        let err = client
            .get_waveform("GE", "APE", "  ", "BHZ", t0(), t0() + Duration::seconds(60))
            .unwrap_err();
        match err {
            FissuresError::Directory { request, source } => {
                assert!(request.contains("GE.APE..BHZ"));
                assert!(request.contains("2003-06-20T05:59:09.4010Z"));
                assert_eq!(source, DirectoryError::NoData);
            }
            other => panic!("Expected Directory error, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_failures_pass_through() {
        let client = Client::new(DownDirectory);
        let err = client.get_network_ids().unwrap_err();
        assert!(matches!(
            err,
            FissuresError::Directory { source: DirectoryError::Unreachable(_), .. }
        ));
        let err = client
            .get_waveform("GE", "APE", "", "SHZ", t0(), t0() + Duration::seconds(1))
            .unwrap_err();
        assert!(matches!(err, FissuresError::Directory { .. }));
        assert!(client.get_paz("GE", "APE").is_err());
    }

    #[test]
    fn test_network_and_station_ids() {
        let client = Client::new(ape_directory());
        assert_eq!(client.get_network_ids().unwrap(), vec!["GE"]);
        assert_eq!(client.get_station_ids(Some("GE")).unwrap(), vec!["APE"]);
        assert_eq!(client.get_station_ids(None).unwrap(), vec!["APE"]);
        assert!(client.get_station_ids(Some("IU")).unwrap().is_empty());
    }

    #[test]
    fn test_get_coordinates_selects_by_time() {
        let first = open_since(
            Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap(),
            Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()),
        );
        let second = open_since(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(), None);
        let dir = StaticDirectory::new()
            .with_station(station("GRA1", "METER", first))
            .with_station(station("GRA1", "FOOT", second));
        let client = Client::new(dir);

        let old = client
            .get_coordinates("GE", "GRA1", Utc.with_ymd_and_hms(1995, 1, 1, 0, 0, 0).unwrap())
            .unwrap();
        assert!(!old.has_warnings());

        let new = client
            .get_coordinates("GE", "GRA1", Utc.with_ymd_and_hms(2010, 8, 1, 0, 0, 0).unwrap())
            .unwrap();
        assert_eq!(new.warnings.len(), 1);
        assert_eq!(new.value.elevation, 620.0);

        // Epoch boundaries are excluded.
        let boundary = client.get_coordinates("GE", "GRA1", Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(
            boundary,
            Err(FissuresError::Directory { source: DirectoryError::NoData, .. })
        ));
    }

    #[test]
    fn test_get_coordinates_ambiguous() {
        let epoch = open_since(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap(), None);
        let dir = StaticDirectory::new()
            .with_station(station("APE", "METER", epoch))
            .with_station(station("APE", "METER", epoch));
        let result = Client::new(dir).get_coordinates("GE", "APE", t0());
        assert!(matches!(
            result,
            Err(FissuresError::Directory { source: DirectoryError::Ambiguous(2), .. })
        ));
    }

    #[test]
    fn test_get_paz() {
        let paz = Client::new(ape_directory()).get_paz("GE", "APE").unwrap();
        assert_eq!(paz.gain, 2.0);
        assert_eq!(paz.poles.len(), 1);
        assert_eq!(paz.poles[0].re, -4.44);
        assert_eq!(paz.zeros.len(), 1);

        let missing = Client::new(ape_directory()).get_paz("GE", "WLF");
        assert!(matches!(
            missing,
            Err(FissuresError::Directory { source: DirectoryError::NoData, .. })
        ));
    }
}
