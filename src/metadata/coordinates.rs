//! Station coordinates extraction.

use crate::error::FissuresError;
use crate::metadata::{Extraction, MetadataWarning};
use crate::types::{CoordinateRecord, LocationType, StationLocation};

/// The only elevation unit reported without a warning.
pub const METER_UNIT: &str = "METER";

/// Pulls latitude, longitude and elevation out of a station location.
///
/// Only geographic locations are supported. An elevation in any unit other
/// than meters yields exactly one `NonMeterElevation` warning; the value is
/// returned as reported, never converted.
pub fn extract_coordinates(
    location: &StationLocation,
) -> Result<Extraction<CoordinateRecord>, FissuresError> {
    if location.location_type != LocationType::Geographic {
        return Err(FissuresError::UnsupportedLocationType(location.location_type));
    }

    let mut extraction = Extraction::clean(CoordinateRecord {
        latitude: location.latitude,
        longitude: location.longitude,
        elevation: location.elevation,
        elevation_unit: location.elevation_unit.clone(),
        location_type: location.location_type,
    });

    if location.elevation_unit != METER_UNIT {
        let warning = MetadataWarning::NonMeterElevation {
            unit: location.elevation_unit.clone(),
        };
        log::warn!("{}", warning);
        extraction.warnings.push(warning);
    }
    Ok(extraction)
}
