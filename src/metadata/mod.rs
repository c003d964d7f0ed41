//! Stateless extractors over station and instrument-response metadata.
//!
//! Both extractors assume the directory collaborator has already resolved a
//! single, unambiguous metadata entry. Non-fatal findings travel next to the
//! extracted value in an `Extraction`, and are also logged.

pub mod coordinates;
pub mod response;

use serde::Serialize;
use std::fmt;

pub use coordinates::extract_coordinates;
pub use response::{extract_pole_zero, PoleZeroConverter, StandardPoleZeroConverter};

/// A non-fatal finding raised while extracting metadata.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum MetadataWarning {
    /// The elevation is reported in a unit other than meters and was left unconverted.
    NonMeterElevation { unit: String },
}

impl fmt::Display for MetadataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataWarning::NonMeterElevation { unit } => {
                write!(f, "Elevation unit != \"METER\" (unit: \"{}\"); value not converted", unit)
            }
        }
    }
}

/// An extracted value plus the warnings raised while producing it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub value: T,
    pub warnings: Vec<MetadataWarning>,
}

impl<T> Extraction<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
