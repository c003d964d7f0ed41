//! Pole/zero extraction from an instrument response.

use crate::error::FissuresError;
use crate::types::{
    Complex, ComplexNumberErrored, Filter, InstrumentResponse, Normalization, PoleZeroFilter,
    PoleZeroFilterData,
};

/// Converts raw pole/zero filter parameters into a `PoleZeroFilter`.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait PoleZeroConverter: Send + Sync {
    fn convert(
        &self,
        data: &PoleZeroFilterData,
        normalization: Option<&Normalization>,
    ) -> Result<PoleZeroFilter, FissuresError>;
}

/// Drops the error bars, takes the gain from the stage normalization factor
/// (1.0 when the stage has none) and carries the normalization frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPoleZeroConverter;

impl PoleZeroConverter for StandardPoleZeroConverter {
    fn convert(
        &self,
        data: &PoleZeroFilterData,
        normalization: Option<&Normalization>,
    ) -> Result<PoleZeroFilter, FissuresError> {
        let to_complex = |c: &ComplexNumberErrored| Complex {
            re: c.real,
            im: c.imaginary,
        };
        Ok(PoleZeroFilter {
            poles: data.poles.iter().map(to_complex).collect(),
            zeros: data.zeros.iter().map(to_complex).collect(),
            gain: normalization.map_or(1.0, |n| n.ao_normalization_factor),
            normalization_frequency: normalization.map(|n| n.normalization_freq),
        })
    }
}

/// Extracts the pole/zero set of the first filter of the first response stage.
///
/// Any other filter variant fails with `UnsupportedFilterVariant` before the
/// converter is consulted.
pub fn extract_pole_zero(
    response: &InstrumentResponse,
    converter: &dyn PoleZeroConverter,
) -> Result<PoleZeroFilter, FissuresError> {
    let stage = response
        .stages
        .first()
        .ok_or(FissuresError::IncompleteResponse("response stage"))?;
    let filter = stage
        .filters
        .first()
        .ok_or(FissuresError::IncompleteResponse("filter in the first stage"))?;

    match filter {
        Filter::PoleZero(data) => converter.convert(data, stage.normalization.as_ref()),
        other => Err(FissuresError::UnsupportedFilterVariant(other.kind())),
    }
}
