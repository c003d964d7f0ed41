//! Unit/rate resolver: sampling interval descriptor -> samples per second.

use crate::error::FissuresError;
use crate::types::{SamplingInterval, UnitBase};

/// The physical interval in seconds: `(value * 10^power * multiplier)^exponent`.
pub fn interval_seconds(descriptor: &SamplingInterval) -> Result<f64, FissuresError> {
    if descriptor.unit_base != UnitBase::Second {
        return Err(FissuresError::UnsupportedUnit(descriptor.unit_base));
    }
    let base = descriptor.value * 10f64.powi(descriptor.power) * descriptor.multiplier;
    Ok(base.powi(descriptor.exponent))
}

/// Resolves the sampling rate in Hz as `sample_count / interval`.
///
/// `sample_count` must be nonzero; keep-alive records are filtered out before
/// this is called, so a zero here is an upstream invariant violation.
pub fn resolve_rate(descriptor: &SamplingInterval, sample_count: u64) -> Result<f64, FissuresError> {
    let interval = interval_seconds(descriptor)?;
    if sample_count == 0 {
        return Err(FissuresError::InvalidInterval(
            "zero sample count reached the rate resolver".to_string(),
        ));
    }
    if !interval.is_finite() || interval <= 0.0 {
        return Err(FissuresError::InvalidInterval(format!(
            "interval {} s is not a positive finite duration",
            interval
        )));
    }
    let rate = sample_count as f64 / interval;
    if !rate.is_finite() {
        return Err(FissuresError::InvalidInterval(format!(
            "rate {} / {} s is not finite",
            sample_count, interval
        )));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(value: f64, unit_base: UnitBase, power: i32, multiplier: f64, exponent: i32) -> SamplingInterval {
        SamplingInterval {
            value,
            unit_base,
            power,
            multiplier,
            exponent,
        }
    }

    #[test]
    fn test_single_point_at_twenty_milliseconds_is_fifty_hz() {
        let d = descriptor(0.02, UnitBase::Second, 0, 1.0, 1);
        assert_eq!(resolve_rate(&d, 1).unwrap(), 50.0);
    }

    #[test]
    fn test_record_span_interval() {
        // 33060 samples over a 661.2 s interval.
        let d = SamplingInterval::seconds(661.2);
        let rate = resolve_rate(&d, 33060).unwrap();
        assert!((rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_power_multiplier_and_exponent() {
        // 20 ms expressed as 20 * 10^-3 s.
        let d = descriptor(20.0, UnitBase::Second, -3, 1.0, 1);
        assert!((resolve_rate(&d, 1).unwrap() - 50.0).abs() < 1e-9);

        // 2 * 0.5 s = 1 s
        let d = descriptor(2.0, UnitBase::Second, 0, 0.5, 1);
        assert_eq!(resolve_rate(&d, 100).unwrap(), 100.0);

        // An interval given as frequency: 40 s^-1 -> 0.025 s per sample.
        let d = descriptor(40.0, UnitBase::Second, 0, 1.0, -1);
        assert!((resolve_rate(&d, 1).unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_only_seconds_accepted() {
        let others = [
            UnitBase::Meter,
            UnitBase::Gram,
            UnitBase::Ampere,
            UnitBase::Kelvin,
            UnitBase::Mole,
            UnitBase::Candela,
            UnitBase::Count,
            UnitBase::Composite,
        ];
        for base in others {
            let d = descriptor(0.02, base, 0, 1.0, 1);
            assert!(matches!(
                resolve_rate(&d, 1),
                Err(FissuresError::UnsupportedUnit(b)) if b == base
            ));
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let d = SamplingInterval::seconds(0.02);
        assert!(matches!(resolve_rate(&d, 0), Err(FissuresError::InvalidInterval(_))));

        let zero = SamplingInterval::seconds(0.0);
        assert!(matches!(resolve_rate(&zero, 10), Err(FissuresError::InvalidInterval(_))));

        let negative = SamplingInterval::seconds(-1.0);
        assert!(matches!(resolve_rate(&negative, 10), Err(FissuresError::InvalidInterval(_))));

        let nan = SamplingInterval::seconds(f64::NAN);
        assert!(matches!(resolve_rate(&nan, 10), Err(FissuresError::InvalidInterval(_))));
    }
}
