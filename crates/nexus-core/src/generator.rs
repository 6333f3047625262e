//! Synthetic sensor data for the digital twin
//!
//! When no export is supplied, each domain is simulated as a base level plus
//! one full sinusoidal cycle across the 24 hourly samples, with independent
//! Gaussian noise per sample. The secondary column is an affine transform of
//! the primary signal plus its own noise.
//!
//! Output is intentionally unseeded: two calls return the same shape but
//! different values.

use std::f64::consts::PI;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::models::{SensorDomain, SensorReading, SensorSeries};

/// Samples per generated series
pub const SAMPLE_COUNT: usize = 24;

/// Shape of one simulated domain
#[derive(Debug, Clone, Copy)]
struct DomainProfile {
    base: f64,
    amplitude: f64,
    primary_sd: f64,
    /// Lower bound applied to the primary value (irradiance can't go negative)
    floor: Option<f64>,
    secondary_offset: f64,
    /// Multiplier on the sinusoidal variation
    phase_gain: f64,
    /// Multiplier on the (noisy, clamped) primary value
    primary_gain: f64,
    secondary_sd: f64,
}

impl DomainProfile {
    fn for_domain(domain: SensorDomain) -> Self {
        match domain {
            SensorDomain::Temperature => Self {
                base: 25.0,
                amplitude: 3.0,
                primary_sd: 0.5,
                floor: None,
                secondary_offset: 65.0,
                phase_gain: 2.0,
                primary_gain: 0.0,
                secondary_sd: 1.0,
            },
            SensorDomain::Co2 => Self {
                base: 400.0,
                amplitude: 0.0,
                primary_sd: 10.0,
                floor: None,
                secondary_offset: 1013.0,
                phase_gain: 0.0,
                primary_gain: 0.0,
                secondary_sd: 2.0,
            },
            SensorDomain::Radiation => Self {
                base: 1000.0,
                amplitude: 500.0,
                primary_sd: 50.0,
                floor: Some(0.0),
                secondary_offset: 0.0,
                phase_gain: 0.0,
                primary_gain: 0.45,
                secondary_sd: 20.0,
            },
        }
    }
}

/// Generate 24 hourly readings ending one hour before `now`
pub fn generate(domain: SensorDomain, now: NaiveDateTime) -> SensorSeries {
    generate_with_rng(domain, now, &mut rand::thread_rng())
}

/// Generate a series relative to the local wall clock
pub fn generate_now(domain: SensorDomain) -> SensorSeries {
    generate(domain, Local::now().naive_local())
}

/// Generate with a caller-supplied RNG (seeded in tests)
pub fn generate_with_rng<R: Rng>(
    domain: SensorDomain,
    now: NaiveDateTime,
    rng: &mut R,
) -> SensorSeries {
    let profile = DomainProfile::for_domain(domain);
    let now = now.with_nanosecond(0).unwrap_or(now);
    let start = now - Duration::hours(SAMPLE_COUNT as i64);

    let readings = (0..SAMPLE_COUNT)
        .map(|i| {
            let variation = profile.amplitude * phase(i);

            let mut primary = profile.base + variation + noise(rng, profile.primary_sd);
            if let Some(floor) = profile.floor {
                primary = primary.max(floor);
            }

            let secondary = profile.secondary_offset
                + profile.phase_gain * variation
                + profile.primary_gain * primary
                + noise(rng, profile.secondary_sd);

            SensorReading {
                timestamp: start + Duration::hours(i as i64),
                primary,
                secondary,
            }
        })
        .collect();

    debug!(domain = %domain, samples = SAMPLE_COUNT, "Generated synthetic series");

    SensorSeries { domain, readings }
}

/// sin over `SAMPLE_COUNT` points evenly spanning [0, 2π], endpoints included
fn phase(i: usize) -> f64 {
    let step = 2.0 * PI / (SAMPLE_COUNT - 1) as f64;
    (i as f64 * step).sin()
}

fn noise<R: Rng>(rng: &mut R, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * sd
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_milli_opt(15, 30, 12, 345)
            .unwrap()
    }

    #[test]
    fn test_generates_24_hourly_rows_for_every_domain() {
        for domain in SensorDomain::all() {
            let series = generate(*domain, fixed_now());
            assert_eq!(series.domain, *domain);
            assert_eq!(series.readings.len(), SAMPLE_COUNT);

            for pair in series.readings.windows(2) {
                assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
            }
        }
    }

    #[test]
    fn test_covers_preceding_24_hours() {
        let now = fixed_now();
        let series = generate(SensorDomain::Temperature, now);
        let first = series.readings.first().unwrap().timestamp;
        let last = series.readings.last().unwrap().timestamp;

        let whole_second = now.with_nanosecond(0).unwrap();
        assert_eq!(first, whole_second - Duration::hours(24));
        assert_eq!(last, whole_second - Duration::hours(1));
    }

    #[test]
    fn test_table_has_expected_columns() {
        for domain in SensorDomain::all() {
            let table = generate(*domain, fixed_now()).into_table();
            let (primary, secondary) = domain.columns();
            assert_eq!(
                table.column_names(),
                &["timestamp".to_string(), primary.to_string(), secondary.to_string()]
            );
            assert_eq!(table.numeric_columns().len(), 2);
            assert_eq!(table.row_count(), SAMPLE_COUNT);
        }
    }

    #[test]
    fn test_radiation_never_negative() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = generate_with_rng(SensorDomain::Radiation, fixed_now(), &mut rng);
            assert!(
                series.readings.iter().all(|r| r.primary >= 0.0),
                "negative irradiance with seed {}",
                seed
            );
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = generate_with_rng(SensorDomain::Co2, fixed_now(), &mut a);
        let second = generate_with_rng(SensorDomain::Co2, fixed_now(), &mut b);
        assert_eq!(first.readings, second.readings);
    }

    #[test]
    fn test_repeated_calls_share_shape() {
        let first = generate(SensorDomain::Co2, fixed_now()).into_table();
        let second = generate(SensorDomain::Co2, fixed_now()).into_table();
        assert_eq!(first.column_names(), second.column_names());
        assert_eq!(first.timestamps(), second.timestamps());
        assert_eq!(first.row_count(), second.row_count());
    }

    #[test]
    fn test_values_stay_near_domain_base() {
        let mut rng = StdRng::seed_from_u64(42);
        let temps = generate_with_rng(SensorDomain::Temperature, fixed_now(), &mut rng);
        // base 25, amplitude 3, sd 0.5: anything outside 15..35 means a broken profile
        assert!(temps
            .readings
            .iter()
            .all(|r| r.primary > 15.0 && r.primary < 35.0));
        assert!(temps
            .readings
            .iter()
            .all(|r| r.secondary > 45.0 && r.secondary < 85.0));
    }

    #[test]
    fn test_phase_spans_one_full_cycle() {
        assert!(phase(0).abs() < 1e-12);
        assert!(phase(SAMPLE_COUNT - 1).abs() < 1e-9);
        assert!(phase(6) > 0.9);
        assert!(phase(17) < -0.9);
    }
}
