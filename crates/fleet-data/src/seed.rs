//! Deterministic mock fleet.
//!
//! Stands in for a remote data source: one user, four vehicles and a
//! trailing window of daily logs per vehicle. The same `seed` and `today`
//! always produce the same data.

use std::ops::Range;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fleet_core::error::Result;
use fleet_core::models::{AlertSeverity, DailyLog, FuelType, User, Vehicle};
use fleet_core::time_utils::trailing_window;

use crate::store::FleetStore;

/// Days of telemetry generated per vehicle, ending today.
pub const WINDOW_DAYS: u32 = 7;

/// Probability that a generated log carries an alert.
const ALERT_PROBABILITY: f64 = 0.2;

// ── Value ranges ──────────────────────────────────────────────────────────────

/// Uniform sampling ranges for one fuel type.
#[derive(Debug, Clone)]
pub struct TelemetryProfile {
    /// Liters.
    pub fuel: Range<f64>,
    /// Grams per kilometre.
    pub co2: Range<f64>,
    /// Kilometres per liter (per kWh for electric).
    pub mileage: Range<f64>,
}

impl TelemetryProfile {
    pub fn for_fuel(fuel_type: FuelType) -> Self {
        match fuel_type {
            FuelType::Gasoline => Self {
                fuel: 7.0..10.0,
                co2: 130.0..170.0,
                mileage: 10.0..14.0,
            },
            FuelType::Diesel => Self {
                fuel: 5.0..8.0,
                co2: 120.0..150.0,
                mileage: 14.0..20.0,
            },
            FuelType::Hybrid => Self {
                fuel: 3.0..5.0,
                co2: 80.0..100.0,
                mileage: 18.0..24.0,
            },
            // No direct fuel burn or tailpipe emissions.
            FuelType::Electric => Self {
                fuel: 0.0..0.0,
                co2: 0.0..0.0,
                mileage: 5.0..6.0,
            },
        }
    }
}

const DISTANCE_KM: Range<f64> = 20.0..60.0;
const ENGINE_TEMP_C: Range<f64> = 85.0..100.0;
const ENGINE_RPM: Range<f64> = 800.0..2000.0;

// ── MockFleet ─────────────────────────────────────────────────────────────────

/// Builder for the seeded demo fleet.
pub struct MockFleet;

impl MockFleet {
    /// The demo account every mock vehicle belongs to.
    pub fn user() -> User {
        User {
            id: "user1".to_string(),
            name: "John Anderson".to_string(),
            email: "john.anderson@example.com".to_string(),
            avatar_url: Some("/placeholder.svg".to_string()),
        }
    }

    /// The four demo vehicles.
    pub fn vehicles() -> Vec<Vehicle> {
        [
            ("v1", "Toyota", "Prius", 2019, "ECO-2019", FuelType::Hybrid, 14),
            ("v2", "Tesla", "Model 3", 2021, "ELEC-21", FuelType::Electric, 15),
            ("v3", "Ford", "F-150", 2020, "FORD-20", FuelType::Gasoline, 13),
            ("v4", "BMW", "X5", 2022, "BMW-22", FuelType::Diesel, 12),
        ]
        .into_iter()
        .filter_map(|(id, make, model, year, plate, fuel_type, day)| {
            Some(Vehicle {
                id: id.to_string(),
                user_id: "user1".to_string(),
                make: make.to_string(),
                model: model.to_string(),
                year,
                license_plate: plate.to_string(),
                fuel_type,
                image_url: Some("/placeholder.svg".to_string()),
                last_updated: NaiveDate::from_ymd_opt(2023, 5, day)?,
            })
        })
        .collect()
    }

    /// Generate the full demo store.
    pub fn generate(seed: u64, today: NaiveDate) -> Result<FleetStore> {
        let mut rng = StdRng::seed_from_u64(seed);
        let vehicles = Self::vehicles();

        let logs: Vec<DailyLog> = vehicles
            .iter()
            .flat_map(|v| generate_daily_logs(&mut rng, &v.id, v.fuel_type, today))
            .collect();

        tracing::debug!(
            seed,
            vehicles = vehicles.len(),
            logs = logs.len(),
            "mock fleet generated"
        );

        FleetStore::with_data(Self::user(), vehicles, logs)
    }
}

/// One log per day for the [`WINDOW_DAYS`] days ending at `today`, newest
/// first. Log ids are `log-{vehicle_id}-{days_ago}`.
pub fn generate_daily_logs<R: Rng>(
    rng: &mut R,
    vehicle_id: &str,
    fuel_type: FuelType,
    today: NaiveDate,
) -> Vec<DailyLog> {
    let profile = TelemetryProfile::for_fuel(fuel_type);

    trailing_window(today, WINDOW_DAYS)
        .into_iter()
        .enumerate()
        .map(|(days_ago, date)| DailyLog {
            id: format!("log-{vehicle_id}-{days_ago}"),
            vehicle_id: vehicle_id.to_string(),
            date,
            fuel_consumption: sample(rng, &profile.fuel),
            co2_emissions: sample(rng, &profile.co2),
            mileage: sample(rng, &profile.mileage),
            distance_covered: sample(rng, &DISTANCE_KM),
            engine_temp: Some(sample(rng, &ENGINE_TEMP_C)),
            engine_rpm: Some(sample(rng, &ENGINE_RPM)),
            alert_type: sample_alert(rng),
            notes: None,
        })
        .collect()
}

/// Uniform sample from `range`; an empty range yields its start.
fn sample<R: Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

/// An alert fires with [`ALERT_PROBABILITY`], split evenly between medium
/// and low.
fn sample_alert<R: Rng>(rng: &mut R) -> AlertSeverity {
    if rng.gen_bool(ALERT_PROBABILITY) {
        if rng.gen_bool(0.5) {
            AlertSeverity::Medium
        } else {
            AlertSeverity::Low
        }
    } else {
        AlertSeverity::None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FleetSource;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_same_seed_same_fleet() {
        let a = MockFleet::generate(42, today()).unwrap();
        let b = MockFleet::generate(42, today()).unwrap();
        assert_eq!(a.logs(), b.logs());
        assert_eq!(a.vehicles(), b.vehicles());
    }

    #[test]
    fn test_different_seed_different_readings() {
        let a = MockFleet::generate(1, today()).unwrap();
        let b = MockFleet::generate(2, today()).unwrap();
        assert_ne!(a.logs(), b.logs());
    }

    #[test]
    fn test_shape() {
        let store = MockFleet::generate(7, today()).unwrap();
        assert_eq!(store.vehicles().len(), 4);
        assert_eq!(store.logs().len(), 4 * WINDOW_DAYS as usize);
        for v in store.vehicles() {
            assert_eq!(store.logs_for_vehicle(&v.id).len(), WINDOW_DAYS as usize);
        }
    }

    #[test]
    fn test_window_ends_today() {
        let store = MockFleet::generate(7, today()).unwrap();
        let logs = store.logs_for_vehicle("v1");
        assert_eq!(logs[0].id, "log-v1-0");
        assert_eq!(logs[0].date, today());
        assert_eq!(logs[6].id, "log-v1-6");
        assert_eq!(logs[6].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_values_within_profile() {
        let store = MockFleet::generate(1234, today()).unwrap();
        for v in store.vehicles() {
            let profile = TelemetryProfile::for_fuel(v.fuel_type);
            for log in store.logs_for_vehicle(&v.id) {
                if v.fuel_type == FuelType::Electric {
                    assert_eq!(log.fuel_consumption, 0.0);
                    assert_eq!(log.co2_emissions, 0.0);
                } else {
                    assert!(profile.fuel.contains(&log.fuel_consumption));
                    assert!(profile.co2.contains(&log.co2_emissions));
                }
                assert!(profile.mileage.contains(&log.mileage));
                assert!(DISTANCE_KM.contains(&log.distance_covered));
                assert!(ENGINE_TEMP_C.contains(&log.engine_temp.unwrap()));
                assert!(ENGINE_RPM.contains(&log.engine_rpm.unwrap()));
                assert_ne!(log.alert_type, AlertSeverity::High);
            }
        }
    }

    #[test]
    fn test_alert_rate_is_roughly_one_in_five() {
        let mut rng = StdRng::seed_from_u64(99);
        let n = 10_000;
        let alerts = (0..n).filter(|_| sample_alert(&mut rng).is_alert()).count();
        let rate = alerts as f64 / n as f64;
        assert!((0.17..0.23).contains(&rate), "alert rate = {rate}");
    }

    #[test]
    fn test_demo_vehicles() {
        let vehicles = MockFleet::vehicles();
        let titles: Vec<String> = vehicles.iter().map(Vehicle::title).collect();
        assert_eq!(
            titles,
            vec![
                "2019 Toyota Prius",
                "2021 Tesla Model 3",
                "2020 Ford F-150",
                "2022 BMW X5"
            ]
        );
        assert!(vehicles.iter().all(|v| v.user_id == MockFleet::user().id));
    }
}
