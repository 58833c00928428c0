//! Telemetry aggregation over in-memory daily logs.
//!
//! Every function is a pure reduction over a slice of [`DailyLog`]s and is
//! total: empty input yields zeroed (or empty) output, never an error.
//! Rounding to two decimals happens once, on the final value.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use fleet_core::formatting::round_to;
use fleet_core::models::{
    DailyLog, EngineSummary, FleetStats, SeriesPoint, Vehicle, VehicleSeriesPoint, VehicleStats,
};

/// Decimal places kept in every derived figure.
pub const PRECISION: u32 = 2;

// ── Running sums ──────────────────────────────────────────────────────────────

/// Unrounded totals accumulated across logs.
#[derive(Debug, Clone, Default)]
struct Totals {
    fuel: f64,
    co2: f64,
    mileage: f64,
    distance: f64,
    alerts: u32,
    count: u32,
}

impl Totals {
    fn add_log(&mut self, log: &DailyLog) {
        self.fuel += log.fuel_consumption;
        self.co2 += log.co2_emissions;
        self.mileage += log.mileage;
        self.distance += log.distance_covered;
        if log.alert_type.is_alert() {
            self.alerts += 1;
        }
        self.count += 1;
    }

    fn from_logs<'a>(logs: impl IntoIterator<Item = &'a DailyLog>) -> Self {
        let mut totals = Self::default();
        for log in logs {
            totals.add_log(log);
        }
        totals
    }

    /// Rounded mean of `sum`, or 0 when nothing was accumulated.
    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round_to(sum / f64::from(self.count), PRECISION)
    }
}

// ── Per-vehicle ───────────────────────────────────────────────────────────────

/// Summary statistics for the logs of a single vehicle.
///
/// Means of fuel consumption, CO₂ emissions and mileage; total distance;
/// count of logs carrying an alert. Input order does not matter.
pub fn stats_for_vehicle(logs: &[DailyLog]) -> VehicleStats {
    let totals = Totals::from_logs(logs);
    VehicleStats {
        avg_fuel_consumption: totals.mean(totals.fuel),
        avg_co2_emissions: totals.mean(totals.co2),
        avg_mileage: totals.mean(totals.mileage),
        total_distance: round_to(totals.distance, PRECISION),
        alerts_count: totals.alerts,
    }
}

/// One chart point per log, ascending by date.
///
/// Logs sharing a date keep their input order. Missing engine readings stay
/// `None`.
pub fn vehicle_series(logs: &[DailyLog]) -> Vec<VehicleSeriesPoint> {
    let mut points: Vec<VehicleSeriesPoint> = logs
        .iter()
        .map(|log| VehicleSeriesPoint {
            date: log.date,
            fuel_consumption: log.fuel_consumption,
            co2_emissions: log.co2_emissions,
            mileage: log.mileage,
            distance_covered: log.distance_covered,
            engine_temp: log.engine_temp,
            engine_rpm: log.engine_rpm,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Means of the optional engine readings, skipping logs without them.
pub fn engine_summary(logs: &[DailyLog]) -> EngineSummary {
    let (temp_sum, temp_samples) = sum_present(logs.iter().map(|l| l.engine_temp));
    let (rpm_sum, rpm_samples) = sum_present(logs.iter().map(|l| l.engine_rpm));

    EngineSummary {
        avg_engine_temp: optional_mean(temp_sum, temp_samples),
        avg_engine_rpm: optional_mean(rpm_sum, rpm_samples),
        temp_samples,
        rpm_samples,
    }
}

/// Logs that carry an alert, newest first.
pub fn alerts(logs: &[DailyLog]) -> Vec<&DailyLog> {
    let mut out: Vec<&DailyLog> = logs.iter().filter(|l| l.alert_type.is_alert()).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

// ── Fleet-wide ────────────────────────────────────────────────────────────────

/// Group logs by calendar date, ascending.
///
/// Fuel consumption and CO₂ emissions are averaged per date; distance is
/// summed. A date with a single log passes through unchanged.
pub fn daily_series(logs: &[DailyLog]) -> Vec<SeriesPoint> {
    // BTreeMap keeps the dates sorted and unique.
    let mut by_date: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
    for log in logs {
        by_date.entry(log.date).or_default().add_log(log);
    }

    by_date
        .into_iter()
        .map(|(date, totals)| SeriesPoint {
            date,
            fuel_consumption: totals.mean(totals.fuel),
            co2_emissions: totals.mean(totals.co2),
            distance: round_to(totals.distance, PRECISION),
        })
        .collect()
}

/// Totals across the whole fleet.
///
/// `total_vehicles` counts `vehicles`; every other field is computed over
/// all of `logs`.
pub fn fleet_totals(vehicles: &[Vehicle], logs: &[DailyLog]) -> FleetStats {
    let totals = Totals::from_logs(logs);
    FleetStats {
        total_vehicles: vehicles.len(),
        total_distance: round_to(totals.distance, PRECISION),
        avg_fuel_consumption: totals.mean(totals.fuel),
        total_alerts: totals.alerts,
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

fn sum_present(values: impl Iterator<Item = Option<f64>>) -> (f64, u32) {
    values
        .flatten()
        .fold((0.0, 0), |(sum, n), v| (sum + v, n + 1))
}

fn optional_mean(sum: f64, samples: u32) -> Option<f64> {
    (samples > 0).then(|| round_to(sum / f64::from(samples), PRECISION))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
