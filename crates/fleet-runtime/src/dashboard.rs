//! View models handed to the presentation layer.
//!
//! [`DashboardSnapshot`] and [`VehicleDetail`] are built from any
//! [`FleetSource`] in one pass and are plain owned data afterwards, so the
//! TUI never reaches into the store while rendering. [`FleetReport`] bundles
//! both for the JSON export.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use fleet_core::error::Result;
use fleet_core::insights;
use fleet_core::models::{
    DailyLog, EngineSummary, FleetStats, SeriesPoint, User, Vehicle, VehicleSeriesPoint,
    VehicleStats,
};
use fleet_data::aggregator;
use fleet_data::store::FleetSource;

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// A vehicle together with its summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRow {
    pub vehicle: Vehicle,
    pub stats: VehicleStats,
}

/// Everything the fleet dashboard screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user: User,
    pub totals: FleetStats,
    /// Fleet-wide chart data, ascending by date.
    pub series: Vec<SeriesPoint>,
    /// One row per vehicle, in registration order.
    pub rows: Vec<VehicleRow>,
}

impl DashboardSnapshot {
    pub fn build(source: &impl FleetSource) -> Self {
        let rows = source
            .vehicles()
            .iter()
            .map(|vehicle| VehicleRow {
                stats: aggregator::stats_for_vehicle(&source.logs_for_vehicle(&vehicle.id)),
                vehicle: vehicle.clone(),
            })
            .collect();

        Self {
            user: source.user().clone(),
            totals: aggregator::fleet_totals(source.vehicles(), source.logs()),
            series: aggregator::daily_series(source.logs()),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Vehicle detail ────────────────────────────────────────────────────────────

/// Everything the vehicle screen shows for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub stats: VehicleStats,
    pub series: Vec<VehicleSeriesPoint>,
    pub engine: EngineSummary,
    /// Logs, newest first.
    pub logs: Vec<DailyLog>,
    /// Logs carrying an alert, newest first.
    pub alerts: Vec<DailyLog>,
    pub suggestions: Vec<String>,
}

impl VehicleDetail {
    /// Build the detail view for `id`.
    ///
    /// Returns [`fleet_core::FleetError::VehicleNotFound`] for an unknown id.
    pub fn build(source: &impl FleetSource, id: &str) -> Result<Self> {
        let vehicle = source.vehicle(id)?.clone();
        let mut logs = source.logs_for_vehicle(id);
        let stats = aggregator::stats_for_vehicle(&logs);
        let series = aggregator::vehicle_series(&logs);
        let engine = aggregator::engine_summary(&logs);
        let alerts = aggregator::alerts(&logs).into_iter().cloned().collect();
        let suggestions = insights::suggestions(&vehicle, &stats);

        logs.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            vehicle,
            stats,
            series,
            engine,
            logs,
            alerts,
            suggestions,
        })
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// The exported fleet report: dashboard plus every vehicle detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub generated_at: DateTime<Utc>,
    pub dashboard: DashboardSnapshot,
    pub vehicles: Vec<VehicleDetail>,
}

impl FleetReport {
    pub fn build(source: &impl FleetSource, generated_at: DateTime<Utc>) -> Result<Self> {
        let vehicles = source
            .vehicles()
            .iter()
            .map(|v| VehicleDetail::build(source, &v.id))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            generated_at,
            dashboard: DashboardSnapshot::build(source),
            vehicles,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), vehicles = self.vehicles.len(), "report written");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleet_core::error::FleetError;
    use fleet_core::insights::ALL_CLEAR;
    use fleet_core::models::FuelType;
    use fleet_data::seed::{MockFleet, WINDOW_DAYS};
    use fleet_data::store::{FleetStore, StoreAction};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn make_store() -> FleetStore {
        MockFleet::generate(42, today()).unwrap()
    }

    #[test]
    fn test_dashboard_snapshot() {
        let store = make_store();
        let snap = DashboardSnapshot::build(&store);

        assert_eq!(snap.user.id, "user1");
        assert_eq!(snap.totals.total_vehicles, 4);
        assert_eq!(snap.rows.len(), 4);
        assert_eq!(snap.series.len(), WINDOW_DAYS as usize);
        assert!(snap.series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(snap.series.last().unwrap().date, today());

        let row_alerts: u32 = snap.rows.iter().map(|r| r.stats.alerts_count).sum();
        assert_eq!(row_alerts, snap.totals.total_alerts);
    }

    #[test]
    fn test_dashboard_empty_fleet() {
        let store = FleetStore::new(MockFleet::user());
        let snap = DashboardSnapshot::build(&store);
        assert!(snap.is_empty());
        assert_eq!(snap.totals, FleetStats::default());
        assert!(snap.series.is_empty());
    }

    #[test]
    fn test_vehicle_detail() {
        let store = make_store();
        let detail = VehicleDetail::build(&store, "v2").unwrap();

        assert_eq!(detail.vehicle.fuel_type, FuelType::Electric);
        assert_eq!(detail.stats.avg_fuel_consumption, 0.0);
        assert_eq!(detail.series.len(), WINDOW_DAYS as usize);
        assert!(detail.series.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(detail.logs[0].date, today());
        assert_eq!(detail.engine.temp_samples, WINDOW_DAYS);
        assert_eq!(detail.alerts.len() as u32, detail.stats.alerts_count);
        assert!(!detail.suggestions.is_empty());
    }

    #[test]
    fn test_vehicle_detail_not_found() {
        let store = make_store();
        let err = VehicleDetail::build(&store, "v9").unwrap_err();
        assert!(matches!(err, FleetError::VehicleNotFound(id) if id == "v9"));
    }

    #[test]
    fn test_vehicle_detail_without_logs() {
        let mut store = FleetStore::new(MockFleet::user());
        let vehicle = MockFleet::vehicles().remove(1);
        store.dispatch(StoreAction::Add(vehicle)).unwrap();

        let detail = VehicleDetail::build(&store, "v2").unwrap();
        assert_eq!(detail.stats, VehicleStats::default());
        assert!(detail.series.is_empty());
        assert_eq!(detail.engine.avg_engine_temp, None);
        assert_eq!(detail.suggestions, vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn test_snapshot_reflects_delete() {
        let mut store = make_store();
        store.dispatch(StoreAction::Delete("v1".to_string())).unwrap();
        let snap = DashboardSnapshot::build(&store);
        assert_eq!(snap.totals.total_vehicles, 3);
        assert!(snap.rows.iter().all(|r| r.vehicle.id != "v1"));
    }

    #[test]
    fn test_report_written_as_json() {
        let store = make_store();
        let report = FleetReport::build(&store, Utc::now()).unwrap();
        assert_eq!(report.vehicles.len(), 4);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("fleet.json");
        report.write_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dashboard"]["totals"]["totalVehicles"], 4);
        assert_eq!(value["vehicles"][0]["vehicle"]["id"], "v1");
        assert_eq!(value["vehicles"].as_array().unwrap().len(), 4);
        assert!(value["generatedAt"].is_string());
    }
}
