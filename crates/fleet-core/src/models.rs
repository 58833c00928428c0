use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FleetError;

/// Power source of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    /// Every variant, in the order the form lists them.
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }

    /// Combustion engines (gasoline or diesel) that benefit from routine
    /// servicing advice.
    pub fn is_combustion(&self) -> bool {
        matches!(self, FuelType::Gasoline | FuelType::Diesel)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = FleetError;

    /// Case-insensitive match against the four variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|ft| ft.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FleetError::InvalidFuelType(s.to_string()))
    }
}

/// Severity of an issue attached to a daily log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::None => "none",
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        }
    }

    /// `true` for every severity except [`AlertSeverity::None`].
    pub fn is_alert(&self) -> bool {
        !matches!(self, AlertSeverity::None)
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account that owns a fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A vehicle registered to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    /// Owning [`User::id`].
    pub user_id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub fuel_type: FuelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub last_updated: NaiveDate,
}

impl Vehicle {
    /// `"2019 Toyota Prius"`.
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

/// One telemetry sample for one vehicle on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: String,
    /// Foreign key into [`Vehicle::id`].
    pub vehicle_id: String,
    pub date: NaiveDate,
    /// Liters.
    pub fuel_consumption: f64,
    /// Grams per kilometre.
    pub co2_emissions: f64,
    /// Kilometres per liter (per kWh equivalent for electric vehicles).
    pub mileage: f64,
    /// Kilometres.
    pub distance_covered: f64,
    /// Degrees Celsius, when the sensor reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_rpm: Option<f64>,
    #[serde(default)]
    pub alert_type: AlertSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Summary statistics for one vehicle, derived from its logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStats {
    pub avg_fuel_consumption: f64,
    pub avg_co2_emissions: f64,
    pub avg_mileage: f64,
    pub total_distance: f64,
    pub alerts_count: u32,
}

/// Summary statistics across the whole fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_vehicles: usize,
    pub total_distance: f64,
    pub avg_fuel_consumption: f64,
    pub total_alerts: u32,
}

/// One calendar date of the fleet-wide chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Mean over every log on this date.
    pub fuel_consumption: f64,
    /// Mean over every log on this date.
    pub co2_emissions: f64,
    /// Sum over every log on this date.
    pub distance: f64,
}

/// One log projected for a single vehicle's charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSeriesPoint {
    pub date: NaiveDate,
    pub fuel_consumption: f64,
    pub co2_emissions: f64,
    pub mileage: f64,
    pub distance_covered: f64,
    pub engine_temp: Option<f64>,
    pub engine_rpm: Option<f64>,
}

/// Means of the optional engine sensor readings.
///
/// A field is `None` when no log carried that reading; missing readings never
/// count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSummary {
    pub avg_engine_temp: Option<f64>,
    pub avg_engine_rpm: Option<f64>,
    pub temp_samples: u32,
    pub rpm_samples: u32,
}
