//! Plain-language suggestions derived from a vehicle's statistics.

use crate::models::{FuelType, Vehicle, VehicleStats};

/// Average fuel consumption (liters) above which idling advice is given.
pub const HIGH_FUEL_THRESHOLD: f64 = 7.0;

/// Average CO₂ emissions (g/km) above which a maintenance check is advised.
pub const HIGH_CO2_THRESHOLD: f64 = 130.0;

/// Shown when no rule fires.
pub const ALL_CLEAR: &str = "No suggestions at this time. Your vehicle is performing well.";

/// Build the suggestion list for `vehicle`.
///
/// Never empty: falls back to [`ALL_CLEAR`].
pub fn suggestions(vehicle: &Vehicle, stats: &VehicleStats) -> Vec<String> {
    let mut out = Vec::new();
    let electric = vehicle.fuel_type == FuelType::Electric;

    if stats.avg_fuel_consumption > HIGH_FUEL_THRESHOLD && !electric {
        out.push("Consider reducing idle time to improve fuel efficiency.".to_string());
    }

    if stats.avg_co2_emissions > HIGH_CO2_THRESHOLD && !electric {
        out.push(
            "Higher than average emissions detected. A maintenance check is recommended."
                .to_string(),
        );
    }

    if vehicle.fuel_type.is_combustion() {
        out.push("Regular maintenance can improve fuel efficiency and reduce emissions.".to_string());
    }

    if stats.alerts_count > 0 {
        out.push(format!(
            "You have {} alert(s). Check the alerts tab for details.",
            stats.alerts_count
        ));
    }

    if out.is_empty() {
        out.push(ALL_CLEAR.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_vehicle(fuel_type: FuelType) -> Vehicle {
        Vehicle {
            id: "v1".to_string(),
            user_id: "user1".to_string(),
            make: "Make".to_string(),
            model: "Model".to_string(),
            year: 2020,
            license_plate: "ABC-1".to_string(),
            fuel_type,
            image_url: None,
            last_updated: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
        }
    }

    fn make_stats(fuel: f64, co2: f64, alerts: u32) -> VehicleStats {
        VehicleStats {
            avg_fuel_consumption: fuel,
            avg_co2_emissions: co2,
            avg_mileage: 12.0,
            total_distance: 200.0,
            alerts_count: alerts,
        }
    }

    #[test]
    fn test_quiet_hybrid_is_all_clear() {
        let out = suggestions(&make_vehicle(FuelType::Hybrid), &make_stats(4.0, 90.0, 0));
        assert_eq!(out, vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn test_thirsty_gasoline_gets_every_tip() {
        let out = suggestions(&make_vehicle(FuelType::Gasoline), &make_stats(8.5, 150.0, 2));
        assert_eq!(out.len(), 4);
        assert!(out[0].contains("idle time"));
        assert!(out[1].contains("maintenance check"));
        assert!(out[2].contains("Regular maintenance"));
        assert_eq!(out[3], "You have 2 alert(s). Check the alerts tab for details.");
    }

    #[test]
    fn test_electric_ignores_fuel_and_co2_rules() {
        let out = suggestions(&make_vehicle(FuelType::Electric), &make_stats(9.0, 200.0, 0));
        assert_eq!(out, vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let out = suggestions(&make_vehicle(FuelType::Hybrid), &make_stats(7.0, 130.0, 0));
        assert_eq!(out, vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn test_diesel_always_gets_maintenance_tip() {
        let out = suggestions(&make_vehicle(FuelType::Diesel), &make_stats(6.0, 125.0, 0));
        assert_eq!(
            out,
            vec!["Regular maintenance can improve fuel efficiency and reduce emissions.".to_string()]
        );
    }
}
