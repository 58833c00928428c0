//! The `add` and `edit` views: build a draft from the form flags, validate
//! it, submit it and apply the result to the store.

use chrono::{Datelike, NaiveDate};

use fleet_core::error::{FleetError, Result};
use fleet_core::settings::Settings;
use fleet_core::validation::{validate, FieldErrors};
use fleet_data::store::{FleetSource, FleetStore};
use fleet_runtime::submission::{Submission, VehicleSubmitter};

/// What happened to a submitted form.
#[derive(Debug)]
pub enum FormOutcome {
    Saved(Submission),
    /// Nothing was submitted; every failing field is listed.
    Rejected(FieldErrors),
    /// `edit` named a vehicle id the fleet does not contain.
    NotFound(String),
}

/// Run the vehicle form for `settings.view` (`add` or `edit`).
///
/// Editing requires `--vehicle`; an unknown id yields
/// [`FormOutcome::NotFound`]. The model year is checked against the year of
/// `today`.
pub async fn submit_vehicle_form(
    settings: &Settings,
    store: &mut FleetStore,
    submitter: &VehicleSubmitter,
    today: NaiveDate,
) -> Result<FormOutcome> {
    let existing = match settings.view.as_str() {
        "edit" => {
            let id = settings
                .vehicle
                .as_deref()
                .ok_or_else(|| FleetError::Config("--vehicle is required to edit".to_string()))?;
            match store.find_vehicle(id) {
                Some(vehicle) => Some(vehicle.clone()),
                None => {
                    tracing::warn!(id, "edit requested for unknown vehicle");
                    return Ok(FormOutcome::NotFound(id.to_string()));
                }
            }
        }
        _ => None,
    };

    let draft = settings.vehicle_draft(existing.as_ref());
    let form = match validate(&draft, today.year()) {
        Ok(form) => form,
        Err(errors) => {
            tracing::debug!(errors = %errors, "vehicle form rejected");
            return Ok(FormOutcome::Rejected(errors));
        }
    };

    let submission = submitter.submit(form, existing.as_ref(), today).await;
    store.dispatch(submission.clone().into_action())?;
    tracing::info!(id = %submission.vehicle.id, mode = ?submission.mode, "vehicle saved");

    Ok(FormOutcome::Saved(submission))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fleet_core::models::FuelType;
    use fleet_core::validation::VehicleField;
    use fleet_data::seed::MockFleet;
    use fleet_runtime::submission::SubmitMode;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn settings(args: &[&str]) -> Settings {
        let mut argv = vec!["fleet-dashboard"];
        argv.extend_from_slice(args);
        Settings::parse_from(argv)
    }

    fn store() -> FleetStore {
        MockFleet::generate(42, today()).unwrap()
    }

    fn submitter() -> VehicleSubmitter {
        VehicleSubmitter::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_add_vehicle() {
        let mut store = store();
        let s = settings(&[
            "--view",
            "add",
            "--make",
            "Kia",
            "--model",
            "Niro",
            "--year",
            "2023",
            "--license-plate",
            "KIA-23",
            "--fuel-type",
            "hybrid",
        ]);

        let outcome = submit_vehicle_form(&s, &mut store, &submitter(), today())
            .await
            .unwrap();

        let FormOutcome::Saved(sub) = outcome else {
            panic!("expected a saved vehicle");
        };
        assert_eq!(sub.mode, SubmitMode::Added);
        assert_eq!(sub.confirmation(), "2023 Kia Niro has been added.");
        assert_eq!(store.vehicles().len(), 5);
        let added = store.vehicle(&sub.vehicle.id).unwrap();
        assert_eq!(added.fuel_type, FuelType::Hybrid);
        assert_eq!(added.last_updated, today());
    }

    #[tokio::test]
    async fn test_edit_fuel_type_only() {
        let mut store = store();
        let before = store.vehicle("v4").unwrap().clone();
        let s = settings(&["--view", "edit", "--vehicle", "v4", "--fuel-type", "Hybrid"]);

        let outcome = submit_vehicle_form(&s, &mut store, &submitter(), today())
            .await
            .unwrap();

        assert!(matches!(outcome, FormOutcome::Saved(ref sub) if sub.mode == SubmitMode::Updated));
        let after = store.vehicle("v4").unwrap();
        assert_eq!(after.fuel_type, FuelType::Hybrid);
        assert_eq!(after.make, before.make);
        assert_eq!(after.license_plate, before.license_plate);
        assert_eq!(store.vehicles().len(), 4);
        assert_eq!(store.logs_for_vehicle("v4").len(), 7);
    }

    #[tokio::test]
    async fn test_invalid_form_is_rejected_without_changes() {
        let mut store = store();
        let s = settings(&["--view", "add", "--year", "abc", "--fuel-type", "Steam"]);

        let outcome = submit_vehicle_form(&s, &mut store, &submitter(), today())
            .await
            .unwrap();

        let FormOutcome::Rejected(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.for_field(VehicleField::Make), Some("Make is required"));
        assert_eq!(
            errors.for_field(VehicleField::Year),
            Some("Year must be a number")
        );
        assert!(errors.for_field(VehicleField::FuelType).is_some());
        assert_eq!(store.vehicles().len(), 4);
    }

    #[tokio::test]
    async fn test_edit_year_out_of_range() {
        let mut store = store();
        let s = settings(&["--view", "edit", "--vehicle", "v1", "--year", "2026"]);

        let outcome = submit_vehicle_form(&s, &mut store, &submitter(), today())
            .await
            .unwrap();

        let FormOutcome::Rejected(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field(VehicleField::Year),
            Some("Year must be 2025 or earlier")
        );
    }

    #[tokio::test]
    async fn test_edit_requires_known_vehicle() {
        let mut store = store();

        let missing_flag = settings(&["--view", "edit"]);
        let err = submit_vehicle_form(&missing_flag, &mut store, &submitter(), today())
            .await
            .unwrap_err();
        assert!(matches!(err, FleetError::Config(_)));

        let unknown = settings(&["--view", "edit", "--vehicle", "v9", "--make", "Kia"]);
        let outcome = submit_vehicle_form(&unknown, &mut store, &submitter(), today())
            .await
            .unwrap();
        assert!(matches!(outcome, FormOutcome::NotFound(ref id) if id == "v9"));
        assert_eq!(store.vehicles().len(), 4);
        assert!(store.find_vehicle("v9").is_none());
    }
}
