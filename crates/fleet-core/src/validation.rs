//! Vehicle form validation.
//!
//! [`validate`] turns raw form input ([`VehicleDraft`]) into a typed
//! [`VehicleForm`], or reports every failing field at once.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{FuelType, Vehicle};

/// Earliest model year the form accepts.
pub const MIN_YEAR: i32 = 1900;

// ── Field errors ──────────────────────────────────────────────────────────────

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehicleField {
    Make,
    Model,
    Year,
    LicensePlate,
    FuelType,
}

impl VehicleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleField::Make => "make",
            VehicleField::Model => "model",
            VehicleField::Year => "year",
            VehicleField::LicensePlate => "licensePlate",
            VehicleField::FuelType => "fuelType",
        }
    }
}

/// A single failed rule, attached to the field that failed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: VehicleField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: VehicleField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every rule the draft failed, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message reported for `field`, for inline display.
    pub fn for_field(&self, field: VehicleField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ── Draft / Form ──────────────────────────────────────────────────────────────

/// Raw vehicle form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleDraft {
    /// Present when editing an existing vehicle.
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub make: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub fuel_type: String,
    pub image_url: Option<String>,
}

impl VehicleDraft {
    /// Prefill a draft from an existing vehicle (edit mode).
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: Some(vehicle.id.clone()),
            user_id: Some(vehicle.user_id.clone()),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.to_string(),
            license_plate: vehicle.license_plate.clone(),
            fuel_type: vehicle.fuel_type.to_string(),
            image_url: vehicle.image_url.clone(),
        }
    }
}

/// A draft that passed every rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub fuel_type: FuelType,
    pub image_url: Option<String>,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Validate `draft` against the form rules.
///
/// `current_year` bounds the model year from above (`current_year + 1`).
/// Text fields are trimmed; an empty image url becomes `None`.
pub fn validate(draft: &VehicleDraft, current_year: i32) -> Result<VehicleForm, FieldErrors> {
    let mut errors = Vec::new();

    let make = draft.make.trim();
    if make.is_empty() {
        errors.push(FieldError::new(VehicleField::Make, "Make is required"));
    }

    let model = draft.model.trim();
    if model.is_empty() {
        errors.push(FieldError::new(VehicleField::Model, "Model is required"));
    }

    let max_year = current_year + 1;
    let year = match parse_leading_int(&draft.year) {
        Some(y) if y < MIN_YEAR => {
            errors.push(FieldError::new(
                VehicleField::Year,
                format!("Year must be {MIN_YEAR} or later"),
            ));
            None
        }
        Some(y) if y > max_year => {
            errors.push(FieldError::new(
                VehicleField::Year,
                format!("Year must be {max_year} or earlier"),
            ));
            None
        }
        Some(y) => Some(y),
        None => {
            errors.push(FieldError::new(VehicleField::Year, "Year must be a number"));
            None
        }
    };

    let license_plate = draft.license_plate.trim();
    if license_plate.is_empty() {
        errors.push(FieldError::new(
            VehicleField::LicensePlate,
            "License plate is required",
        ));
    }

    let fuel_type = match draft.fuel_type.parse::<FuelType>() {
        Ok(ft) => Some(ft),
        Err(_) => {
            errors.push(FieldError::new(
                VehicleField::FuelType,
                "Fuel type must be one of Gasoline, Diesel, Electric, Hybrid",
            ));
            None
        }
    };

    match (year, fuel_type) {
        (Some(year), Some(fuel_type)) if errors.is_empty() => Ok(VehicleForm {
            id: non_empty(draft.id.as_deref()),
            user_id: non_empty(draft.user_id.as_deref()),
            make: make.to_string(),
            model: model.to_string(),
            year,
            license_plate: license_plate.to_string(),
            fuel_type,
            image_url: non_empty(draft.image_url.as_deref()),
        }),
        _ => Err(FieldErrors(errors)),
    }
}

/// Parse the leading integer of `s` the way a browser number input does:
/// surrounding whitespace is ignored and trailing garbage is dropped
/// (`"2020abc"` → 2020).
fn parse_leading_int(s: &str) -> Option<i32> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("regex is valid"));
    re.captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft() -> VehicleDraft {
        VehicleDraft {
            id: None,
            user_id: None,
            make: "Tesla".to_string(),
            model: "Model 3".to_string(),
            year: "2021".to_string(),
            license_plate: "ELEC-21".to_string(),
            fuel_type: "Electric".to_string(),
            image_url: Some(String::new()),
        }
    }

    #[test]
    fn test_valid_draft_produces_form() {
        let form = validate(&make_draft(), 2024).unwrap();
        assert_eq!(form.make, "Tesla");
        assert_eq!(form.year, 2021);
        assert_eq!(form.fuel_type, FuelType::Electric);
        assert!(form.image_url.is_none(), "empty image url becomes None");
        assert!(form.id.is_none());
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let mut draft = make_draft();
        draft.make = "  Ford ".to_string();
        draft.license_plate = " FORD-20 ".to_string();
        let form = validate(&draft, 2024).unwrap();
        assert_eq!(form.make, "Ford");
        assert_eq!(form.license_plate, "FORD-20");
    }

    #[test]
    fn test_all_failures_are_reported_together() {
        let draft = VehicleDraft {
            make: "  ".to_string(),
            model: String::new(),
            year: "abc".to_string(),
            license_plate: String::new(),
            fuel_type: "Steam".to_string(),
            ..Default::default()
        };
        let errors = validate(&draft, 2024).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.for_field(VehicleField::Make), Some("Make is required"));
        assert_eq!(errors.for_field(VehicleField::Model), Some("Model is required"));
        assert_eq!(errors.for_field(VehicleField::Year), Some("Year must be a number"));
        assert_eq!(
            errors.for_field(VehicleField::LicensePlate),
            Some("License plate is required")
        );
        assert!(errors.for_field(VehicleField::FuelType).is_some());
    }

    #[test]
    fn test_year_lower_bound() {
        let mut draft = make_draft();
        draft.year = "1899".to_string();
        let errors = validate(&draft, 2024).unwrap_err();
        assert_eq!(
            errors.for_field(VehicleField::Year),
            Some("Year must be 1900 or later")
        );

        draft.year = "1900".to_string();
        assert!(validate(&draft, 2024).is_ok());
    }

    #[test]
    fn test_year_upper_bound_is_next_year() {
        let mut draft = make_draft();
        draft.year = "2025".to_string();
        assert_eq!(validate(&draft, 2024).unwrap().year, 2025);

        draft.year = "2026".to_string();
        let errors = validate(&draft, 2024).unwrap_err();
        assert_eq!(
            errors.for_field(VehicleField::Year),
            Some("Year must be 2025 or earlier")
        );
    }

    #[test]
    fn test_year_parses_leading_integer() {
        let mut draft = make_draft();
        draft.year = " 2020abc".to_string();
        assert_eq!(validate(&draft, 2024).unwrap().year, 2020);
    }

    #[test]
    fn test_edit_draft_keeps_id() {
        use chrono::NaiveDate;
        let vehicle = Vehicle {
            id: "v3".to_string(),
            user_id: "user1".to_string(),
            make: "Ford".to_string(),
            model: "F-150".to_string(),
            year: 2020,
            license_plate: "FORD-20".to_string(),
            fuel_type: FuelType::Gasoline,
            image_url: Some("/placeholder.svg".to_string()),
            last_updated: NaiveDate::from_ymd_opt(2023, 5, 13).unwrap(),
        };
        let form = validate(&VehicleDraft::from_vehicle(&vehicle), 2024).unwrap();
        assert_eq!(form.id.as_deref(), Some("v3"));
        assert_eq!(form.user_id.as_deref(), Some("user1"));
        assert_eq!(form.image_url.as_deref(), Some("/placeholder.svg"));
    }

    #[test]
    fn test_field_errors_display() {
        let errors = FieldErrors(vec![FieldError::new(VehicleField::Year, "Year must be a number")]);
        assert_eq!(errors.to_string(), "year: Year must be a number");
    }
}
