//! Simulated asynchronous vehicle form submission.
//!
//! The form layer hands a validated [`VehicleForm`] to [`VehicleSubmitter`],
//! which waits a fixed latency (standing in for a remote call) and resolves
//! the record to store. The caller then dispatches it into the fleet store.

use std::time::Duration;

use chrono::{NaiveDate, Utc};

use fleet_core::models::Vehicle;
use fleet_core::validation::VehicleForm;
use fleet_data::store::StoreAction;

/// Default simulated latency (1 s).
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1_000;

/// Owner assigned to vehicles created without one.
pub const DEFAULT_USER_ID: &str = "user1";

/// Whether a submission created a vehicle or edited one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Added,
    Updated,
}

/// A resolved submission, ready to be applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub vehicle: Vehicle,
    pub mode: SubmitMode,
}

impl Submission {
    /// The store mutation that applies this submission.
    pub fn into_action(self) -> StoreAction {
        match self.mode {
            SubmitMode::Added => StoreAction::Add(self.vehicle),
            SubmitMode::Updated => StoreAction::Update(self.vehicle),
        }
    }

    /// Confirmation line, e.g. `"2021 Tesla Model 3 has been updated."`.
    pub fn confirmation(&self) -> String {
        let verb = match self.mode {
            SubmitMode::Added => "added",
            SubmitMode::Updated => "updated",
        };
        format!("{} has been {}.", self.vehicle.title(), verb)
    }
}

/// Resolves validated forms into vehicles after a fixed delay.
#[derive(Debug, Clone)]
pub struct VehicleSubmitter {
    delay: Duration,
}

impl Default for VehicleSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS))
    }
}

impl VehicleSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the configured delay, then resolve `form`.
    ///
    /// With `existing` the submission is an edit: the id and owner of the
    /// existing record are kept. Otherwise a new id `v{unix_millis}` is
    /// generated. `last_updated` becomes `today` either way.
    pub async fn submit(
        &self,
        form: VehicleForm,
        existing: Option<&Vehicle>,
        today: NaiveDate,
    ) -> Submission {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "submitting vehicle form");
        tokio::time::sleep(self.delay).await;
        resolve(form, existing, today)
    }
}

/// Build the stored vehicle from a validated form.
pub fn resolve(form: VehicleForm, existing: Option<&Vehicle>, today: NaiveDate) -> Submission {
    let (id, user_id, mode) = match existing {
        Some(v) => (v.id.clone(), v.user_id.clone(), SubmitMode::Updated),
        None => (
            form.id
                .clone()
                .unwrap_or_else(|| format!("v{}", Utc::now().timestamp_millis())),
            form.user_id
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            SubmitMode::Added,
        ),
    };

    Submission {
        vehicle: Vehicle {
            id,
            user_id,
            make: form.make,
            model: form.model,
            year: form.year,
            license_plate: form.license_plate,
            fuel_type: form.fuel_type,
            image_url: form.image_url,
            last_updated: today,
        },
        mode,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
