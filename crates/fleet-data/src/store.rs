//! In-memory fleet state.
//!
//! [`FleetStore`] is the single owner of vehicles and daily logs. Reads go
//! through the [`FleetSource`] trait; writes go through
//! [`FleetStore::dispatch`] so that every mutation is an explicit
//! [`StoreAction`].

use tracing::debug;

use fleet_core::error::{FleetError, Result};
use fleet_core::models::{DailyLog, User, Vehicle};

// ── FleetSource ───────────────────────────────────────────────────────────────

/// Read-only access to fleet data.
pub trait FleetSource {
    /// The fleet owner.
    fn user(&self) -> &User;
    /// Every vehicle, in registration order.
    fn vehicles(&self) -> &[Vehicle];
    /// Every daily log, in insertion order.
    fn logs(&self) -> &[DailyLog];

    fn find_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles().iter().find(|v| v.id == id)
    }

    /// Like [`FleetSource::find_vehicle`] but a missing id is an error.
    fn vehicle(&self, id: &str) -> Result<&Vehicle> {
        self.find_vehicle(id)
            .ok_or_else(|| FleetError::VehicleNotFound(id.to_string()))
    }

    /// The logs belonging to `vehicle_id`, in insertion order.
    fn logs_for_vehicle(&self, vehicle_id: &str) -> Vec<DailyLog> {
        self.logs()
            .iter()
            .filter(|l| l.vehicle_id == vehicle_id)
            .cloned()
            .collect()
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// A requested mutation of the fleet.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Register a new vehicle. Its id must be unused.
    Add(Vehicle),
    /// Replace the vehicle with the same id.
    Update(Vehicle),
    /// Remove a vehicle and all of its logs.
    Delete(String),
}

/// The outcome of a successfully applied [`StoreAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(String),
    Updated(String),
    Deleted { id: String, logs_removed: usize },
}

// ── FleetStore ────────────────────────────────────────────────────────────────

/// Owned fleet state for one user.
#[derive(Debug, Clone)]
pub struct FleetStore {
    user: User,
    vehicles: Vec<Vehicle>,
    logs: Vec<DailyLog>,
}

impl FleetStore {
    /// An empty fleet for `user`.
    pub fn new(user: User) -> Self {
        Self {
            user,
            vehicles: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Build a store from existing records, checking ids and log references.
    pub fn with_data(user: User, vehicles: Vec<Vehicle>, logs: Vec<DailyLog>) -> Result<Self> {
        let mut store = Self::new(user);
        for vehicle in vehicles {
            store.dispatch(StoreAction::Add(vehicle))?;
        }
        for log in logs {
            store.insert_log(log)?;
        }
        Ok(store)
    }

    /// Apply `action`, returning what changed.
    pub fn dispatch(&mut self, action: StoreAction) -> Result<StoreEvent> {
        match action {
            StoreAction::Add(vehicle) => {
                if self.find_vehicle(&vehicle.id).is_some() {
                    return Err(FleetError::DuplicateVehicle(vehicle.id));
                }
                debug!(id = %vehicle.id, "vehicle added");
                let id = vehicle.id.clone();
                self.vehicles.push(vehicle);
                Ok(StoreEvent::Added(id))
            }
            StoreAction::Update(vehicle) => {
                let slot = self
                    .vehicles
                    .iter_mut()
                    .find(|v| v.id == vehicle.id)
                    .ok_or_else(|| FleetError::VehicleNotFound(vehicle.id.clone()))?;
                debug!(id = %vehicle.id, "vehicle updated");
                let id = vehicle.id.clone();
                *slot = vehicle;
                Ok(StoreEvent::Updated(id))
            }
            StoreAction::Delete(id) => {
                let before = self.vehicles.len();
                self.vehicles.retain(|v| v.id != id);
                if self.vehicles.len() == before {
                    return Err(FleetError::VehicleNotFound(id));
                }
                let logs_before = self.logs.len();
                self.logs.retain(|l| l.vehicle_id != id);
                let logs_removed = logs_before - self.logs.len();
                debug!(id = %id, logs_removed, "vehicle deleted");
                Ok(StoreEvent::Deleted { id, logs_removed })
            }
        }
    }

    /// Append a log. The referenced vehicle must exist.
    pub fn insert_log(&mut self, log: DailyLog) -> Result<()> {
        if self.find_vehicle(&log.vehicle_id).is_none() {
            return Err(FleetError::OrphanLog {
                log_id: log.id,
                vehicle_id: log.vehicle_id,
            });
        }
        self.logs.push(log);
        Ok(())
    }
}

impl FleetSource for FleetStore {
    fn user(&self) -> &User {
        &self.user
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn logs(&self) -> &[DailyLog] {
        &self.logs
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
