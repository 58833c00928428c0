use thiserror::Error;

/// All errors produced by the fleet dashboard.
#[derive(Error, Debug)]
pub enum FleetError {
    /// No vehicle carries the requested id.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// A vehicle with this id is already registered.
    #[error("Vehicle already exists: {0}")]
    DuplicateVehicle(String),

    /// A daily log references a vehicle that does not exist.
    #[error("Log {log_id} references unknown vehicle {vehicle_id}")]
    OrphanLog { log_id: String, vehicle_id: String },

    #[error("Invalid fuel type: {0}")]
    InvalidFuelType(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the fleet crates.
pub type Result<T> = std::result::Result<T, FleetError>;
