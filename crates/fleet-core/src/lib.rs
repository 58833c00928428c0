//! Domain layer for the fleet dashboard.
//!
//! Vehicle and telemetry models, the shared error type, vehicle form
//! validation, display formatting, timezone helpers, CLI settings and the
//! suggestion rules shown on the vehicle screen.

pub mod error;
pub mod formatting;
pub mod insights;
pub mod models;
pub mod settings;
pub mod time_utils;
pub mod validation;

pub use error::{FleetError, Result};
