//! Runtime layer for the fleet dashboard.
//!
//! Builds the dashboard and vehicle view models from the store, exports
//! fleet reports and simulates the asynchronous vehicle form submission.

pub mod dashboard;
pub mod submission;

pub use fleet_core as core;
pub use fleet_data as data;
