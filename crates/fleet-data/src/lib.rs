//! Data layer for the fleet dashboard.
//!
//! Owns the in-memory fleet state, generates the seeded mock telemetry and
//! aggregates daily logs into per-vehicle and fleet-wide statistics.

pub mod aggregator;
pub mod seed;
pub mod store;

pub use fleet_core as core;
