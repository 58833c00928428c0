//! Terminal UI layer for the fleet dashboard.
//!
//! Themes, header, stat card and chart components, the dashboard and
//! vehicle screens, and the application event loop built on [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod themes;
pub mod vehicle_view;

pub use fleet_core as core;
