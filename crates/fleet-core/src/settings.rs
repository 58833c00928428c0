use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Vehicle;
use crate::validation::VehicleDraft;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Vehicle telemetry dashboard over a seeded mock fleet
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fleet-dashboard",
    about = "Vehicle telemetry dashboard over a seeded mock fleet",
    version
)]
pub struct Settings {
    /// Screen to open
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "vehicle", "add", "edit"])]
    pub view: String,

    /// Vehicle id for the vehicle and edit views
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Vehicle make (add / edit)
    #[arg(long)]
    pub make: Option<String>,

    /// Vehicle model (add / edit)
    #[arg(long)]
    pub model: Option<String>,

    /// Model year (add / edit)
    #[arg(long)]
    pub year: Option<String>,

    /// License plate (add / edit)
    #[arg(long)]
    pub license_plate: Option<String>,

    /// Fuel type: Gasoline, Diesel, Electric or Hybrid (add / edit)
    #[arg(long)]
    pub fuel_type: Option<String>,

    /// Image URL (add / edit)
    #[arg(long)]
    pub image_url: Option<String>,

    /// Seed for the mock telemetry generator
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Simulated form submission latency in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(0..=10_000))]
    pub submit_delay_ms: u64,

    /// Timezone used to date the mock window (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Write a JSON fleet report to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.fleet-dashboard/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl LastUsedParams {
    /// `~/.fleet-dashboard/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".fleet-dashboard").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, resolve `"auto"` values, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path, so tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear saved configuration");
            }
            return Self::resolve_auto_values(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "timezone") {
            if let Some(v) = last.timezone {
                settings.timezone = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "seed") {
            if let Some(v) = last.seed {
                settings.seed = v;
            }
        }

        settings = Self::resolve_auto_values(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "could not persist settings");
        }

        settings
    }

    /// Resolve `"auto"` sentinel values and apply the `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        if settings.timezone == "auto" {
            settings.timezone = crate::time_utils::get_system_timezone();
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Build the vehicle form draft from the form flags.
    ///
    /// In edit mode `existing` prefills every field; flags given on the
    /// command line replace the prefilled values.
    pub fn vehicle_draft(&self, existing: Option<&Vehicle>) -> VehicleDraft {
        let mut draft = existing.map(VehicleDraft::from_vehicle).unwrap_or_default();

        if let Some(v) = &self.make {
            draft.make = v.clone();
        }
        if let Some(v) = &self.model {
            draft.model = v.clone();
        }
        if let Some(v) = &self.year {
            draft.year = v.clone();
        }
        if let Some(v) = &self.license_plate {
            draft.license_plate = v.clone();
        }
        if let Some(v) = &self.fuel_type {
            draft.fuel_type = v.clone();
        }
        if let Some(v) = &self.image_url {
            draft.image_url = Some(v.clone());
        }

        draft
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            timezone: Some(s.timezone.clone()),
            seed: Some(s.seed),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
