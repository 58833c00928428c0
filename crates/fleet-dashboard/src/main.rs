mod bootstrap;
mod form;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use fleet_core::settings::Settings;
use fleet_core::time_utils;
use fleet_data::seed::MockFleet;
use fleet_data::store::{FleetSource, FleetStore};
use fleet_runtime::dashboard::FleetReport;
use fleet_runtime::submission::VehicleSubmitter;
use fleet_ui::app::{App, Screen};

use crate::form::FormOutcome;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Fleet Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Timezone: {}, Seed: {}",
        settings.view,
        settings.theme,
        settings.timezone,
        settings.seed
    );

    let today = time_utils::today(&settings.timezone);
    let mut store = MockFleet::generate(settings.seed, today)?;

    if let Some(path) = &settings.export {
        FleetReport::build(&store, Utc::now())?.write_to(path)?;
        println!("Fleet report written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    match settings.view.as_str() {
        "dashboard" => {
            run_tui(&settings, store, Screen::Dashboard, None)?;
        }

        "vehicle" => {
            let id = settings
                .vehicle
                .clone()
                .context("--vehicle <ID> is required for the vehicle view")?;
            run_tui(&settings, store, Screen::vehicle(id), None)?;
        }

        "add" | "edit" => {
            let submitter =
                VehicleSubmitter::new(Duration::from_millis(settings.submit_delay_ms));
            eprintln!("Saving vehicle...");

            match form::submit_vehicle_form(&settings, &mut store, &submitter, today).await? {
                FormOutcome::Saved(submission) => {
                    let message = submission.confirmation();
                    println!("{message}");
                    run_tui(&settings, store, Screen::Dashboard, Some(message))?;
                }
                FormOutcome::Rejected(errors) => {
                    for e in errors.iter() {
                        eprintln!("{}: {}", e.field.as_str(), e.message);
                    }
                    return Ok(ExitCode::from(2));
                }
                FormOutcome::NotFound(id) => {
                    eprintln!("Vehicle Not Found: no vehicle with id \"{id}\" in this fleet");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        unknown => {
            eprintln!("Unknown view: {}", unknown);
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Open the TUI on `screen` and block until the user quits.
fn run_tui(
    settings: &Settings,
    store: FleetStore,
    screen: Screen,
    status: Option<String>,
) -> Result<()> {
    let mut app = App::new(&settings.theme, store, settings.timezone.clone(), screen);
    if let Some(message) = status {
        app = app.with_status(message);
    }

    let store = app.run()?;
    tracing::info!(vehicles = store.vehicles().len(), "session ended");
    Ok(())
}
