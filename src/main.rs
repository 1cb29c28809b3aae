//! Demo entry point: loads the configuration from the environment, mounts the patient
//! resource and the dashboard, logs what was fetched, then shuts down.

use chrono::{Duration, Utc};
use patient_resource::clients::ResourceHandle;
use patient_resource::config::Config;
use patient_resource::lifecycle::{setup_tracing, PatientSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    info!(backend = %config.backend_url, "Starting patient client");

    let system = PatientSystem::start(config)
        .await
        .map_err(|e| e.to_string())?;

    match system.patients.error() {
        Some(message) => warn!(%message, "Patients unavailable"),
        None => {
            for patient in system.patients.patients() {
                info!(
                    id = %patient.id,
                    name = %patient.name,
                    age = patient.age,
                    condition = %patient.condition,
                    "Patient"
                );
            }
        }
    }

    let dashboard = &system.dashboard;
    if let Some(message) = dashboard.error() {
        warn!(%message, "Dashboard unavailable");
    }
    let now = Utc::now();
    for visit in dashboard.recent_visits(now, Duration::days(30)) {
        info!(date = %visit.date, doctor = %visit.doctor_name, reason = %visit.reason, "Recent visit");
    }
    for medication in &dashboard.data().medications {
        info!(name = %medication.name, dosage = %medication.dosage, schedule = %medication.schedule, "Medication");
    }
    for appointment in dashboard.upcoming_appointments(now) {
        info!(date = %appointment.date, doctor = %appointment.doctor_name, purpose = %appointment.purpose, "Upcoming appointment");
    }

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
