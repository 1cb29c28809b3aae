use crate::clients::{PatientClient, ResourceHandle};
use crate::config::Config;
use crate::dashboard::{HttpDashboardBackend, PatientDashboard};
use crate::framework::{
    build_http_client, DataResource, FrameworkError, HttpBackend, ResourceError, ResourceOptions,
};
use crate::model::Patient;
use crate::patient_resource::{self, COLLECTION_PATH};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can stop the system from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to start: {0}")]
    Startup(#[from] ResourceError),

    #[error("Resource shutdown failed: {0}")]
    Shutdown(#[from] FrameworkError),
}

/// The runtime orchestrator for the patient-facing client.
///
/// `PatientSystem` is responsible for:
/// - **Wiring**: building the HTTP backends from one [`Config`]
/// - **Mounting**: issuing the initial patient refresh and dashboard load
/// - **Disposal**: stopping the patient resource actor and waiting for it
///
/// # Example
///
/// ```ignore
/// let system = PatientSystem::start(Config::from_env()?).await?;
///
/// for patient in system.patients.patients() {
///     println!("{} ({})", patient.name, patient.condition);
/// }
/// system.patients.set_condition("1", "critical").await?;
///
/// system.shutdown().await?;
/// ```
pub struct PatientSystem {
    /// Client for the patient resource
    pub patients: PatientClient,

    /// Dashboard data and patient actions
    pub dashboard: PatientDashboard<HttpDashboardBackend>,

    /// Owner of the patient resource actor (used for shutdown)
    resource: DataResource<Patient>,
}

impl PatientSystem {
    /// Builds every component from `config` and performs the initial load.
    ///
    /// A failing initial load is not an error: it is recorded in the patient state and
    /// in the dashboard state, exactly like any later failure.
    pub async fn start(config: Config) -> Result<Self, SystemError> {
        let http = build_http_client(config.timeouts)?;

        let backend = Arc::new(HttpBackend::<Patient>::new(
            http.clone(),
            &config.backend_url,
            COLLECTION_PATH,
        ));
        let options = ResourceOptions::new(COLLECTION_PATH)
            .with_busy_policy(config.busy_policy)
            .with_update_strategy(config.update_strategy);
        let (resource, patients) = patient_resource::create(backend, options);

        let mut dashboard =
            PatientDashboard::new(HttpDashboardBackend::new(http, &config.dashboard_url));

        info!(backend = %config.backend_url, "Loading patient data");
        // Backend failures land in state; Err here means the actor is gone.
        if let Err(e) = patients.refresh().await {
            error!(error = %e, "Initial refresh failed");
        }
        dashboard.load().await;

        Ok(Self {
            patients,
            dashboard,
            resource,
        })
    }

    /// Gracefully shuts down the patient resource.
    ///
    /// Sends a dispose request, then waits for the actor task to complete.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.patients);

        if let Err(e) = self.resource.dispose().await {
            error!(error = %e, "Resource shutdown failed");
            return Err(SystemError::Shutdown(e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
