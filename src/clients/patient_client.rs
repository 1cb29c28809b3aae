use crate::clients::resource_handle::ResourceHandle;
use crate::framework::{FrameworkError, Outcome, ResourceClient};
use crate::model::{Patient, PatientChanges};
use crate::patient_resource::PatientError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Patient resource.
#[derive(Clone)]
pub struct PatientClient {
    inner: ResourceClient<Patient>,
}

impl PatientClient {
    pub fn new(inner: ResourceClient<Patient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ResourceHandle<Patient> for PatientClient {
    type Error = PatientError;

    fn inner(&self) -> &ResourceClient<Patient> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PatientError::ResourceCommunicationError(e)
    }
}

impl PatientClient {
    /// Current patients in server order.
    pub fn patients(&self) -> Vec<Patient> {
        self.items()
    }

    /// Submits a partial update. An empty change set is still sent; the backend decides
    /// what it means.
    #[instrument(skip(self))]
    pub async fn update_patient(
        &self,
        id: String,
        changes: PatientChanges,
    ) -> Result<Outcome, PatientError> {
        debug!("Sending request");
        self.inner
            .update(id, changes)
            .await
            .map_err(PatientError::ResourceCommunicationError)
    }

    pub async fn set_condition(
        &self,
        id: impl Into<String>,
        condition: impl Into<String>,
    ) -> Result<Outcome, PatientError> {
        self.update_patient(id.into(), PatientChanges::condition(condition))
            .await
    }
}
