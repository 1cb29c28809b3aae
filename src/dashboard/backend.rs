//! Network seam for the patient dashboard.

use crate::framework::backend::{ensure_success, read_json, transport_error};
use crate::framework::ResourceError;
use crate::model::{Appointment, CombinedData, Medication, OutgoingMessage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// The calls the dashboard makes against its API.
#[async_trait]
pub trait DashboardBackend: Send + Sync + 'static {
    async fn fetch_combined(&self) -> Result<CombinedData, ResourceError>;
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), ResourceError>;
    async fn book_appointment(&self, appointment: &Appointment) -> Result<(), ResourceError>;
    async fn add_medication(&self, medication: &Medication) -> Result<(), ResourceError>;
}

/// REST implementation of [`DashboardBackend`].
pub struct HttpDashboardBackend {
    client: Client,
    base_url: String,
}

impl HttpDashboardBackend {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn post<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> Result<(), ResourceError> {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl DashboardBackend for HttpDashboardBackend {
    async fn fetch_combined(&self) -> Result<CombinedData, ResourceError> {
        let url = self.url("combinedData");
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        read_json(response).await
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), ResourceError> {
        self.post("sendMessage", message).await
    }

    async fn book_appointment(&self, appointment: &Appointment) -> Result<(), ResourceError> {
        self.post("bookAppointment", appointment).await
    }

    async fn add_medication(&self, medication: &Medication) -> Result<(), ResourceError> {
        self.post("addMedication", medication).await
    }
}
