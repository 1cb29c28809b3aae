//! Patient-specific resource wiring and entity implementation.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PatientClient;
use crate::framework::{DataResource, ResourceBackend, ResourceOptions};
use crate::model::Patient;
use std::sync::Arc;

/// Collection path of the patient endpoints, relative to the backend base URL.
pub const COLLECTION_PATH: &str = "patients";

/// Spawns the Patient resource and returns it with a typed client.
///
/// The [`DataResource`] owns the actor task; keep it to dispose the resource later.
pub fn create(
    backend: Arc<dyn ResourceBackend<Patient>>,
    options: ResourceOptions,
) -> (DataResource<Patient>, PatientClient) {
    let resource = DataResource::create_shared(backend, options);
    let client = PatientClient::new(resource.client());

    (resource, client)
}
