//! ResourceEntity trait implementation for the Patient domain type.
//!
//! This module contains the [`ResourceEntity`] implementation that lets [`Patient`] be
//! mirrored by the generic [`crate::framework::ResourceActor`].

use crate::framework::ResourceEntity;
use crate::model::{Patient, PatientChanges};

impl ResourceEntity for Patient {
    type Id = String;
    type Changes = PatientChanges;

    fn id(&self) -> &String {
        &self.id
    }

    /// Merges a partial update into the patient.
    ///
    /// # Fields Updated
    /// - `name`: Patient's display name
    /// - `age`: Age in years
    /// - `condition`: Clinical condition
    fn apply_changes(&mut self, changes: &PatientChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(condition) = &changes.condition {
            self.condition = condition.clone();
        }
    }
}
