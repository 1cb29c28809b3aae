use serde::{Deserialize, Serialize};

/// A patient record as served by `GET /patients`.
///
/// # Resource Framework
/// This struct implements the [`ResourceEntity`](crate::framework::ResourceEntity) trait,
/// allowing it to be mirrored by a [`DataResource`](crate::framework::DataResource).
///
/// See [`impl ResourceEntity for Patient`](#impl-ResourceEntity-for-Patient) for details on
/// how [`PatientChanges`] are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
}

impl Patient {
    /// Creates a new Patient instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the backend
    /// * `name` - Patient's display name
    /// * `age` - Age in years
    /// * `condition` - Free-text clinical condition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            condition: condition.into(),
        }
    }
}

/// Payload for `PUT /patients/{id}`.
/// Absent fields are left out of the JSON body so the backend only sees what changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl PatientChanges {
    pub fn condition(condition: impl Into<String>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..Self::default()
        }
    }
}
