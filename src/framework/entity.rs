//! # ResourceEntity Trait
//!
//! The contract an item type must satisfy to be mirrored by a [`ResourceActor`](crate::framework::ResourceActor).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any item type must implement to be managed by a `DataResource`.
///
/// # Architecture Note
/// The resource only needs two things from an item: a stable identifier, and a way to
/// merge a sparse set of changes into itself. Everything else about the record is opaque,
/// which is why one actor loop serves patients, appointments, or anything else the
/// backend exposes as a collection.
///
/// We use "Associated Types" to tie each item to its own change payload. A `Patient`
/// accepts `PatientChanges`, and the compiler rejects any other payload.
pub trait ResourceEntity: Clone + Debug + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this item. `Display` is used to build the per-item URL.
    type Id: Clone + Eq + Display + Debug + Send + Sync + 'static;

    /// Sparse field/value pairs submitted by `update`. Serialized as the PUT body.
    type Changes: Clone + Debug + Serialize + Send + Sync + 'static;

    /// The stable identifier of this item.
    fn id(&self) -> &Self::Id;

    /// Overwrite the fields present in `changes`. Used by the optimistic update strategy.
    fn apply_changes(&mut self, changes: &Self::Changes);
}
