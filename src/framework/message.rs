//! # Messages
//!
//! Requests sent from a [`ResourceClient`](crate::framework::ResourceClient) to its actor,
//! and the settlement messages network tasks send back to the actor.

use crate::framework::{ResourceEntity, ResourceError, UpdateSettlement};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// How a `refresh` or `update` call ended.
///
/// Failures are not errors at this level: the message is already stored in the state,
/// the outcome only tells the caller which terminal transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The call settled successfully and the state reflects the backend's answer.
    Applied,
    /// The call settled with an error; items are unchanged and `error` is set.
    Failed,
    /// The resource was busy and the busy policy dropped the call. No request was issued.
    Skipped,
}

/// Requests a client can make of the resource actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ResourceEntity> {
    Refresh {
        respond_to: Response<Outcome>,
    },
    Update {
        id: T::Id,
        changes: T::Changes,
        respond_to: Response<Outcome>,
    },
    Dispose,
}

/// Reports from spawned network tasks back to the actor.
#[derive(Debug)]
pub(crate) enum Settlement<T: ResourceEntity> {
    Fetch {
        ticket: u64,
        result: Result<Vec<T>, ResourceError>,
    },
    Update {
        ticket: u64,
        id: T::Id,
        changes: T::Changes,
        result: Result<UpdateSettlement<T>, ResourceError>,
    },
}
