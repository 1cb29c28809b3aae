//! # ResourceClient
//!
//! A cheap, cloneable handle to a [`ResourceActor`](crate::framework::ResourceActor).
//! Operations go through the request channel; state reads come from a `watch` channel the
//! actor publishes to after every transition.

use crate::framework::{FrameworkError, Outcome, ResourceEntity, ResourceRequest, ResourceState};
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for interacting with a `ResourceActor`.
#[derive(Clone)]
pub struct ResourceClient<T: ResourceEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    state: watch::Receiver<ResourceState<T>>,
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        state: watch::Receiver<ResourceState<T>>,
    ) -> Self {
        Self { sender, state }
    }

    /// Re-reads the whole collection. Resolves once the call has settled or been skipped.
    pub async fn refresh(&self) -> Result<Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Refresh { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Submits a partial update for one item. Resolves once the call has settled or been skipped.
    pub async fn update(&self, id: T::Id, changes: T::Changes) -> Result<Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                changes,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Asks the actor to stop. Pending and later calls on any clone fail with `ActorClosed`
    /// or `ActorDropped`.
    pub async fn dispose(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Dispose)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// The most recently published state.
    pub fn state(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.clone()
    }
}
