//! # DataResource
//!
//! Owning handle with an explicit lifecycle: [`DataResource::create`] spawns the actor,
//! [`DataResource::dispose`] stops it and waits for the task to finish. Nothing is fetched
//! implicitly; the first `refresh` is the caller's decision.

use crate::framework::{
    FrameworkError, Outcome, ResourceActor, ResourceBackend, ResourceClient, ResourceEntity,
    ResourceOptions, ResourceState,
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct DataResource<T: ResourceEntity> {
    client: ResourceClient<T>,
    handle: JoinHandle<()>,
}

impl<T: ResourceEntity> DataResource<T> {
    /// Spawns a resource actor over `backend`. Must be called inside a Tokio runtime.
    pub fn create(backend: impl ResourceBackend<T>, options: ResourceOptions) -> Self {
        Self::create_shared(Arc::new(backend), options)
    }

    /// Like [`create`](Self::create), for a backend that is already shared.
    pub fn create_shared(backend: Arc<dyn ResourceBackend<T>>, options: ResourceOptions) -> Self {
        let (actor, client) = ResourceActor::new(backend, options);
        let handle = tokio::spawn(actor.run());
        Self { client, handle }
    }

    /// A handle that can be cloned into other tasks.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub async fn refresh(&self) -> Result<Outcome, FrameworkError> {
        self.client.refresh().await
    }

    pub async fn update(&self, id: T::Id, changes: T::Changes) -> Result<Outcome, FrameworkError> {
        self.client.update(id, changes).await
    }

    pub fn state(&self) -> ResourceState<T> {
        self.client.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.client.subscribe()
    }

    /// Stops the actor and waits for its task to complete.
    pub async fn dispose(self) -> Result<(), FrameworkError> {
        // The actor may already be gone if every other client was dropped.
        let _ = self.client.dispose().await;
        drop(self.client);
        if let Err(e) = self.handle.await {
            error!("Resource task failed: {:?}", e);
            return Err(FrameworkError::TaskFailed(e.to_string()));
        }
        info!("Resource task finished");
        Ok(())
    }
}
