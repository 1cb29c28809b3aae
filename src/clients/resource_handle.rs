use crate::framework::{FrameworkError, Outcome, ResourceClient, ResourceEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read and refresh operations.
///
/// This trait reduces boilerplate by providing default implementations built on the
/// inner generic [`ResourceClient`].
#[async_trait]
pub trait ResourceHandle<T: ResourceEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Re-read the collection from the backend.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) -> Result<Outcome, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().refresh().await.map_err(Self::map_error)
    }

    /// Current items in server order.
    fn items(&self) -> Vec<T> {
        self.inner().state().items().to_vec()
    }

    /// Current copy of one item, if the mirror holds it.
    fn find(&self, id: &T::Id) -> Option<T> {
        self.inner().state().find(id).cloned()
    }

    /// Message from the last failed operation.
    fn error(&self) -> Option<String> {
        self.inner().state().error().map(str::to_string)
    }

    fn is_busy(&self) -> bool {
        self.inner().state().is_busy()
    }
}
