//! # Backend Seam
//!
//! [`ResourceBackend`] is the only thing the actor knows about the network. Production code
//! uses [`HttpBackend`]; tests use [`MockBackend`](crate::framework::mock::MockBackend).

use crate::framework::{ResourceEntity, ResourceError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

/// The two calls a `DataResource` makes against its collection.
#[async_trait]
pub trait ResourceBackend<T: ResourceEntity>: Send + Sync + 'static {
    /// Read the full collection.
    async fn fetch_all(&self) -> Result<Vec<T>, ResourceError>;

    /// Submit a partial update for one item. The response body is ignored.
    async fn update(&self, id: &T::Id, changes: &T::Changes) -> Result<(), ResourceError>;
}

/// Timeouts applied to every request made by an HTTP backend.
///
/// `None` means no deadline, which matches the behavior of a plain browser fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request: Option<Duration>,
    pub connect: Option<Duration>,
}

/// Builds the shared `reqwest` client for a set of timeouts.
pub fn build_http_client(timeouts: HttpTimeouts) -> Result<Client, ResourceError> {
    let mut builder = Client::builder();
    if let Some(request) = timeouts.request {
        builder = builder.timeout(request);
    }
    if let Some(connect) = timeouts.connect {
        builder = builder.connect_timeout(connect);
    }
    builder
        .build()
        .map_err(|e| ResourceError::Transport(format!("Failed to build HTTP client: {e}")))
}

/// REST backend: `GET {base}/{collection}` and `PUT {base}/{collection}/{id}`.
pub struct HttpBackend<T> {
    client: Client,
    collection_url: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpBackend<T> {
    pub fn new(client: Client, base_url: &str, collection_path: &str) -> Self {
        let collection_url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            collection_path.trim_matches('/')
        );
        Self {
            client,
            collection_url,
            _marker: PhantomData,
        }
    }

    /// URL of the whole collection.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// URL of a single item. The id is percent-encoded as one path segment.
    pub fn item_url(&self, id: &impl std::fmt::Display) -> String {
        format!("{}/{}", self.collection_url, urlencoding::encode(&id.to_string()))
    }
}

#[async_trait]
impl<T: ResourceEntity> ResourceBackend<T> for HttpBackend<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, ResourceError> {
        debug!(url = %self.collection_url, "GET collection");
        let response = self
            .client
            .get(&self.collection_url)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn update(&self, id: &T::Id, changes: &T::Changes) -> Result<(), ResourceError> {
        let url = self.item_url(id);
        debug!(%url, ?changes, "PUT item");
        let response = self
            .client
            .put(&url)
            .json(changes)
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await.map(|_| ())
    }
}

/// Body shape backends use to explain a failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub(crate) fn transport_error(e: reqwest::Error) -> ResourceError {
    if e.is_timeout() {
        ResourceError::Transport(format!("Request timed out: {e}"))
    } else {
        ResourceError::Transport(e.to_string())
    }
}

/// Turns a non-2xx response into `ResourceError::Api`, keeping the server's message.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ResourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);
    warn!(status = status.as_u16(), ?message, "Backend returned an error status");
    Err(ResourceError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Decodes a successful JSON body. A malformed body is reported as an API error
/// without a server message.
pub(crate) async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ResourceError> {
    let response = ensure_success(response).await?;
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| malformed_body(status, e))
}

fn malformed_body(status: StatusCode, e: serde_json::Error) -> ResourceError {
    warn!(status = status.as_u16(), error = %e, "Malformed response body");
    ResourceError::Api {
        status: status.as_u16(),
        message: None,
    }
}
