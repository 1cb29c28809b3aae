//! Generic resource framework.
//!
//! This module provides the building blocks for mirroring a server-held collection on the
//! client: a state bundle with pure transitions, an actor that drives those transitions
//! from network calls, and a cloneable client handle.
//!
//! # Main Components
//!
//! - [`ResourceEntity`] - Trait that item types implement to be mirrored
//! - [`ResourceState`] - The `{items, error, busy}` bundle and its transitions
//! - [`ResourceActor`] - The message loop that owns one state bundle
//! - [`ResourceClient`] - Type-safe handle for talking to the actor
//! - [`DataResource`] - Owning handle with `create` / `dispose` lifecycle
//! - [`ResourceBackend`] - The network seam, implemented by [`HttpBackend`]
//! - [`FrameworkError`], [`ResourceError`] - Handle errors and backend failures
//!
//! # Testing
//!
//! See [`mock`] module for a backend that answers from queued expectations.

pub mod actor;
pub mod backend;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod resource;
pub mod state;

// Re-export core types for convenience
pub use actor::{ResourceActor, ResourceOptions};
pub use backend::{build_http_client, HttpBackend, HttpTimeouts, ResourceBackend};
pub use client::ResourceClient;
pub use entity::ResourceEntity;
pub use error::{FrameworkError, ResourceError, GENERIC_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
pub use message::{Outcome, ResourceRequest, Response};
pub use resource::DataResource;
pub use state::{BusyPolicy, ResourceState, UpdateSettlement, UpdateStrategy};
