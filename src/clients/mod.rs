//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod patient_client;
pub mod resource_handle;

pub use patient_client::*;
pub use resource_handle::*;
