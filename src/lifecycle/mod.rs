//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`PatientSystem`] - Creates the resources from configuration, performs the initial load,
//!   and disposes them on shutdown
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod patient_system;
pub mod tracing;

pub use patient_system::*;
pub use self::tracing::setup_tracing;
