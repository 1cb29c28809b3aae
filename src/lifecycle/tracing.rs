//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log lines use a compact format without the crate/module prefix (`with_target(false)`);
//! every resource event carries a `resource` field instead.
//!
//! - **Structured logging** with `tracing` crate
//! - **Configurable log levels** via `RUST_LOG` environment variable
//!
//! ## What Gets Traced
//!
//! - **Resource Lifecycle**: start (with busy policy and update strategy) and disposal
//! - **Operations**: refresh and update start (`debug`), settlement (`info`), failures and
//!   dropped calls (`warn`)
//! - **HTTP**: request URLs and update payloads at `debug`, error statuses at `warn`
//! - **Dashboard**: loads and failed patient actions
//!
//! ## Usage Examples
//!
//! ```bash
//! # Settled operations only
//! RUST_LOG=info cargo run
//!
//! # Show URLs and payloads
//! RUST_LOG=debug cargo run
//!
//! # Filter to the resource framework
//! RUST_LOG=patient_resource::framework=debug cargo run
//! ```
//!
//! ## Example Output
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Resource started resource="patients" busy_policy=DropIfBusy update_strategy=Refetch
//! INFO Loading patient data backend="http://localhost:5000"
//! INFO Refreshed resource="patients" ticket=0 items=3
//! INFO load: Dashboard loaded visits=2 medications=1 appointments=1
//! ```
//!
//! **With `RUST_LOG=debug`**, an update shows the whole busy span:
//!
//! ```text
//! DEBUG Update resource="patients" ticket=1 id=1 changes=PatientChanges { name: None, age: None, condition: Some("critical") }
//! DEBUG PUT item url=http://localhost:5000/patients/1 changes=...
//! DEBUG GET collection url=http://localhost:5000/patients
//! INFO Updated resource="patients" ticket=1 id=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Resource events carry their own `resource` field
        .compact() // Compact format shows spans inline (e.g., "load:")
        .init();
}
