#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Patient Resource
//!
//! > **A client-side mirror of server-held collections, built on Tokio actors.**
//!
//! This crate keeps a patient-facing client in sync with a REST backend. Each collection
//! (patients, for example) is mirrored by one resource actor that owns three pieces of
//! state, the last-fetched items, an optional error message and a busy flag, and exposes
//! two operations: `refresh()` and `update(id, changes)`.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Failures are state
//! A failed call never reaches the caller as an `Err`. The message is stored in the
//! resource state and the caller gets an [`Outcome`](framework::Outcome) telling it which
//! terminal transition happened. Views render `error` the same way they render `items`.
//!
//! ### One explicit state machine
//! `Idle → Busy → {Idle-with-fresh-data, Idle-with-error}`. The transitions are pure
//! functions on [`ResourceState`](framework::ResourceState); the actor only decides *when*
//! to call them.
//!
//! ### Explicit policies
//! - [`BusyPolicy`](framework::BusyPolicy): `DropIfBusy` (default) makes a call issued
//!   while another is in flight a no-op. `AlwaysIssue` lets calls race; the last one to
//!   complete wins.
//! - [`UpdateStrategy`](framework::UpdateStrategy): `Refetch` (default) re-reads the
//!   collection after a successful update. `Optimistic` merges the submitted changes locally.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! You'll see `ResourceActor<T: ResourceEntity>` everywhere. Any record with a stable `id`
//! and a change payload can be mirrored; [`Patient`](model::Patient) is the instantiation
//! this crate ships.
//!
//! ### Mocking: Testing without a Server
//! [`MockBackend`](framework::mock::MockBackend) answers from queued expectations, counts
//! calls, and can hold a call in flight to observe the busy state.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! State, transitions, the actor shell, the client handle and the HTTP backend.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Builds everything from [`config::Config`], performs the initial load, shuts down.
//!
//! ### 3. The Interface ([`clients`])
//! Domain-specific wrappers such as [`PatientClient`](clients::PatientClient).
//!
//! ### 4. The Implementation ([`patient_resource`], [`dashboard`])
//! The patient entity and the dashboard (visits, medications, appointments).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! PATIENT_BACKEND_URL=http://localhost:5000 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod dashboard;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod patient_resource;
