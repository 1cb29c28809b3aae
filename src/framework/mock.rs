//! # Mock Backend
//!
//! An in-memory [`ResourceBackend`] for testing resources without a server.
//!
//! Queue the calls you expect with [`MockBackend::expect_fetch`] and
//! [`MockBackend::expect_update`], hand a clone of the mock to
//! [`DataResource::create`](crate::framework::DataResource::create), then assert on the
//! resource state and on the recorded calls.
//!
//! ## Holding a call in flight
//!
//! Busy-state tests need a request that has started but not finished. Attach a gate with
//! `.after(receiver)`; the mock waits for the matching sender to fire (or be dropped)
//! before answering.
//!
//! ```rust
//! use patient_resource::framework::mock::MockBackend;
//! use patient_resource::framework::{DataResource, Outcome, ResourceOptions};
//! use patient_resource::model::Patient;
//! use tokio::sync::oneshot;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockBackend::<Patient>::new();
//!     let (release, gate) = oneshot::channel();
//!     mock.expect_fetch().after(gate).return_ok(vec![]);
//!
//!     let resource = DataResource::create(mock.clone(), ResourceOptions::new("patients"));
//!     let client = resource.client();
//!     let first = tokio::spawn(async move { client.refresh().await });
//!
//!     let mut state = resource.subscribe();
//!     state.wait_for(|s| s.is_busy()).await.unwrap();
//!     assert_eq!(resource.refresh().await.unwrap(), Outcome::Skipped);
//!
//!     release.send(()).unwrap();
//!     assert_eq!(first.await.unwrap().unwrap(), Outcome::Applied);
//!     assert_eq!(mock.fetch_calls(), 1);
//!     mock.verify();
//! }
//! ```

use crate::framework::{ResourceBackend, ResourceEntity, ResourceError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

// =============================================================================
// EXPECTATIONS
// =============================================================================

/// An expected backend call and the answer to give.
enum Expectation<T: ResourceEntity> {
    Fetch {
        response: Result<Vec<T>, ResourceError>,
        release: Option<oneshot::Receiver<()>>,
    },
    Update {
        id: T::Id,
        response: Result<(), ResourceError>,
        release: Option<oneshot::Receiver<()>>,
    },
}

impl<T: ResourceEntity> Expectation<T> {
    fn describe(expectation: &Option<Self>) -> String {
        match expectation {
            Some(Expectation::Fetch { .. }) => "fetch_all".to_string(),
            Some(Expectation::Update { id, .. }) => format!("update({id})"),
            None => "nothing".to_string(),
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock backend with expectation tracking and call recording.
pub struct MockBackend<T: ResourceEntity> {
    expectations: Expectations<T>,
    fetch_calls: Arc<AtomicUsize>,
    updates: Arc<Mutex<Vec<(T::Id, T::Changes)>>>,
}

impl<T: ResourceEntity> Clone for MockBackend<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            fetch_calls: self.fetch_calls.clone(),
            updates: self.updates.clone(),
        }
    }
}

impl<T: ResourceEntity> Default for MockBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ResourceEntity> MockBackend<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expects a `fetch_all` call.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder<T> {
        FetchExpectationBuilder {
            release: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            release: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of `fetch_all` calls received so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of `update` calls received so far.
    pub fn update_calls(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    /// Every `(id, changes)` pair submitted through `update`, in call order.
    pub fn submitted_updates(&self) -> Vec<(T::Id, T::Changes)> {
        self.updates.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next_expectation(&self) -> Option<Expectation<T>> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl<T: ResourceEntity> ResourceBackend<T> for MockBackend<T> {
    async fn fetch_all(&self) -> Result<Vec<T>, ResourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.next_expectation() {
            Some(Expectation::Fetch { response, release }) => {
                if let Some(release) = release {
                    let _ = release.await;
                }
                response
            }
            other => panic!(
                "Unexpected fetch_all call, expected {}",
                Expectation::describe(&other)
            ),
        }
    }

    async fn update(&self, id: &T::Id, changes: &T::Changes) -> Result<(), ResourceError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.clone(), changes.clone()));
        match self.next_expectation() {
            Some(Expectation::Update {
                id: expected,
                response,
                release,
            }) => {
                assert_eq!(&expected, id, "update called for the wrong id");
                if let Some(release) = release {
                    let _ = release.await;
                }
                response
            }
            other => panic!(
                "Unexpected update({id}) call, expected {}",
                Expectation::describe(&other)
            ),
        }
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

/// Builder for `fetch_all` expectations.
pub struct FetchExpectationBuilder<T: ResourceEntity> {
    release: Option<oneshot::Receiver<()>>,
    expectations: Expectations<T>,
}

impl<T: ResourceEntity> FetchExpectationBuilder<T> {
    /// Holds the call in flight until `release` fires or its sender is dropped.
    pub fn after(mut self, release: oneshot::Receiver<()>) -> Self {
        self.release = Some(release);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<T>) {
        self.push(Ok(items));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, ResourceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Fetch {
            response,
            release: self.release,
        });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ResourceEntity> {
    id: T::Id,
    release: Option<oneshot::Receiver<()>>,
    expectations: Expectations<T>,
}

impl<T: ResourceEntity> UpdateExpectationBuilder<T> {
    /// Holds the call in flight until `release` fires or its sender is dropped.
    pub fn after(mut self, release: oneshot::Receiver<()>) -> Self {
        self.release = Some(release);
        self
    }

    /// Sets the expectation to accept the update.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), ResourceError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Update {
            id: self.id,
            response,
            release: self.release,
        });
    }
}
