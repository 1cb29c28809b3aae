//! # Resource State
//!
//! The owned `{items, error, busy}` bundle and the pure transitions that move it through
//! `Idle → Busy → {Idle-with-fresh-data, Idle-with-error}`.
//!
//! Nothing in this module performs I/O. The [`ResourceActor`](crate::framework::ResourceActor)
//! calls [`ResourceState::begin`] when an operation starts and one of the `on_*_settled`
//! transitions when the network call completes.

use crate::framework::{ResourceEntity, ResourceError};

/// What to do when `refresh` or `update` is called while another call is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BusyPolicy {
    /// The call is a no-op and no request is issued.
    #[default]
    DropIfBusy,
    /// The call is always issued. Results apply in completion order, last one wins.
    AlwaysIssue,
}

/// How a successful `update` is reflected in the local items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Re-read the whole collection after the PUT, inside the same busy span.
    #[default]
    Refetch,
    /// Splice the submitted changes into the matching item without a second round trip.
    Optimistic,
}

/// The successful result of an update call, as reported by the network task.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSettlement<T> {
    /// The backend accepted the change and the collection was re-read.
    Refetched(Vec<T>),
    /// The backend accepted the change; nothing was re-read.
    Accepted,
}

/// Client-side mirror of a server-held collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    items: Vec<T>,
    error: Option<String>,
    in_flight: usize,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            in_flight: 0,
        }
    }
}

impl<T: ResourceEntity> ResourceState<T> {
    /// An empty, idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in server response order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The message from the last failed operation, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while at least one network operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Looks up an item by identifier.
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Idle → Busy. Returns `false` (and leaves the state untouched) when the policy
    /// refuses to start another operation.
    ///
    /// The previous error is kept until the operation settles.
    pub fn begin(&mut self, policy: BusyPolicy) -> bool {
        if policy == BusyPolicy::DropIfBusy && self.is_busy() {
            return false;
        }
        self.in_flight += 1;
        true
    }

    /// Busy → Idle after a collection read.
    ///
    /// Success replaces the items verbatim and clears the error. Failure keeps the items
    /// and records the error message.
    pub fn on_fetch_settled(&mut self, result: Result<Vec<T>, ResourceError>) {
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => self.error = Some(e.user_message()),
        }
        self.settle();
    }

    /// Busy → Idle after a partial update.
    ///
    /// A refetched collection replaces the items. An accepted change is merged into the
    /// item whose id matches; an unknown id changes nothing. Failure keeps the items.
    pub fn on_update_settled(
        &mut self,
        id: &T::Id,
        changes: &T::Changes,
        result: Result<UpdateSettlement<T>, ResourceError>,
    ) {
        match result {
            Ok(UpdateSettlement::Refetched(items)) => {
                self.items = items;
                self.error = None;
            }
            Ok(UpdateSettlement::Accepted) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
                    item.apply_changes(changes);
                }
                self.error = None;
            }
            Err(e) => self.error = Some(e.user_message()),
        }
        self.settle();
    }

    fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
