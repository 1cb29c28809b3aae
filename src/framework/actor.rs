//! # ResourceActor
//!
//! The message-passing shell around [`ResourceState`]. It owns the state, starts network
//! calls on behalf of clients, and applies the pure transitions when those calls settle.

use crate::framework::message::Settlement;
use crate::framework::{
    BusyPolicy, Outcome, ResourceBackend, ResourceClient, ResourceEntity, ResourceError,
    ResourceRequest, ResourceState, Response, UpdateSettlement, UpdateStrategy,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Per-resource settings, fixed at creation time.
#[derive(Debug, Clone)]
pub struct ResourceOptions {
    /// Name used in log events, usually the collection path.
    pub name: String,
    /// Capacity of the request channel.
    pub buffer_size: usize,
    pub busy_policy: BusyPolicy,
    pub update_strategy: UpdateStrategy,
}

impl ResourceOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_busy_policy(mut self, busy_policy: BusyPolicy) -> Self {
        self.busy_policy = busy_policy;
        self
    }

    pub fn with_update_strategy(mut self, update_strategy: UpdateStrategy) -> Self {
        self.update_strategy = update_strategy;
        self
    }
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            name: "resource".to_string(),
            buffer_size: 32,
            busy_policy: BusyPolicy::default(),
            update_strategy: UpdateStrategy::default(),
        }
    }
}

/// The actor that mirrors one backend collection.
///
/// # Architecture Note
/// This struct is the "Server" half of the resource. It owns the state and the receiver end
/// of the request channel, so the state never needs a `Mutex`.
///
/// Network calls do not run inside the message loop. Each one is spawned as its own task
/// and reports back through a settlement channel, which keeps the loop free to answer
/// (or drop) further requests while I/O is outstanding. Settlements are applied in the
/// order they arrive, i.e. I/O completion order.
pub struct ResourceActor<T: ResourceEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    settlements: mpsc::UnboundedReceiver<Settlement<T>>,
    settlement_sender: mpsc::UnboundedSender<Settlement<T>>,
    publisher: watch::Sender<ResourceState<T>>,
    state: ResourceState<T>,
    backend: Arc<dyn ResourceBackend<T>>,
    options: ResourceOptions,
    pending: HashMap<u64, Response<Outcome>>,
    next_ticket: u64,
}

impl<T: ResourceEntity> ResourceActor<T> {
    pub fn new(
        backend: Arc<dyn ResourceBackend<T>>,
        options: ResourceOptions,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(options.buffer_size.max(1));
        let (settlement_sender, settlements) = mpsc::unbounded_channel();
        let state = ResourceState::new();
        let (publisher, observer) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            settlements,
            settlement_sender,
            publisher,
            state,
            backend,
            options,
            pending: HashMap::new(),
            next_ticket: 0,
        };
        let client = ResourceClient::new(sender, observer);
        (actor, client)
    }

    /// Runs the actor's event loop until it is disposed or every client is dropped.
    ///
    /// Calls still in flight at that point are abandoned; their settlements are discarded.
    pub async fn run(mut self) {
        let resource = self.options.name.clone();
        info!(
            %resource,
            busy_policy = ?self.options.busy_policy,
            update_strategy = ?self.options.update_strategy,
            "Resource started"
        );

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(ResourceRequest::Refresh { respond_to }) => self.start_refresh(respond_to),
                    Some(ResourceRequest::Update { id, changes, respond_to }) => {
                        self.start_update(id, changes, respond_to)
                    }
                    Some(ResourceRequest::Dispose) | None => break,
                },
                Some(settlement) = self.settlements.recv() => self.apply(settlement),
            }
        }

        info!(
            %resource,
            items = self.state.items().len(),
            abandoned = self.pending.len(),
            "Resource disposed"
        );
    }

    fn start_refresh(&mut self, respond_to: Response<Outcome>) {
        let resource = self.options.name.clone();
        if !self.state.begin(self.options.busy_policy) {
            warn!(%resource, "Busy, refresh dropped");
            let _ = respond_to.send(Outcome::Skipped);
            return;
        }
        self.publish();
        let ticket = self.register(respond_to);
        debug!(%resource, ticket, "Refresh");

        let backend = self.backend.clone();
        let settlements = self.settlement_sender.clone();
        tokio::spawn(async move {
            let result = supervise(async move { backend.fetch_all().await }).await;
            let _ = settlements.send(Settlement::Fetch { ticket, result });
        });
    }

    fn start_update(&mut self, id: T::Id, changes: T::Changes, respond_to: Response<Outcome>) {
        let resource = self.options.name.clone();
        if !self.state.begin(self.options.busy_policy) {
            warn!(%resource, %id, "Busy, update dropped");
            let _ = respond_to.send(Outcome::Skipped);
            return;
        }
        self.publish();
        let ticket = self.register(respond_to);
        debug!(%resource, ticket, %id, ?changes, "Update");

        let backend = self.backend.clone();
        let settlements = self.settlement_sender.clone();
        let strategy = self.options.update_strategy;
        let (target, submitted) = (id.clone(), changes.clone());
        tokio::spawn(async move {
            let result = supervise(async move {
                backend.update(&target, &submitted).await?;
                match strategy {
                    UpdateStrategy::Refetch => {
                        backend.fetch_all().await.map(UpdateSettlement::Refetched)
                    }
                    UpdateStrategy::Optimistic => Ok(UpdateSettlement::Accepted),
                }
            })
            .await;
            let _ = settlements.send(Settlement::Update {
                ticket,
                id,
                changes,
                result,
            });
        });
    }

    fn apply(&mut self, settlement: Settlement<T>) {
        let resource = self.options.name.clone();
        match settlement {
            Settlement::Fetch { ticket, result } => {
                let succeeded = match &result {
                    Ok(items) => {
                        info!(%resource, ticket, items = items.len(), "Refreshed");
                        true
                    }
                    Err(e) => {
                        warn!(%resource, ticket, error = %e, "Refresh failed");
                        false
                    }
                };
                self.state.on_fetch_settled(result);
                self.finish(ticket, succeeded);
            }
            Settlement::Update {
                ticket,
                id,
                changes,
                result,
            } => {
                let succeeded = match &result {
                    Ok(_) => {
                        info!(%resource, ticket, %id, "Updated");
                        true
                    }
                    Err(e) => {
                        warn!(%resource, ticket, %id, error = %e, "Update failed");
                        false
                    }
                };
                self.state.on_update_settled(&id, &changes, result);
                self.finish(ticket, succeeded);
            }
        }
    }

    fn register(&mut self, respond_to: Response<Outcome>) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.insert(ticket, respond_to);
        ticket
    }

    /// Publishes the settled state before answering, so a caller that awaited the
    /// outcome always reads the post-settlement state.
    fn finish(&mut self, ticket: u64, succeeded: bool) {
        self.publish();
        if let Some(respond_to) = self.pending.remove(&ticket) {
            let outcome = if succeeded { Outcome::Applied } else { Outcome::Failed };
            let _ = respond_to.send(outcome);
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

/// Runs a network call in its own task so that a panic inside the backend still settles
/// the operation instead of leaving the resource busy forever.
async fn supervise<R, F>(work: F) -> Result<R, ResourceError>
where
    R: Send + 'static,
    F: Future<Output = Result<R, ResourceError>> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(result) => result,
        Err(e) => Err(ResourceError::Unexpected(e.to_string())),
    }
}
