//! # Store Task
//!
//! The [`RecordStore`] owns the rows and the notifier. It processes requests sequentially,
//! so neither needs a lock.

use super::{Record, StoreClient, StoreError, StoreRequest};
use change_notifier::{ChangeNotifier, LifecycleEvent};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Server half of the store.
///
/// # Usage Pattern
///
/// 1. **Create**: `RecordStore::new()` returns the store and a [`StoreClient`].
/// 2. **Run**: spawn `store.run()` on the runtime.
/// 3. **Use**: send requests through the client; drop every client to stop the task.
///
/// ```rust
/// use change_notifier::mock::MockPublisher;
/// use change_notifier::{ChangeNotifier, PublisherSource};
/// use notifier_sample::model::{Article, ArticleCreate};
/// use notifier_sample::store::RecordStore;
///
/// #[tokio::main]
/// async fn main() {
///     let publisher = MockPublisher::new();
///     publisher.expect_publish().return_ok("urn:uuid:1");
///     let notifier = ChangeNotifier::new(PublisherSource::instance(publisher.clone()));
///
///     let (store, client) = RecordStore::<Article>::new(8, notifier);
///     tokio::spawn(store.run());
///
///     let params = ArticleCreate {
///         title: "Hello".into(),
///         body: "First post".into(),
///         author: "ann".into(),
///     };
///     let id = client.create(params).await.unwrap();
///     assert_eq!(id, 1);
///     assert_eq!(publisher.last_update().unwrap().topic(), "https://example.com/articles/1");
/// }
/// ```
pub struct RecordStore<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    rows: BTreeMap<u32, T>,
    next_id: u32,
    notifier: ChangeNotifier,
}

impl<T: Record> RecordStore<T> {
    /// Creates the store and its client.
    ///
    /// `buffer_size` bounds the request queue; clients wait when it is full.
    pub fn new(buffer_size: usize, notifier: ChangeNotifier) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            rows: BTreeMap::new(),
            next_id: 1,
            notifier,
        };
        (store, StoreClient::new(sender))
    }

    /// Processes requests until every client is gone.
    pub async fn run(mut self) {
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(record_type, ?params, "Create");
                    let id = self.next_id;
                    let mut record = T::from_create_params(id, params);
                    let result = if record.validate() {
                        self.next_id += 1;
                        self.rows.insert(id, record.clone());
                        info!(record_type, id, size = self.rows.len(), "Created");
                        self.notify(LifecycleEvent::AfterInsert, &record);
                        Ok(id)
                    } else {
                        Err(self.rejected(record_type, &record))
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.rows.get(&id).cloned();
                    debug!(record_type, id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(record_type, id, ?update, "Update");
                    let Some(stored) = self.rows.get(&id) else {
                        warn!(record_type, id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                        continue;
                    };
                    let mut record = stored.clone();
                    record.apply_update(update);
                    let result = if record.validate() {
                        self.rows.insert(id, record.clone());
                        info!(record_type, id, "Updated");
                        self.notify(LifecycleEvent::AfterUpdate, &record);
                        Ok(record)
                    } else {
                        Err(self.rejected(record_type, &record))
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, id, "Delete");
                    match self.rows.remove(&id) {
                        Some(record) => {
                            info!(record_type, id, size = self.rows.len(), "Deleted");
                            self.notify(LifecycleEvent::AfterDelete, &record);
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(record_type, id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(id)));
                        }
                    }
                }
            }
        }

        info!(record_type, size = self.rows.len(), "Shutdown");
    }

    fn rejected(&self, record_type: &str, record: &T) -> StoreError {
        let errors = record.validation_errors();
        warn!(record_type, ?errors, "Validation failed");
        StoreError::Validation(errors)
    }

    /// Fires `event` on the notifier. The write is already committed, so failures are
    /// only logged.
    fn notify(&self, event: LifecycleEvent, record: &T) {
        match self.notifier.on_event(event, record) {
            Ok(Some(dispatched)) => debug!(%event, dispatch_id = %dispatched.id, "Notified"),
            Ok(None) => debug!(%event, "Notification skipped"),
            Err(e) => error!(%event, error = %e, "Notifier failed"),
        }
    }
}
