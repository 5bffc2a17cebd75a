use super::{Record, Response, StoreError, StoreRequest};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

/// Cloneable handle for sending requests to a [`RecordStore`](super::RecordStore).
///
/// The store task stops once every client has been dropped.
pub struct StoreClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// `true` once the store task has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Inserts a record and returns its id.
    ///
    /// The insert notification has been handed to the publisher by the time this returns.
    #[instrument(skip_all)]
    pub async fn create(&self, params: T::Create) -> Result<u32, StoreError> {
        self.call("create", |respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: u32) -> Result<Option<T>, StoreError> {
        self.call("get", |respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    /// Applies `update` and returns the stored record.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: u32, update: T::Update) -> Result<T, StoreError> {
        self.call("update", |respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.call("delete", |respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    /// Sends the request built by `request` and waits for the store's reply.
    async fn call<R>(
        &self,
        op: &'static str,
        request: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, reply) = oneshot::channel();
        if self.sender.send(request(respond_to)).await.is_err() {
            warn!(op, "Store is closed");
            return Err(StoreError::StoreClosed);
        }
        debug!(op, "Request queued");
        reply.await.map_err(|_| StoreError::StoreDropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Article, ArticleCreate};

    #[tokio::test]
    async fn closed_store_rejects_requests() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let client = StoreClient::<Article>::new(sender);

        assert!(client.is_closed());
        assert_eq!(client.get(1).await, Err(StoreError::StoreClosed));
        let params = ArticleCreate {
            title: "t".into(),
            body: "b".into(),
            author: "a".into(),
        };
        assert_eq!(client.create(params).await, Err(StoreError::StoreClosed));
    }

    #[tokio::test]
    async fn dropped_reply_is_reported() {
        let (sender, mut receiver) = mpsc::channel(1);
        let client = StoreClient::<Article>::new(sender);
        // Accept the request, then drop it without answering.
        tokio::spawn(async move { drop(receiver.recv().await) });

        assert_eq!(client.delete(3).await, Err(StoreError::StoreDropped));
    }
}
