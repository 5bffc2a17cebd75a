//! Messages exchanged between [`StoreClient`](super::StoreClient) and
//! [`RecordStore`](super::RecordStore).

use super::{Record, StoreError};
use tokio::sync::oneshot;

/// One-shot channel carrying a store reply.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<u32>,
    },
    Get {
        id: u32,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: u32,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: u32,
        respond_to: Response<()>,
    },
}
