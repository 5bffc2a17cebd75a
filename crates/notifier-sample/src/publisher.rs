//! A publisher that writes updates to the log instead of a hub.

use change_notifier::{PublishError, Publisher, Update};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Logs every update at info level and hands out sequential dispatch ids.
#[derive(Debug, Default)]
pub struct LogPublisher {
    next_id: AtomicU64,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Publisher for LogPublisher {
    fn publish(&self, update: Update) -> Result<String, PublishError> {
        let id = format!("urn:dispatch:{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        info!(
            %id,
            topic = update.topic(),
            targets = ?update.targets(),
            data = update.data(),
            "Update dispatched"
        );
        Ok(id)
    }
}
