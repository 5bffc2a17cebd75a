//! # System Lifecycle & Wiring
//!
//! [`ArticleSystem`] builds the notifier from a [`NotifierConfig`], hands it to a
//! [`RecordStore`] and spawns the store task.
//!
//! ## Publisher Binding
//!
//! The notifier is bound to a named component in a [`PublisherRegistry`]. The registry is
//! shared with the caller, so the publisher can be registered before or after the system
//! starts; until it is, writes succeed and their updates are dropped with an error log.
//!
//! ```rust,ignore
//! let registry = PublisherRegistry::new();
//! registry.register("publisher", Arc::new(LogPublisher::new()));
//!
//! let system = ArticleSystem::new(&NotifierConfig::default(), registry);
//! let id = system.articles.create(params).await?;
//! system.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the channel.
//! 2. **Store drains** - `recv()` returns `None` once queued requests are processed.
//! 3. **Await the task**.

use crate::model::Article;
use crate::store::{RecordStore, StoreClient};
use change_notifier::{ChangeNotifier, NotifierConfig, PublisherRegistry};
use tokio::task::JoinHandle;
use tracing::{error, info};

const STORE_BUFFER: usize = 32;

/// The running sample application.
pub struct ArticleSystem {
    /// Client for the article store.
    pub articles: StoreClient<Article>,

    handle: JoinHandle<()>,
}

impl ArticleSystem {
    /// Starts the article store with a notifier built from `config`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(config: &NotifierConfig, registry: PublisherRegistry) -> Self {
        let notifier = ChangeNotifier::from_config(config, registry);
        info!(publisher = %config.publisher, format = %config.format, "Starting article store");

        let (store, articles) = RecordStore::<Article>::new(STORE_BUFFER, notifier);
        let handle = tokio::spawn(store.run());

        Self { articles, handle }
    }

    /// Stops the store and waits for it to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down article system");
        drop(self.articles);

        self.handle.await.map_err(|e| {
            error!(error = %e, "Article store task failed");
            e.to_string()
        })?;

        info!("Article system shutdown complete");
        Ok(())
    }
}
