//! # Notifier Sample
//!
//! Runs an article store wired to the change notifier and logs every update it would send
//! to the hub.
//!
//! ```bash
//! RUST_LOG=info cargo run -p notifier-sample
//! NOTIFIER_CONFIG='{"format":"xml"}' RUST_LOG=debug cargo run -p notifier-sample
//! ```

use change_notifier::tracing::setup_tracing;
use change_notifier::{NotifierConfig, PublisherRegistry};
use notifier_sample::lifecycle::ArticleSystem;
use notifier_sample::model::{ArticleCreate, ArticleUpdate};
use notifier_sample::publisher::LogPublisher;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var("NOTIFIER_CONFIG") {
        Ok(raw) => NotifierConfig::from_json(&raw).map_err(|e| e.to_string())?,
        Err(_) => NotifierConfig::default(),
    };

    let registry = PublisherRegistry::new();
    registry.register(config.publisher.clone(), Arc::new(LogPublisher::new()));

    let system = ArticleSystem::new(&config, registry);

    let span = tracing::info_span!("article_lifecycle");
    async {
        let id = system
            .articles
            .create(ArticleCreate {
                title: "Hello hub".to_string(),
                body: "First post".to_string(),
                author: "ann".to_string(),
            })
            .await
            .map_err(|e| e.to_string())?;
        info!(id, "Article created");

        system
            .articles
            .update(
                id,
                ArticleUpdate {
                    title: Some("Hello again".to_string()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(id, "Article updated");

        // Rejected by validation: stored nothing, published nothing.
        if let Err(e) = system
            .articles
            .update(
                id,
                ArticleUpdate {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
        {
            warn!(id, error = %e, "Update rejected");
        }

        system
            .articles
            .delete(id)
            .await
            .map_err(|e| e.to_string())?;
        info!(id, "Article deleted");
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Sample completed successfully");
    Ok(())
}
