//! # Notifier Errors
//!
//! This module defines the error types shared by the notifier and the publishers it drives.
//!
//! Two families exist:
//!
//! - [`PublishError`] is what a [`Publisher`](crate::Publisher) reports back after it tried
//!   (or refused) to hand an update to the hub.
//! - [`NotifierError`] is what the notifier itself surfaces. Only the serialization variants
//!   ever reach the caller; publisher-side variants are logged and swallowed so that a
//!   failed notification never fails the write that triggered it.

/// Errors raised while turning a resource change into a published update.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotifierError {
    /// The publisher could not be resolved or is not usable.
    #[error("Publisher is not configured: {0}")]
    Configuration(String),

    /// The publisher was resolved but failed to dispatch the update.
    #[error("Publish failed: {0}")]
    Publish(String),

    /// The payload could not be converted into the wire format.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// No formatter is registered for the requested format tag.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

impl NotifierError {
    /// Returns `true` for failures that happen on the publisher side of a dispatch.
    ///
    /// These are the failures the notifier logs and swallows.
    pub fn is_publisher_side(&self) -> bool {
        matches!(
            self,
            NotifierError::Configuration(_) | NotifierError::Publish(_)
        )
    }
}

impl From<serde_json::Error> for NotifierError {
    fn from(e: serde_json::Error) -> Self {
        NotifierError::Serialization(e.to_string())
    }
}

/// Errors a [`Publisher`](crate::Publisher) can report for a single update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    /// The publisher is missing credentials, a hub URL or similar settings.
    #[error("Publisher misconfigured: {0}")]
    Configuration(String),

    /// The hub could not be reached.
    #[error("Hub unreachable: {0}")]
    Transport(String),

    /// The hub answered but refused the update.
    #[error("Hub rejected update: {0}")]
    Rejected(String),
}

impl From<PublishError> for NotifierError {
    fn from(e: PublishError) -> Self {
        match e {
            PublishError::Configuration(msg) => NotifierError::Configuration(msg),
            other => NotifierError::Publish(other.to_string()),
        }
    }
}
