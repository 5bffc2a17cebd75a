//! # Update Envelope
//!
//! The value handed to a [`Publisher`](crate::Publisher) for every dispatch.

use serde::Serialize;

/// An immutable `{topic, data, targets}` envelope.
///
/// Built fresh for each dispatch and consumed by [`Publisher::publish`](crate::Publisher::publish).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Update {
    topic: String,
    data: String,
    targets: Vec<String>,
}

impl Update {
    pub fn new(topic: impl Into<String>, data: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            topic: topic.into(),
            data: data.into(),
            targets,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The serialized payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Audience tags, in the order the resource reported them.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}
