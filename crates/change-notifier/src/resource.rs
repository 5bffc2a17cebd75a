//! # Notifiable Resources
//!
//! The [`Notifiable`] trait is the contract a domain entity implements to have its changes
//! broadcast. It is deliberately small: the notifier only needs to know *where* to publish
//! (topic and targets), *whether* the record is fit to publish (validation state), and *what*
//! the record looks like (its `serde::Serialize` impl).

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::TryFromIntError;

/// Identifier of a resource, as it appears in deletion markers.
///
/// Serialized untagged, so an integer id stays a JSON number and a string id stays a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(id.into())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Int(id.into())
    }
}

/// Unsigned 64-bit ids above `i64::MAX` are rejected rather than wrapped.
impl TryFrom<u64> for ResourceId {
    type Error = TryFromIntError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Ok(ResourceId::Int(i64::try_from(id)?))
    }
}

impl TryFrom<usize> for ResourceId {
    type Error = TryFromIntError;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        Ok(ResourceId::Int(i64::try_from(id)?))
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{}", id),
            ResourceId::Str(id) => f.write_str(id),
        }
    }
}

/// A resource whose changes can be published to the hub.
///
/// The serialized form of the resource (its `Serialize` impl) is the field mapping sent
/// on insert and update.
///
/// # Example
///
/// ```rust
/// use change_notifier::{Notifiable, ResourceId};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Article {
///     id: u32,
///     title: String,
/// }
///
/// impl Notifiable for Article {
///     fn topic(&self) -> String {
///         format!("https://example.com/articles/{}", self.id)
///     }
///
///     fn id(&self) -> ResourceId {
///         self.id.into()
///     }
///
///     fn targets(&self) -> Vec<String> {
///         vec!["*".to_string()]
///     }
///
///     fn has_errors(&self) -> bool {
///         self.title.is_empty()
///     }
/// }
/// ```
pub trait Notifiable: Serialize {
    /// IRI identifying the stream subscribers watch for this resource.
    ///
    /// Usually the canonical URL of the resource, but any IRI will do.
    fn topic(&self) -> String;

    /// Identifier that uniquely names the resource.
    fn id(&self) -> ResourceId;

    /// Audience tags for the update. Use `["*"]` for public updates.
    fn targets(&self) -> Vec<String>;

    /// Whether the resource currently carries validation errors.
    ///
    /// Updates are never published for a resource that reports errors.
    fn has_errors(&self) -> bool;
}
