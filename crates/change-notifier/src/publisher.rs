//! # Publisher Port
//!
//! The notifier never talks to the hub itself. It hands each [`Update`] to a [`Publisher`],
//! an external capability that owns the transport, retries and authorization.
//!
//! ## Resolution
//!
//! A notifier is bound to a [`PublisherSource`]:
//!
//! - [`PublisherSource::Instance`] holds a publisher directly.
//! - [`PublisherSource::Component`] names a publisher registered in a shared
//!   [`PublisherRegistry`]. The name is looked up at dispatch time, so a publisher can be
//!   registered after the notifier was built. A missing name is a
//!   [`NotifierError::Configuration`].
//!
//! ```rust
//! use change_notifier::{PublishError, PublisherRegistry, PublisherSource, Update};
//! use std::sync::Arc;
//!
//! let registry = PublisherRegistry::new();
//! let source = PublisherSource::component("publisher", registry.clone());
//! assert!(source.resolve().is_err());
//!
//! registry.register(
//!     "publisher",
//!     Arc::new(|update: Update| -> Result<String, PublishError> {
//!         Ok(format!("urn:uuid:{}", update.topic().len()))
//!     }),
//! );
//! assert!(source.resolve().is_ok());
//! ```

use crate::error::{NotifierError, PublishError};
use crate::update::Update;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Name under which a notifier looks up its publisher unless told otherwise.
pub const DEFAULT_COMPONENT: &str = "publisher";

/// Transmits updates to the hub.
///
/// Implementations are called synchronously from the write path. The returned string is
/// the dispatch identifier assigned by the hub.
pub trait Publisher: Send + Sync {
    fn publish(&self, update: Update) -> Result<String, PublishError>;
}

impl<F> Publisher for F
where
    F: Fn(Update) -> Result<String, PublishError> + Send + Sync,
{
    fn publish(&self, update: Update) -> Result<String, PublishError> {
        self(update)
    }
}

/// Shared, name-keyed set of publishers.
///
/// Cloning is cheap; all clones see the same registrations.
#[derive(Clone, Default)]
pub struct PublisherRegistry {
    components: Arc<RwLock<HashMap<String, Arc<dyn Publisher>>>>,
}

impl PublisherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `publisher` under `name`, returning the publisher it replaced.
    pub fn register(
        &self,
        name: impl Into<String>,
        publisher: Arc<dyn Publisher>,
    ) -> Option<Arc<dyn Publisher>> {
        self.components
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), publisher)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn Publisher>> {
        self.components
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Looks up the publisher registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Publisher>, NotifierError> {
        self.components
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| {
                NotifierError::Configuration(format!(
                    "no publisher registered under `{}`",
                    name
                ))
            })
    }
}

impl fmt::Debug for PublisherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = self
            .components
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = components.keys().collect();
        names.sort();
        f.debug_struct("PublisherRegistry")
            .field("components", &names)
            .finish()
    }
}

/// Where a notifier gets its publisher from.
#[derive(Clone)]
pub enum PublisherSource {
    /// A publisher handed over directly.
    Instance(Arc<dyn Publisher>),
    /// A publisher looked up by name on every dispatch.
    Component {
        name: String,
        registry: PublisherRegistry,
    },
}

impl PublisherSource {
    pub fn instance(publisher: impl Publisher + 'static) -> Self {
        PublisherSource::Instance(Arc::new(publisher))
    }

    pub fn component(name: impl Into<String>, registry: PublisherRegistry) -> Self {
        PublisherSource::Component {
            name: name.into(),
            registry,
        }
    }

    pub fn resolve(&self) -> Result<Arc<dyn Publisher>, NotifierError> {
        match self {
            PublisherSource::Instance(publisher) => Ok(Arc::clone(publisher)),
            PublisherSource::Component { name, registry } => registry.resolve(name),
        }
    }
}

impl fmt::Debug for PublisherSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublisherSource::Instance(_) => f.write_str("Instance(..)"),
            PublisherSource::Component { name, .. } => {
                f.debug_struct("Component").field("name", name).finish()
            }
        }
    }
}
