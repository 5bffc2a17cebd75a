//! # Change Notifier
//!
//! The [`ChangeNotifier`] turns a successful write into an [`Update`] for the hub.
//!
//! ## Dispatch Rules
//!
//! 1. A resource that reports validation errors is never published. The call returns
//!    `Ok(None)` and the publisher is not touched.
//! 2. Inserts and updates publish the full serialized resource.
//! 3. Deletes publish only `{"@id": <id>}`, since the record may no longer be loadable.
//! 4. Publisher failures (missing component, misconfiguration, transport) are logged at
//!    error level and turned into `Ok(None)`. Notification is best effort and must never
//!    fail the write that triggered it.
//! 5. Serialization failures are returned to the caller: they mean the notifier itself is
//!    unusable.
//!
//! ## Formatter Memoization
//!
//! The formatter for the notifier's [`Format`] is looked up in its [`FormatterTable`] on the
//! first dispatch and kept for the lifetime of the instance. The cell is not `Sync`, so a
//! notifier is owned by one thread or task at a time.

use crate::config::NotifierConfig;
use crate::error::NotifierError;
use crate::format::{Format, Formatter, FormatterTable};
use crate::publisher::{PublisherRegistry, PublisherSource};
use crate::resource::{Notifiable, ResourceId};
use crate::update::Update;
use serde::Serialize;
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Outcome of a notification that reached the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Dispatch identifier returned by the publisher.
    pub id: String,
    /// The serialized body that was sent.
    pub data: String,
}

/// Payload published on delete.
#[derive(Serialize)]
struct DeletionMarker {
    #[serde(rename = "@id")]
    id: ResourceId,
}

/// Publishes resource changes through a [`Publisher`](crate::Publisher).
///
/// # Example
///
/// ```rust
/// use change_notifier::mock::MockPublisher;
/// use change_notifier::{ChangeNotifier, Notifiable, PublisherSource, ResourceId};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Resource { id: u32, one: String, two: String }
///
/// impl Notifiable for Resource {
///     fn topic(&self) -> String { format!("https://example.com/resources/{}", self.id) }
///     fn id(&self) -> ResourceId { self.id.into() }
///     fn targets(&self) -> Vec<String> { vec!["target1".into(), "target2".into()] }
///     fn has_errors(&self) -> bool { false }
/// }
///
/// let publisher = MockPublisher::new();
/// publisher.expect_publish().return_ok("urn:uuid:1");
///
/// let notifier = ChangeNotifier::new(PublisherSource::instance(publisher.clone()));
/// let resource = Resource { id: 2, one: "c".into(), two: "d".into() };
///
/// let dispatched = notifier.notify_change(&resource).unwrap().unwrap();
/// assert_eq!(dispatched.data, r#"{"id":2,"one":"c","two":"d"}"#);
/// assert_eq!(publisher.last_update().unwrap().topic(), "https://example.com/resources/2");
/// publisher.verify();
/// ```
pub struct ChangeNotifier {
    publisher: PublisherSource,
    format: Format,
    formatters: FormatterTable,
    response: OnceCell<Arc<dyn Formatter>>,
}

impl ChangeNotifier {
    /// A JSON notifier with the default formatter table.
    pub fn new(publisher: PublisherSource) -> Self {
        Self {
            publisher,
            format: Format::default(),
            formatters: FormatterTable::default(),
            response: OnceCell::new(),
        }
    }

    /// Builds a notifier bound to the component named in `config`.
    pub fn from_config(config: &NotifierConfig, registry: PublisherRegistry) -> Self {
        Self::new(PublisherSource::component(config.publisher.clone(), registry))
            .with_formatters(config.formatters())
            .with_format(config.format.clone())
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self.response = OnceCell::new();
        self
    }

    pub fn with_formatters(mut self, formatters: FormatterTable) -> Self {
        self.formatters = formatters;
        self.response = OnceCell::new();
        self
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The formatter used for update data, resolved on first use.
    pub fn response(&self) -> Result<&Arc<dyn Formatter>, NotifierError> {
        if let Some(formatter) = self.response.get() {
            return Ok(formatter);
        }
        let formatter = self.formatters.get(&self.format)?;
        Ok(self.response.get_or_init(|| formatter))
    }

    /// Replaces the memoized formatter.
    pub fn set_response(&mut self, formatter: impl Formatter + 'static) {
        let formatter: Arc<dyn Formatter> = Arc::new(formatter);
        self.response = OnceCell::from(formatter);
    }

    /// Renders `payload` with the active formatter.
    pub fn serialize<P>(&self, payload: &P) -> Result<String, NotifierError>
    where
        P: Serialize + ?Sized,
    {
        let formatter = self.response()?;
        let value = serde_json::to_value(payload)?;
        formatter.format(&value)
    }

    /// Publishes the full resource after an insert or update.
    pub fn notify_change<R>(&self, resource: &R) -> Result<Option<Dispatched>, NotifierError>
    where
        R: Notifiable + ?Sized,
    {
        if resource.has_errors() {
            return Ok(None);
        }
        let data = self.serialize(resource)?;
        Ok(self.dispatch(resource, data))
    }

    /// Publishes a deletion marker carrying only the resource id.
    pub fn notify_delete<R>(&self, resource: &R) -> Result<Option<Dispatched>, NotifierError>
    where
        R: Notifiable + ?Sized,
    {
        if resource.has_errors() {
            return Ok(None);
        }
        let data = self.serialize(&DeletionMarker { id: resource.id() })?;
        Ok(self.dispatch(resource, data))
    }

    fn dispatch<R>(&self, resource: &R, data: String) -> Option<Dispatched>
    where
        R: Notifiable + ?Sized,
    {
        let topic = resource.topic();

        let publisher = match self.publisher.resolve() {
            Ok(publisher) => publisher,
            Err(e) => {
                error!(%topic, error = %e, "Publisher unavailable, update dropped");
                return None;
            }
        };

        let update = Update::new(topic.clone(), data.clone(), resource.targets());
        match publisher.publish(update) {
            Ok(id) => {
                debug!(%topic, %id, format = %self.format, "Update published");
                Some(Dispatched { id, data })
            }
            Err(e) => {
                let e = NotifierError::from(e);
                error!(%topic, error = %e, "Publish failed, update dropped");
                None
            }
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("publisher", &self.publisher)
            .field("format", &self.format)
            .field("formatters", &self.formatters)
            .field("response_ready", &self.response.get().is_some())
            .finish()
    }
}
