//! # Change Notifier
//!
//! This crate broadcasts record changes to a publish/subscribe hub. A host persistence layer
//! calls the notifier after a successful insert, update or delete; the notifier serializes
//! the record (or a deletion marker), wraps it in an [`Update`] envelope and hands it to a
//! [`Publisher`].
//!
//! ## Design
//!
//! ### Best-Effort Delivery
//!
//! Notification runs inline, right after the write committed. A missing or failing publisher
//! is logged and swallowed: the write already happened and must not be reported as failed
//! because the hub could not hear about it. Serialization failures, on the other hand, are
//! returned, since they point at a broken notifier setup.
//!
//! ### No Invalid Data
//!
//! A resource that reports validation errors ([`Notifiable::has_errors`]) is never published.
//!
//! ### Minimal Deletes
//!
//! Deletions publish `{"@id": <id>}` only.
//!
//! ## Module Tour
//!
//! - [`resource`] - the [`Notifiable`] contract and [`ResourceId`].
//! - [`update`] - the [`Update`] envelope.
//! - [`publisher`] - the [`Publisher`] port, [`PublisherRegistry`] and [`PublisherSource`].
//! - [`format`] - [`Format`] tags and the [`FormatterTable`] strategy table (JSON, XML).
//! - [`notifier`] - [`ChangeNotifier`] itself.
//! - [`lifecycle`] - event-to-handler binding for host persistence hooks.
//! - [`config`] - [`NotifierConfig`].
//! - [`mock`] - [`MockPublisher`](mock::MockPublisher) for tests.
//! - [`tracing`] - subscriber setup.
//!
//! ## Quick Start
//!
//! ```rust
//! use change_notifier::mock::MockPublisher;
//! use change_notifier::{ChangeNotifier, LifecycleEvent, Notifiable, PublisherSource, ResourceId};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Resource { id: u32, one: String, two: String }
//!
//! impl Notifiable for Resource {
//!     fn topic(&self) -> String { format!("https://example.com/resources/{}", self.id) }
//!     fn id(&self) -> ResourceId { self.id.into() }
//!     fn targets(&self) -> Vec<String> { vec!["target1".into(), "target2".into()] }
//!     fn has_errors(&self) -> bool { false }
//! }
//!
//! let publisher = MockPublisher::new();
//! publisher.expect_publish().return_ok("urn:uuid:1");
//! let notifier = ChangeNotifier::new(PublisherSource::instance(publisher.clone()));
//!
//! let resource = Resource { id: 2, one: "c".into(), two: "d".into() };
//! notifier.on_event(LifecycleEvent::AfterDelete, &resource).unwrap();
//!
//! let update = publisher.last_update().unwrap();
//! assert_eq!(update.data(), r#"{"@id":2}"#);
//! assert_eq!(update.targets(), ["target1", "target2"]);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod mock;
pub mod notifier;
pub mod publisher;
pub mod resource;
pub mod tracing;
pub mod update;

pub use config::NotifierConfig;
pub use error::{NotifierError, PublishError};
pub use format::{Format, Formatter, FormatterTable, JsonFormatter, XmlFormatter};
pub use lifecycle::{Handler, LifecycleEvent};
pub use notifier::{ChangeNotifier, Dispatched};
pub use publisher::{Publisher, PublisherRegistry, PublisherSource, DEFAULT_COMPONENT};
pub use resource::{Notifiable, ResourceId};
pub use update::Update;
