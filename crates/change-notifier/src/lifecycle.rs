//! # Lifecycle Hook Binding
//!
//! The notifier does not subscribe to anything on its own. The host persistence layer
//! calls [`ChangeNotifier::on_event`] after each successful write, and
//! [`ChangeNotifier::events`] describes which handler each event is bound to:
//!
//! | Event | Handler |
//! |-------|---------|
//! | [`LifecycleEvent::AfterInsert`] | [`Handler::PublishUpdate`] |
//! | [`LifecycleEvent::AfterUpdate`] | [`Handler::PublishUpdate`] |
//! | [`LifecycleEvent::AfterDelete`] | [`Handler::PublishDelete`] |

use crate::error::NotifierError;
use crate::notifier::{ChangeNotifier, Dispatched};
use crate::resource::Notifiable;
use std::fmt::{self, Display};

/// A persistence event that has already succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    AfterInsert,
    AfterUpdate,
    AfterDelete,
}

impl LifecycleEvent {
    pub fn handler(self) -> Handler {
        match self {
            LifecycleEvent::AfterInsert | LifecycleEvent::AfterUpdate => Handler::PublishUpdate,
            LifecycleEvent::AfterDelete => Handler::PublishDelete,
        }
    }
}

impl Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleEvent::AfterInsert => f.write_str("after_insert"),
            LifecycleEvent::AfterUpdate => f.write_str("after_update"),
            LifecycleEvent::AfterDelete => f.write_str("after_delete"),
        }
    }
}

/// Notifier entry point bound to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// [`ChangeNotifier::notify_change`]
    PublishUpdate,
    /// [`ChangeNotifier::notify_delete`]
    PublishDelete,
}

impl ChangeNotifier {
    /// The event-to-handler binding table.
    pub fn events() -> [(LifecycleEvent, Handler); 3] {
        [
            LifecycleEvent::AfterInsert,
            LifecycleEvent::AfterUpdate,
            LifecycleEvent::AfterDelete,
        ]
        .map(|event| (event, event.handler()))
    }

    /// Runs the handler bound to `event`.
    pub fn on_event<R>(
        &self,
        event: LifecycleEvent,
        resource: &R,
    ) -> Result<Option<Dispatched>, NotifierError>
    where
        R: Notifiable + ?Sized,
    {
        match event.handler() {
            Handler::PublishUpdate => self.notify_change(resource),
            Handler::PublishDelete => self.notify_delete(resource),
        }
    }
}
