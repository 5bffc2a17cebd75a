//! # Mock Publisher & Testing Guide
//!
//! [`MockPublisher`] implements [`Publisher`] entirely in memory. Tests queue the responses
//! they want with a fluent builder, run the code under test, then inspect what was
//! published.
//!
//! ## Expectations
//!
//! Every `publish` call consumes the next queued expectation. A call with nothing queued
//! panics, which makes "the publisher is never invoked" the default assertion.
//!
//! | Builder call | Publisher returns |
//! |--------------|-------------------|
//! | `return_ok(id)` | `Ok(id)` |
//! | `return_err(e)` | `Err(e)` |
//! | `echo_data()` | `Ok(update.data())` |
//!
//! ## Sharing
//!
//! Clones share their expectation queue and received log, so keep one clone in the test
//! and hand the other to the notifier (directly or through a
//! [`PublisherRegistry`](crate::PublisherRegistry)).
//!
//! ```rust
//! use change_notifier::mock::MockPublisher;
//! use change_notifier::{PublishError, Publisher, Update};
//!
//! let mock = MockPublisher::new();
//! mock.expect_publish().return_ok("urn:uuid:1");
//! mock.expect_publish().return_err(PublishError::Transport("hub down".into()));
//!
//! let publisher = mock.clone();
//! assert_eq!(publisher.publish(Update::new("t", "{}", vec![])).unwrap(), "urn:uuid:1");
//! assert!(publisher.publish(Update::new("t", "{}", vec![])).is_err());
//!
//! assert_eq!(mock.received().len(), 2);
//! mock.verify();
//! ```

use crate::error::PublishError;
use crate::publisher::Publisher;
use crate::update::Update;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Expectation {
    Respond(Result<String, PublishError>),
    Echo,
}

/// A publisher with expectation tracking for fluent testing.
#[derive(Clone, Default)]
pub struct MockPublisher {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<Update>>>,
}

impl MockPublisher {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one expected `publish` call.
    pub fn expect_publish(&self) -> PublishExpectationBuilder {
        PublishExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every update published so far, oldest first.
    pub fn received(&self) -> Vec<Update> {
        self.received.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<Update> {
        self.received.lock().unwrap().last().cloned()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl Publisher for MockPublisher {
    fn publish(&self, update: Update) -> Result<String, PublishError> {
        let expectation = self.expectations.lock().unwrap().pop_front();
        let response = match expectation {
            Some(Expectation::Respond(response)) => response,
            Some(Expectation::Echo) => Ok(update.data().to_string()),
            None => panic!("Unexpected publish to topic `{}`", update.topic()),
        };
        self.received.lock().unwrap().push(update);
        response
    }
}

/// Builder for `publish` expectations.
pub struct PublishExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl PublishExpectationBuilder {
    /// Sets the expectation to return a dispatch id.
    pub fn return_ok(self, id: impl Into<String>) {
        self.push(Expectation::Respond(Ok(id.into())));
    }

    /// Sets the expectation to fail.
    pub fn return_err(self, error: PublishError) {
        self.push(Expectation::Respond(Err(error)));
    }

    /// Sets the expectation to return the update's data as its dispatch id.
    pub fn echo_data(self) {
        self.push(Expectation::Echo);
    }

    fn push(self, expectation: Expectation) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}
