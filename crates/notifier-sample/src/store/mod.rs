//! # Record Store
//!
//! An in-memory table of records owned by a single Tokio task. It stands in for the
//! persistence layer of a real application and shows where the notifier hooks in.
//!
//! ## Write Path
//!
//! 1. The [`StoreClient`] sends a request to the [`RecordStore`] task.
//! 2. The store validates the record ([`Record::validate`]). Invalid writes are rejected
//!    with [`StoreError::Validation`] and nothing is published.
//! 3. The row is inserted, replaced or removed.
//! 4. The store fires the matching [`LifecycleEvent`](change_notifier::LifecycleEvent) on its
//!    [`ChangeNotifier`](change_notifier::ChangeNotifier).
//! 5. The client gets its answer.
//!
//! Because the store processes one message at a time, a write's notification always
//! happens after that write and before the caller sees the result.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::RecordStore;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};

use change_notifier::Notifiable;
use std::fmt::Debug;

/// A record the store can persist and broadcast.
pub trait Record: Notifiable + Clone + Debug + Send + 'static {
    /// Data required to create a record.
    type Create: Send + Debug;

    /// Data required to update a record.
    type Update: Send + Debug;

    /// Builds a record from its freshly assigned id and the creation payload.
    fn from_create_params(id: u32, params: Self::Create) -> Self;

    fn apply_update(&mut self, update: Self::Update);

    /// Re-checks the record and stores any errors on it. Returns `true` when valid.
    fn validate(&mut self) -> bool;

    /// Messages left by the last [`Record::validate`] run.
    fn validation_errors(&self) -> Vec<String>;
}
