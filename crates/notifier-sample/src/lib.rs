//! # Notifier Sample Library
//!
//! A host application for the change notifier: an in-memory article store run as an actor,
//! firing the notifier after every successful write. Exposed as a library for integration
//! testing.

pub mod lifecycle;
pub mod model;
pub mod publisher;
pub mod store;
