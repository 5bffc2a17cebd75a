//! Domain records managed by the sample store.

pub mod article;

pub use article::*;
