/// Errors returned by the record store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Record not found: {0}")]
    NotFound(u32),
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}
