//! Error types for the store crate.

/// Failure reported by the underlying key-value store.
///
/// Absence of a record is not an error; see [`crate::ItemStore::get_by_key`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The store cannot serve requests, e.g. its internal state is corrupt.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed a specific request.
    #[error("store request failed: {0}")]
    Request(String),
}
