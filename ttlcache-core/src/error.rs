//! Error types for store construction.

use thiserror::Error;

/// Errors that can occur when building a [`Store`](crate::Store).
///
/// Data operations never fail: lookups report absence through `Option`
/// and deletes of unknown ids are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The background cleanup task needs a Tokio runtime to be spawned on
    #[error("no Tokio runtime is active; create the store from within a runtime context")]
    MissingRuntime,

    /// A zero interval would make the cleanup ticker spin
    #[error("cleanup interval must be greater than zero")]
    ZeroCleanupInterval,
}
