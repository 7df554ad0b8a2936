use thiserror::Error;

/// Failures of the connection pool itself, as opposed to failed queries.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No live pool is available.
    ///
    /// The pool was closed during shutdown or could not be recreated by the health
    /// check. Callers must surface this instead of treating it as "not found".
    #[error("Database pool not available")]
    Unavailable,
}
