//! Database layer.
//!
//! `DatabasePool` owns the process-wide connection pool and its lifecycle. Repositories
//! borrow a live `DatabaseConnection` from it for the duration of one operation and
//! return domain models from `crate::model`.

pub mod identity;
pub mod pool;

#[cfg(test)]
mod test;
