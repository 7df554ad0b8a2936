//! Business logic.
//!
//! Services orchestrate repositories and the IVAO client. They return structured
//! results and typed errors; nothing here talks to the Discord gateway directly.

pub mod oauth;
pub mod refresh;
pub mod role;
pub mod token;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_helpers;
