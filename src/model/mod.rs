//! Domain models shared by the data, service and bot layers.
//!
//! Entity rows are converted into these types at the repository boundary, and Discord
//! members are reduced to a `MemberSubject` before reaching the services so that the
//! core logic never depends on gateway types.

pub mod identity;
pub mod member;
pub mod profile;
pub mod refresh;
pub mod role;
pub mod token;
