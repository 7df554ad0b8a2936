use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase or stored data indicating unexpected behavior
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Discord ids are stored as text; a value that does not parse as `u64` means the
    /// row was written by something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },
}
