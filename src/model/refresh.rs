//! Bulk refresh selection, progress and summary types.

use std::fmt;

use crate::model::member::MemberSubject;

/// Number of error lines included verbatim in a rendered summary.
const SUMMARY_ERROR_LIMIT: usize = 10;

/// Which identity records a bulk refresh covers.
#[derive(Debug, Clone)]
pub enum RefreshSelector {
    /// The record backing one guild member, resolved like a verification.
    Member(MemberSubject),
    /// Records whose token was last rotated more than this many days ago.
    OlderThan(u32),
    /// Every record with a non-null refresh token.
    All,
}

/// One failed record of a bulk refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    pub identifier: String,
    pub message: String,
}

impl fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identifier.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.identifier, self.message)
        }
    }
}

/// Running tally emitted every 10 records and at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshProgress {
    pub processed: usize,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl fmt::Display for RefreshProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Progress: {}/{} processed... ✅ {} successful, ❌ {} failed",
            self.processed, self.total, self.successful, self.failed
        )
    }
}

/// Final tally of a bulk refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
    /// Every failure in processing order.
    pub errors: Vec<RefreshFailure>,
}

impl RefreshSummary {
    /// Renders the summary posted back to the invoking staff member.
    pub fn render(&self) -> String {
        let mut out = format!(
            "**Token refresh completed**\n\n✅ Successful: {}\n❌ Failed: {}\n📊 Total: {}\n",
            self.successful, self.failed, self.total
        );

        if !self.errors.is_empty() {
            out.push_str("\n**Errors (first 10):**\n");
            let lines: Vec<String> = self
                .errors
                .iter()
                .take(SUMMARY_ERROR_LIMIT)
                .map(ToString::to_string)
                .collect();
            out.push_str(&lines.join("\n"));

            if self.errors.len() > SUMMARY_ERROR_LIMIT {
                out.push_str(&format!(
                    "\n... and {} more errors.",
                    self.errors.len() - SUMMARY_ERROR_LIMIT
                ));
            }
        }

        out
    }
}
