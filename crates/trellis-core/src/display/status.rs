//! One-line outcome messages for operations that produce no resource.

use std::fmt;

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Nothing needed doing, e.g. deleting a task that is already gone
    Skipped,
    Failed,
}

/// Outcome message for operations such as idempotent deletes.
pub struct OperationStatus {
    pub message: String,
    pub outcome: Outcome,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Done,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Skipped,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Failed,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.outcome {
            Outcome::Done => "Success:",
            Outcome::Skipped => "Nothing to do:",
            Outcome::Failed => "Error:",
        };
        writeln!(f, "{label} {}", self.message)
    }
}
