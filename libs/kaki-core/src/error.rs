//! Error types for kaki-core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for data-source calls.
pub type Result<T> = std::result::Result<T, SourceError>;

/// The external operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOperation {
    FetchDueItems,
    FetchCategoryWords,
    CreateStudyItems,
    UpdateStudyItem,
}

/// Failure reported by the data layer.
///
/// Displays as the data layer's own message so the host can show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SourceError {
    pub operation: SourceOperation,
    pub message: String,
}

impl SourceError {
    pub fn new(operation: SourceOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
