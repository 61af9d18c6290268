//! Errors raised while building a graph

use crate::graph::LinkId;
use thiserror::Error;

/// Errors that abort a parse
///
/// All of them are input-validation failures: the same input always fails
/// the same way, and no partial graph is returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Sentence {sentence} has no '{field}' field")]
    MissingRequiredField { field: String, sentence: usize },

    #[error("{what} references index {index}, but only {limit} are available")]
    OutOfRangeReference {
        what: String,
        index: usize,
        limit: usize,
    },

    #[error("Invalid span [{start}, {end})")]
    InvalidSpan { start: usize, end: usize },

    #[error("Duplicate link id: {0}")]
    DuplicateLinkId(LinkId),

    #[error("Malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuildError {
    pub(crate) fn out_of_range(what: impl Into<String>, index: usize, limit: usize) -> Self {
        Self::OutOfRangeReference {
            what: what.into(),
            index,
            limit,
        }
    }
}

/// Result type for graph building
pub type BuildResult<T> = Result<T, BuildError>;
