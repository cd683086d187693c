//! Network loading errors.

use crate::domain::ParseError;

/// Errors that abort loading the edge table.
///
/// Individual bad records only surface here under
/// [`InvalidRecordPolicy::Fail`](super::InvalidRecordPolicy::Fail); with the
/// default policy they are collected as skipped records instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A record failed validation and the policy is to fail
    #[error("record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ParseError,
    },

    /// The edge table could not be opened or read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
