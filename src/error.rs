//! Error types for fragment loading

use thiserror::Error;

/// Errors surfaced while loading a `searchData` fragment
#[derive(Debug, Error)]
pub enum IndexError {
    /// A record in the table is structurally invalid: missing key, missing
    /// display name, empty occurrence list, or a duplicate key. `record` is
    /// the zero-based index of the offending record in the table.
    #[error("malformed record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    /// The input is not a searchData fragment at all (bad header, truncated
    /// array, or trailing garbage).
    #[error("invalid searchData fragment: {0}")]
    InvalidFragment(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IndexError {
    pub(crate) fn malformed(record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            record,
            reason: reason.into(),
        }
    }
}
