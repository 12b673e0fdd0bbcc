use thiserror::Error;

/// Errors returned by [`crate::host::GridHost`].
///
/// These are caller mistakes (bad keys, stale indices), not runtime failures; grid callbacks
/// themselves never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("duplicate column key `{0}`")]
    DuplicateColumnKey(String),

    #[error("no column at index {index} ({len} columns)")]
    UnknownColumn { index: usize, len: usize },

    #[error("no row at index {index} ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("column `{0}` has no editor")]
    NotEditable(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
