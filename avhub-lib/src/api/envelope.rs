//! Response envelope decoding.

use serde::Deserialize;

use crate::model::Record;

/// A list response: either a bare array or `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowsEnvelope {
    /// `[ {...}, {...} ]`
    Bare(Vec<Record>),
    /// `{ "data": [ {...} ] }`
    Wrapped {
        /// The rows.
        data: Vec<Record>,
    },
}

impl RowsEnvelope {
    /// Unwraps the rows.
    pub fn into_rows(self) -> Vec<Record> {
        match self {
            Self::Bare(rows) | Self::Wrapped { data: rows } => rows,
        }
    }
}
