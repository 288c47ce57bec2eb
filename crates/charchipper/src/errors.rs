//! # Error Types

/// Result alias for fallible `charchipper` operations.
pub type CCResult<T> = Result<T, CCError>;

/// Errors surfaced by vocabulary, codec, and store operations.
///
/// Every variant aborts the requested operation entirely; there is no
/// internal retry, no default-token substitution, and no partial output.
#[derive(Debug, thiserror::Error)]
pub enum CCError {
    /// Encode met a character or special token never registered in the vocabulary.
    #[error("unknown unit: {unit:?}")]
    UnknownUnit {
        /// The offending atomic unit.
        unit: String,
    },

    /// Decode met a token id with no entry in the vocabulary.
    #[error("unknown token id: {id}")]
    UnknownId {
        /// The offending token id.
        id: u32,
    },

    /// Underlying storage could not be read or written.
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted vocabulary record is malformed or violates an invariant.
    #[error("format error: {0}")]
    Format(String),
}

impl CCError {
    /// Build an [`CCError::UnknownUnit`] from any unit-ish string.
    pub fn unknown_unit<S: Into<String>>(unit: S) -> Self {
        CCError::UnknownUnit { unit: unit.into() }
    }

    /// Build a [`CCError::Format`] from any description.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        CCError::Format(msg.into())
    }
}
