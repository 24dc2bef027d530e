//! Error types for side-band message decoding.

use crate::kind::Kind;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a side-band buffer.
///
/// Every error is scoped to a single record. The decode loop drops the
/// offending buffer and continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The buffer failed the header sentinel check (short buffer or
    /// nonzero padding).
    #[error("corrupt message")]
    Corrupt,

    /// The buffer length disagrees with the fixed size of its kind.
    #[error("mismatched {kind}: expected {expected} bytes, got {actual}")]
    Mismatch {
        /// The kind named by the header.
        kind: Kind,
        /// Size from the size table.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// The buffer is too short for the layout of its kind.
    #[error("truncated {kind}: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// The kind named by the header.
        kind: Kind,
        /// Minimum length of the kind's layout.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

impl Error {
    /// Check if this is a "not a message" error.
    ///
    /// These are expected noise on the channel rather than faults.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt)
    }

    /// Check if this is a size mismatch against the size table.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }

    /// Get the kind named by the offending header, if there was one.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Corrupt => None,
            Self::Mismatch { kind, .. } | Self::Truncated { kind, .. } => Some(*kind),
        }
    }
}
