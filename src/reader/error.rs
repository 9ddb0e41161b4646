use super::Reader;
use crate::{ErrorCategory, NmfError};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading bytes into an [`NmfDocument`](crate::NmfDocument)
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] NmfError),
    /// Reading out of bounds.
    ///
    /// Only a [`Reader`] used directly produces this: document parsing checks
    /// the buffer length against the header before reading any table.
    #[error("Read out of bounds!")]
    OutOfBounds,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }
    /// Returns the underlying parse error, if this is one.
    pub fn parse_error(&self) -> Option<&NmfError> {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => Some(e),
            ReaderErrorKind::OutOfBounds => None,
        }
    }
    /// Returns the error category.
    ///
    /// Reading out of bounds is a structural failure.
    pub fn category(&self) -> ErrorCategory {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => e.category(),
            ReaderErrorKind::OutOfBounds => ErrorCategory::Structure,
        }
    }

    /// Create a new invalid data error
    pub const fn invalid(position: usize, error: NmfError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<NmfError>) -> ReaderError {
    ReaderError::invalid(reader.buffer_position(), v.into())
}
