use crate::NoteField;
use alloc::string::String;
use thiserror::Error;

#[doc = r#"
Every error this crate can produce.

Each variant is one category of failure. Callers that need to react
differently to, say, a full note table versus a bad argument should match
on the variant (or on [`NmfError::category`]) rather than on the message.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmfError {
    /// The buffer does not hold a well-formed NMF layout
    #[error("Structure: {0}")]
    Structure(#[from] StructureError),
    /// A field holds a value with no valid decoding
    #[error("Encoding: {0}")]
    Encoding(#[from] EncodingError),
    /// A note refers to a section it may not use
    #[error("Reference: {0}")]
    Reference(#[from] ReferenceError),
    /// A value lies outside its declared range
    #[error("Range: {0}")]
    Range(#[from] RangeError),
    /// A table is already full
    #[error("Capacity: {0}")]
    Capacity(#[from] CapacityError),
    /// The call itself was malformed
    #[error("Usage: {0}")]
    Usage(#[from] UsageError),
}

impl NmfError {
    /// Returns the category of this error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Structure(_) => ErrorCategory::Structure,
            Self::Encoding(_) => ErrorCategory::Encoding,
            Self::Reference(_) => ErrorCategory::Reference,
            Self::Range(_) => ErrorCategory::Range,
            Self::Capacity(_) => ErrorCategory::Capacity,
            Self::Usage(_) => ErrorCategory::Usage,
        }
    }
}

/// The category of an [`NmfError`], without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// See [`StructureError`]
    Structure,
    /// See [`EncodingError`]
    Encoding,
    /// See [`ReferenceError`]
    Reference,
    /// See [`RangeError`]
    Range,
    /// See [`CapacityError`]
    Capacity,
    /// See [`UsageError`]
    Usage,
}

/// Truncated buffers and bad header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The buffer ends before the layout does
    #[error("Need {needed} bytes, buffer holds {available}")]
    Truncated {
        /// Bytes required by the header
        needed: usize,
        /// Bytes in the buffer
        available: usize,
    },
    /// A magic word did not match
    #[error("Bad magic number {found} (expected {expected})")]
    Magic {
        /// The magic word for this position
        expected: u32,
        /// What the buffer holds instead
        found: u32,
    },
    /// Section count of zero
    #[error("Invalid section count {0}")]
    SectionCount(u16),
    /// Note count of zero or above the maximum
    #[error("Invalid note count {0}")]
    NoteCount(u32),
}

/// Illegal encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The header's basis field is not in the code table
    #[error("Unknown basis code {0}")]
    BasisCode(u16),
    /// A basis value outside the legal set
    #[error("Illegal basis {0}")]
    Basis(i64),
    /// A biased duration field is all zero bits
    #[error("Duration field underflows its bias")]
    ZeroDuration,
    /// A biased pitch field is all zero bits
    #[error("Pitch field underflows its bias")]
    ZeroPitch,
}

/// Broken links between the note and section tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The section index is past the end of the section table
    #[error("Section {section} does not exist ({sections} sections)")]
    UnknownSection {
        /// The referenced index
        section: u16,
        /// Length of the section table
        sections: usize,
    },
    /// The note starts before its section
    #[error("Time {time} precedes section {section} at {offset}")]
    BeforeSection {
        /// The note's time
        time: u32,
        /// The referenced index
        section: u16,
        /// Offset of that section
        offset: u32,
    },
}

/// Values outside their declared range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A note field value
    #[error("{field} out of range: {value}")]
    Field {
        /// The field being checked
        field: NoteField,
        /// The rejected value
        value: i64,
    },
    /// The first section must start at zero
    #[error("First section starts at {0}, not 0")]
    FirstSection(u32),
    /// A section offset is too large or goes backwards
    #[error("Section offset {offset} invalid after {previous}")]
    SectionOffset {
        /// The rejected offset
        offset: u32,
        /// Offset of the section before it
        previous: u32,
    },
}

/// Full tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// The section table is at its maximum length
    #[error("Too many sections")]
    Sections,
    /// The note table is at its maximum length
    #[error("Too many notes")]
    Notes,
}

/// Malformed calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Section index out of bounds
    #[error("No section {index} ({len} sections)")]
    SectionIndex {
        /// The requested index
        index: usize,
        /// Length of the section table
        len: usize,
    },
    /// Note index out of bounds
    #[error("No note {index} ({len} notes)")]
    NoteIndex {
        /// The requested index
        index: usize,
        /// Length of the note table
        len: usize,
    },
    /// Appending requires every field
    #[error("Missing field {0}")]
    MissingField(NoteField),
    /// A field name that no note has
    #[error("Unknown field {0:?}")]
    UnknownField(String),
    /// A field supplied more than once
    #[error("Field {0} given twice")]
    DuplicateField(NoteField),
    /// Serializing requires at least one note
    #[error("No notes to write")]
    EmptyDocument,
}

/// Shorthand for results carrying an [`NmfError`].
pub type NmfResult<T> = Result<T, NmfError>;
