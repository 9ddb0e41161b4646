#![doc = r#"
Rusty representation of an [`NmfDocument`]
"#]

mod basis;
pub use basis::*;

mod header;
pub use header::*;

mod builder;
use builder::{NmfDocumentBuilder, check_section_offset};

use crate::{
    CapacityError, NmfResult, Note, NotePatch, UsageError,
    constants::*,
    reader::{ReadResult, Reader},
};
use alloc::vec::Vec;

#[doc = r#"
An NMF document: a quantum basis, a section table and a note table.

A new document has the default basis, a single section at offset 0 and no
notes. [`parse`](Self::parse) replaces the whole state at once; the
accessors change it piece by piece and refuse anything that would break
the document's invariants.

# Example
```rust
# use nmf::prelude::*;
let mut doc = NmfDocument::new();
assert_eq!(doc.basis().value(), -1);
assert_eq!(doc.sections(), 1);
assert_eq!(doc.offset(0).unwrap(), 0);
assert_eq!(doc.notes(), 0);

// Nothing to write yet
assert!(doc.serialize().is_err());
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NmfDocument {
    basis: Basis,
    sections: Vec<u32>,
    notes: Vec<Note>,
}

impl Default for NmfDocument {
    fn default() -> Self {
        Self {
            basis: Basis::default(),
            sections: alloc::vec![0],
            notes: Vec::new(),
        }
    }
}

impl NmfDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a set of bytes into a new document
    pub fn from_bytes(bytes: &[u8]) -> ReadResult<Self> {
        let mut doc = Self::new();
        doc.parse(bytes)?;
        Ok(doc)
    }

    /// Replaces this document with the contents of `bytes`.
    ///
    /// The whole file is validated before anything is replaced; on error the
    /// document is left as it was. Bytes after the last note record are
    /// ignored.
    pub fn parse(&mut self, bytes: &[u8]) -> ReadResult<()> {
        let mut reader = Reader::from_byte_slice(bytes);
        let builder = NmfDocumentBuilder::read(&mut reader).inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_e, "rejected NMF buffer");
        })?;

        *self = builder.build();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            basis = self.basis.value(),
            sections = self.sections.len(),
            notes = self.notes.len(),
            trailing = reader.remaining(),
            "parsed NMF document"
        );
        Ok(())
    }

    /// Encodes the document.
    ///
    /// Fails if there are no notes, since a file must hold at least one.
    pub fn serialize(&self) -> NmfResult<Vec<u8>> {
        if self.notes.is_empty() {
            return Err(UsageError::EmptyDocument.into());
        }
        let header = self.header();
        let mut out = Vec::with_capacity(header.file_len());

        header.write(&mut out);
        for offset in &self.sections {
            out.extend_from_slice(&offset.to_be_bytes());
        }
        for note in &self.notes {
            note.write(&mut out);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(bytes = out.len(), "serialized NMF document");
        Ok(out)
    }

    /// The header [`serialize`](Self::serialize) would write
    pub fn header(&self) -> NmfHeader {
        NmfHeader::new(
            self.basis,
            self.sections.len() as u16,
            self.notes.len() as u32,
        )
    }

    /// Returns the quantum basis
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Sets the quantum basis from its signed value.
    ///
    /// Accepts `-1`, `44100`, `48000`, or `[1, 1024]`.
    pub fn set_basis(&mut self, value: i32) -> NmfResult<()> {
        self.basis = Basis::new(value)?;
        Ok(())
    }

    /// Number of sections
    pub fn sections(&self) -> usize {
        self.sections.len()
    }

    /// The offset of section `index`
    pub fn offset(&self, index: usize) -> NmfResult<u32> {
        self.sections
            .get(index)
            .copied()
            .ok_or_else(|| {
                UsageError::SectionIndex {
                    index,
                    len: self.sections.len(),
                }
                .into()
            })
    }

    /// Every section offset, in order
    pub fn section_offsets(&self) -> &[u32] {
        &self.sections
    }

    /// Appends a section starting at `offset`.
    ///
    /// The offset may not precede the last section's. Sections cannot be
    /// removed again.
    pub fn sect(&mut self, offset: u32) -> NmfResult<()> {
        if self.sections.len() >= usize::from(MAX_SECT) {
            return Err(CapacityError::Sections.into());
        }
        check_section_offset(&self.sections, offset)?;
        self.sections.push(offset);
        Ok(())
    }

    /// Number of notes
    pub fn notes(&self) -> usize {
        self.notes.len()
    }

    /// Returns note `index`
    pub fn get(&self, index: usize) -> NmfResult<Note> {
        self.notes.get(index).copied().ok_or_else(|| self.note_index(index).into())
    }

    /// Iterates over the notes in table order
    pub fn iter_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// Overwrites the fields of note `index` that `patch` supplies.
    ///
    /// Every supplied value is checked before the note changes, so on error
    /// the note is untouched. An empty patch changes nothing.
    pub fn set(&mut self, index: usize, patch: &NotePatch) -> NmfResult<()> {
        let Some(current) = self.notes.get(index) else {
            return Err(self.note_index(index).into());
        };
        if patch.is_empty() {
            return Ok(());
        }
        let note = patch.apply(Some(current), &self.sections)?;
        self.notes[index] = note;
        Ok(())
    }

    /// Adds a note built from `patch`, which must supply every field.
    ///
    /// Returns the index of the new note.
    pub fn append(&mut self, patch: &NotePatch) -> NmfResult<usize> {
        let note = patch.apply(None, &self.sections)?;
        if self.notes.len() >= MAX_NOTE as usize {
            return Err(CapacityError::Notes.into());
        }
        self.notes.push(note);
        Ok(self.notes.len() - 1)
    }

    /// Orders the notes by time, then by duration, so grace notes come
    /// before cues and cues before sounding notes at the same time.
    pub fn sort_notes(&mut self) {
        self.notes.sort_by_key(|note| (note.time, note.duration));
        #[cfg(feature = "tracing")]
        tracing::trace!(notes = self.notes.len(), "sorted notes");
    }

    fn note_index(&self, index: usize) -> UsageError {
        UsageError::NoteIndex {
            index,
            len: self.notes.len(),
        }
    }
}

impl TryFrom<&[u8]> for NmfDocument {
    type Error = crate::reader::ReaderError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}
