use super::{NmfDocument, NmfHeader};
use crate::{
    NmfResult, Note, RangeError,
    constants::*,
    reader::{ReadResult, Reader, ReaderError},
};
use alloc::vec::Vec;

/// Checks that `offset` may follow the last entry of `sections`.
///
/// The first section must start at zero; later ones may not go backwards
/// or pass [`MAX_INT`].
pub(crate) fn check_section_offset(sections: &[u32], offset: u32) -> NmfResult<()> {
    match sections.last() {
        None if offset != 0 => Err(RangeError::FirstSection(offset).into()),
        None => Ok(()),
        Some(&previous) if offset < previous || offset > MAX_INT => {
            Err(RangeError::SectionOffset { offset, previous }.into())
        }
        Some(_) => Ok(()),
    }
}

/// Staging tables filled while reading a file.
///
/// Nothing here is visible to a document until [`build`](Self::build), so a
/// failed read leaves the target untouched.
pub(crate) struct NmfDocumentBuilder {
    header: NmfHeader,
    sections: Vec<u32>,
    notes: Vec<Note>,
}

impl NmfDocumentBuilder {
    fn new(header: NmfHeader) -> Self {
        Self {
            header,
            sections: Vec::with_capacity(usize::from(header.section_count())),
            notes: Vec::with_capacity(header.note_count() as usize),
        }
    }

    /// Reads a whole file from the start of `reader`
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let header = NmfHeader::read(reader)?;
        let mut builder = Self::new(header);

        for _ in 0..header.section_count() {
            let position = reader.buffer_position();
            let offset = reader.read_u32()?;
            builder
                .handle_section(offset)
                .map_err(|e| ReaderError::new(position, e.into()))?;
        }

        for _ in 0..header.note_count() {
            let note = Note::read(reader, &builder.sections)?;
            builder.notes.push(note);
        }

        Ok(builder)
    }

    fn handle_section(&mut self, offset: u32) -> NmfResult<()> {
        check_section_offset(&self.sections, offset)?;
        self.sections.push(offset);
        Ok(())
    }

    /// Finishes the document from the staged tables.
    pub(crate) fn build(self) -> NmfDocument {
        NmfDocument {
            basis: self.header.basis(),
            sections: self.sections,
            notes: self.notes,
        }
    }
}

#[test]
fn section_offsets_must_not_decrease() {
    use crate::NmfError;
    use pretty_assertions::assert_eq;

    assert_eq!(
        check_section_offset(&[], 4),
        Err(NmfError::Range(RangeError::FirstSection(4)))
    );
    assert_eq!(check_section_offset(&[], 0), Ok(()));
    assert_eq!(check_section_offset(&[0, 10], 10), Ok(()));
    assert_eq!(
        check_section_offset(&[0, 10], 9),
        Err(NmfError::Range(RangeError::SectionOffset {
            offset: 9,
            previous: 10
        }))
    );
    assert_eq!(
        check_section_offset(&[0], MAX_INT + 1),
        Err(NmfError::Range(RangeError::SectionOffset {
            offset: MAX_INT + 1,
            previous: 0
        }))
    );
}
