use alloc::vec::Vec;

use crate::{
    prelude::*,
    reader::{Reader, inv_data},
};

#[doc = r#"
   The fixed 16-byte header of an NMF file
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NmfHeader {
    basis: Basis,
    section_count: u16,
    note_count: u32,
}

impl NmfHeader {
    /// Create a new header
    pub fn new(basis: Basis, section_count: u16, note_count: u32) -> Self {
        Self {
            basis,
            section_count,
            note_count,
        }
    }
    /// Get the quantum basis
    pub fn basis(&self) -> Basis {
        self.basis
    }
    /// Number of entries in the section table
    pub fn section_count(&self) -> u16 {
        self.section_count
    }
    /// Number of note records
    pub fn note_count(&self) -> u32 {
        self.note_count
    }

    /// Bytes needed for the header and both tables
    pub fn file_len(&self) -> usize {
        HEADER_LEN
            + usize::from(self.section_count) * SECTION_RECORD_LEN
            + self.note_count as usize * NOTE_RECORD_LEN
    }

    /// Reads and checks the header, including that the buffer is long
    /// enough for the tables it announces.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let available = reader.buffer_len();
        if available < HEADER_LEN {
            return Err(inv_data(
                reader,
                StructureError::Truncated {
                    needed: HEADER_LEN,
                    available,
                },
            ));
        }

        for expected in [MAGIC_1, MAGIC_2] {
            let found = reader.read_u32()?;
            if found != expected {
                return Err(ReaderError::invalid(
                    reader.buffer_position() - 4,
                    StructureError::Magic { expected, found }.into(),
                ));
            }
        }

        let code = reader.read_u16()?;
        let basis = Basis::from_code(code)
            .map_err(|e| ReaderError::invalid(reader.buffer_position() - 2, e.into()))?;

        let section_count = reader.read_u16()?;
        if !(1..=MAX_SECT).contains(&section_count) {
            return Err(ReaderError::invalid(
                reader.buffer_position() - 2,
                StructureError::SectionCount(section_count).into(),
            ));
        }
        let sections_end = HEADER_LEN + usize::from(section_count) * SECTION_RECORD_LEN;
        if available < sections_end {
            return Err(inv_data(
                reader,
                StructureError::Truncated {
                    needed: sections_end,
                    available,
                },
            ));
        }

        let note_count = reader.read_u32()?;
        if !(1..=MAX_NOTE).contains(&note_count) {
            return Err(ReaderError::invalid(
                reader.buffer_position() - 4,
                StructureError::NoteCount(note_count).into(),
            ));
        }

        let header = Self::new(basis, section_count, note_count);
        if available < header.file_len() {
            return Err(inv_data(
                reader,
                StructureError::Truncated {
                    needed: header.file_len(),
                    available,
                },
            ));
        }
        Ok(header)
    }

    /// Appends the 16 header bytes to `out`
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC_1.to_be_bytes());
        out.extend_from_slice(&MAGIC_2.to_be_bytes());
        out.extend_from_slice(&self.basis.code().to_be_bytes());
        out.extend_from_slice(&self.section_count.to_be_bytes());
        out.extend_from_slice(&self.note_count.to_be_bytes());
    }
}

#[test]
fn header_layout() {
    use pretty_assertions::assert_eq;
    let header = NmfHeader::new(Basis::HZ_48000, 3, 0x0001_0000);
    let mut out = Vec::new();
    header.write(&mut out);

    assert_eq!(
        out,
        [
            0x72, 0xED, 0xF0, 0x78, // 1928196216
            0x4E, 0x4F, 0x49, 0x2E, // 1313818926
            0x00, 0x02, // 48000 Hz
            0x00, 0x03, // sections
            0x00, 0x01, 0x00, 0x00, // notes
        ]
    );
    assert_eq!(header.file_len(), 16 + 3 * 4 + 0x0001_0000 * 16);
}

#[test]
fn header_checks_table_lengths() {
    use pretty_assertions::assert_eq;
    let header = NmfHeader::new(Basis::QUARTER_NOTE, 1, 1);
    let mut out = Vec::new();
    header.write(&mut out);

    // Counts are fine, but the tables are missing.
    let err = NmfHeader::read(&mut Reader::from_byte_slice(&out)).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&NmfError::Structure(StructureError::Truncated {
            needed: 20,
            available: 16
        }))
    );

    out.resize(20, 0);
    let err = NmfHeader::read(&mut Reader::from_byte_slice(&out)).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&NmfError::Structure(StructureError::Truncated {
            needed: 36,
            available: 20
        }))
    );

    out.resize(36, 0);
    let mut reader = Reader::from_byte_slice(&out);
    assert_eq!(NmfHeader::read(&mut reader).unwrap(), header);
    assert_eq!(reader.buffer_position(), HEADER_LEN);
}
