#![allow(dead_code)]

/// One raw note record, fields exactly as stored in the file
#[derive(Clone, Copy)]
pub struct RawNote {
    pub time: u32,
    pub duration: u32,
    pub pitch: u16,
    pub art: u16,
    pub sect: u16,
    pub layer: u16,
}

impl RawNote {
    /// A cue at `time` in section 0, middle C, layer 1
    pub const fn cue(time: u32) -> Self {
        Self {
            time,
            duration: 0x8000_0000,
            pitch: 0x8000,
            art: 0,
            sect: 0,
            layer: 0,
        }
    }
}

/// Helper to create a raw NMF file
pub fn create_nmf_bytes(basis_code: u16, sections: &[u32], notes: &[RawNote]) -> Vec<u8> {
    create_nmf_bytes_with_counts(
        basis_code,
        sections.len() as u16,
        notes.len() as u32,
        sections,
        notes,
    )
}

/// Like [`create_nmf_bytes`], but with header counts that may disagree with the tables
pub fn create_nmf_bytes_with_counts(
    basis_code: u16,
    section_count: u16,
    note_count: u32,
    sections: &[u32],
    notes: &[RawNote],
) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1_928_196_216u32.to_be_bytes());
    bytes.extend_from_slice(&1_313_818_926u32.to_be_bytes());
    bytes.extend_from_slice(&basis_code.to_be_bytes());
    bytes.extend_from_slice(&section_count.to_be_bytes());
    bytes.extend_from_slice(&note_count.to_be_bytes());
    for offset in sections {
        bytes.extend_from_slice(&offset.to_be_bytes());
    }
    for note in notes {
        bytes.extend_from_slice(&note.time.to_be_bytes());
        bytes.extend_from_slice(&note.duration.to_be_bytes());
        bytes.extend_from_slice(&note.pitch.to_be_bytes());
        bytes.extend_from_slice(&note.art.to_be_bytes());
        bytes.extend_from_slice(&note.sect.to_be_bytes());
        bytes.extend_from_slice(&note.layer.to_be_bytes());
    }
    bytes
}
