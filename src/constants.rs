#![doc = r#"
Numeric limits and layout constants for NMF files.

Every range check in the crate goes through these values.
"#]

/// Largest value of any 31-bit field (note times, section offsets).
pub const MAX_INT: u32 = 2_147_483_647;

/// Largest value of an unsigned 16-bit field (zero-based layer index).
pub const MAX_SHORT: u16 = 65_535;

/// Longest regular duration, in quanta.
pub const MAX_DUR: i16 = 32_767;

/// Deepest grace-note index.
pub const MIN_DUR: i16 = -32_767;

/// Maximum number of sections in a document.
pub const MAX_SECT: u16 = 65_535;

/// Maximum number of notes in a document.
pub const MAX_NOTE: u32 = 1_048_576;

/// Lowest pitch, in semitones from middle C.
pub const MIN_PITCH: i8 = -39;

/// Highest pitch, in semitones from middle C.
pub const MAX_PITCH: i8 = 48;

/// Highest articulation index.
pub const MAX_ART: u8 = 61;

/// First magic word of every NMF file.
pub const MAGIC_1: u32 = 1_928_196_216;

/// Second magic word of every NMF file.
pub const MAGIC_2: u32 = 1_313_818_926;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 16;

/// Size of one section table entry in bytes.
pub const SECTION_RECORD_LEN: usize = 4;

/// Size of one note record in bytes.
pub const NOTE_RECORD_LEN: usize = 16;

/// Added to a duration before it is written.
pub const DURATION_BIAS: u32 = 0x8000_0000;

/// Added to a pitch before it is written.
pub const PITCH_BIAS: u16 = 0x8000;

/// Basis value meaning 96 quanta per quarter note.
pub const BASIS_QUARTER_NOTE: i32 = -1;

/// Quanta per quarter note under [`BASIS_QUARTER_NOTE`].
pub const QUANTA_PER_QUARTER: u16 = 96;

/// Lowest fixed Hz basis.
pub const MIN_BASIS_HZ: i32 = 1;

/// Highest fixed Hz basis.
pub const MAX_BASIS_HZ: i32 = 1024;

/// Offset between an encoded fixed-Hz basis code and its rate.
pub const BASIS_HZ_CODE_OFFSET: u16 = 2;
