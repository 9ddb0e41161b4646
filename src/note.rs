use core::fmt;
use core::str::FromStr;

use alloc::{string::String, vec::Vec};

use crate::{
    EncodingError, NmfError, NmfResult, RangeError, ReferenceError, UsageError,
    constants::*,
    reader::{ReadResult, Reader, ReaderError},
};

#[doc = r#"
One note event.

Values are stored in their narrowest type, so a [`Note`] held by a
document is always in range. The layer is kept zero-based internally and
reported one-based by [`Note::layer`].

# Example
```rust
# use nmf::prelude::*;
let mut doc = NmfDocument::new();
doc.append(&NotePatch::new().time(0).duration(-1).pitch(-39).articulation(61).section(0).layer(3))
    .unwrap();

let note = doc.get(0).unwrap();
assert_eq!(note.kind(), NoteKind::Grace);
assert_eq!(note.layer(), 3);
assert_eq!(note.layer_index(), 2);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pub(crate) time: u32,
    pub(crate) duration: i16,
    pub(crate) pitch: i8,
    pub(crate) articulation: u8,
    pub(crate) section: u16,
    pub(crate) layer: u16,
}

impl Note {
    /// Start offset in quanta
    pub const fn time(&self) -> u32 {
        self.time
    }
    /// Positive for a sounding note, zero for a cue, negative for a grace note
    pub const fn duration(&self) -> i16 {
        self.duration
    }
    /// Semitones from middle C
    pub const fn pitch(&self) -> i8 {
        self.pitch
    }
    /// Articulation index
    pub const fn articulation(&self) -> u8 {
        self.articulation
    }
    /// Index into the document's section table
    pub const fn section(&self) -> u16 {
        self.section
    }
    /// One-based layer, `[1, 65536]`
    pub const fn layer(&self) -> u32 {
        self.layer as u32 + 1
    }
    /// Zero-based layer, as stored in the file
    pub const fn layer_index(&self) -> u16 {
        self.layer
    }

    /// Classifies the note by its duration
    pub const fn kind(&self) -> NoteKind {
        match self.duration {
            d if d > 0 => NoteKind::Regular,
            0 => NoteKind::Cue,
            _ => NoteKind::Grace,
        }
    }

    /// Returns the value of `field`, with the layer one-based
    pub fn value(&self, field: NoteField) -> i64 {
        match field {
            NoteField::Time => self.time.into(),
            NoteField::Duration => self.duration.into(),
            NoteField::Pitch => self.pitch.into(),
            NoteField::Articulation => self.articulation.into(),
            NoteField::Section => self.section.into(),
            NoteField::Layer => self.layer().into(),
        }
    }

    /// Decodes and validates one 16-byte record.
    ///
    /// Errors are reported at the start of the record.
    pub(crate) fn read(reader: &mut Reader<'_>, sections: &[u32]) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let time = reader.read_u32()?;
        let raw_duration = reader.read_u32()?;
        let raw_pitch = reader.read_u16()?;
        let articulation = reader.read_u16()?;
        let section = reader.read_u16()?;
        let layer = reader.read_u16()?;

        let invalid = |e: NmfError| ReaderError::invalid(start, e);

        if raw_duration == 0 {
            return Err(invalid(EncodingError::ZeroDuration.into()));
        }
        if raw_pitch == 0 {
            return Err(invalid(EncodingError::ZeroPitch.into()));
        }
        let duration = i64::from(raw_duration) - i64::from(DURATION_BIAS);
        let pitch = i64::from(raw_pitch) - i64::from(PITCH_BIAS);

        let time = check(NoteField::Time, time.into()).map_err(invalid)?;
        // Checked on parse as well: a stored duration is an i16 within MIN_DUR..=MAX_DUR.
        let duration = check(NoteField::Duration, duration).map_err(invalid)?;
        let pitch = check(NoteField::Pitch, pitch).map_err(invalid)?;
        let articulation = check(NoteField::Articulation, articulation.into()).map_err(invalid)?;

        let note = Self {
            time: time as u32,
            duration: duration as i16,
            pitch: pitch as i8,
            articulation: articulation as u8,
            section,
            layer,
        };
        note.check_section(sections).map_err(invalid)?;
        Ok(note)
    }

    /// Appends the 16-byte record for this note to `out`
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        let duration = (i64::from(self.duration) + i64::from(DURATION_BIAS)) as u32;
        let pitch = (i32::from(self.pitch) + i32::from(PITCH_BIAS)) as u16;

        out.extend_from_slice(&self.time.to_be_bytes());
        out.extend_from_slice(&duration.to_be_bytes());
        out.extend_from_slice(&pitch.to_be_bytes());
        out.extend_from_slice(&u16::from(self.articulation).to_be_bytes());
        out.extend_from_slice(&self.section.to_be_bytes());
        out.extend_from_slice(&self.layer.to_be_bytes());
    }

    /// The section must exist and must not start after the note
    fn check_section(&self, sections: &[u32]) -> NmfResult<()> {
        let Some(&offset) = sections.get(usize::from(self.section)) else {
            return Err(ReferenceError::UnknownSection {
                section: self.section,
                sections: sections.len(),
            }
            .into());
        };
        if self.time < offset {
            return Err(ReferenceError::BeforeSection {
                time: self.time,
                section: self.section,
                offset,
            }
            .into());
        }
        Ok(())
    }
}

/// Range-checks a single field value
fn check(field: NoteField, value: i64) -> NmfResult<i64> {
    if field.range().contains(&value) {
        Ok(value)
    } else {
        Err(RangeError::Field { field, value }.into())
    }
}

/// What a note's duration says about it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// Sounds for its duration
    Regular,
    /// A timing marker with no sustain
    Cue,
    /// Sounds before its nominal time
    Grace,
}

#[doc = r#"
The six fields of a [`Note`].

Field names parse from and print as `time`, `dur`, `pitch`, `art`,
`sect` and `layer`.

```rust
# use nmf::prelude::*;
let field: NoteField = "dur".parse().unwrap();
assert_eq!(field, NoteField::Duration);
assert!("velocity".parse::<NoteField>().is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteField {
    /// Start offset in quanta
    Time,
    /// Duration in quanta
    Duration,
    /// Semitones from middle C
    Pitch,
    /// Articulation index
    Articulation,
    /// Section index
    Section,
    /// One-based layer
    Layer,
}

impl NoteField {
    /// Every field, in record order
    pub const ALL: [NoteField; 6] = [
        Self::Time,
        Self::Duration,
        Self::Pitch,
        Self::Articulation,
        Self::Section,
        Self::Layer,
    ];

    /// The short name used in field lists
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Duration => "dur",
            Self::Pitch => "pitch",
            Self::Articulation => "art",
            Self::Section => "sect",
            Self::Layer => "layer",
        }
    }

    /// Values this field accepts from callers.
    ///
    /// The section range only bounds the index type; whether the section
    /// exists depends on the document.
    pub fn range(&self) -> core::ops::RangeInclusive<i64> {
        match self {
            Self::Time => 0..=i64::from(MAX_INT),
            Self::Duration => i64::from(MIN_DUR)..=i64::from(MAX_DUR),
            Self::Pitch => i64::from(MIN_PITCH)..=i64::from(MAX_PITCH),
            Self::Articulation => 0..=i64::from(MAX_ART),
            Self::Section => 0..=i64::from(MAX_SHORT),
            Self::Layer => 1..=i64::from(MAX_SHORT) + 1,
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteField {
    type Err = UsageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UsageError::UnknownField(String::from(s)))
    }
}

#[doc = r#"
A set of field values to write into a note.

Used whole by [`NmfDocument::append`](crate::NmfDocument::append), which
needs every field, and partially by [`NmfDocument::set`](crate::NmfDocument::set),
which leaves unsupplied fields alone. Values are plain integers and are only
checked when the patch is applied. The layer is one-based.

# Example
```rust
# use nmf::prelude::*;
let patch = NotePatch::from_pairs([("dur", 5), ("layer", 2)]).unwrap();
assert_eq!(patch.get(NoteField::Duration), Some(5));
assert_eq!(patch.get(NoteField::Time), None);

let err = NotePatch::from_pairs([("dur", 5), ("dur", 6)]).unwrap_err();
assert_eq!(err.category(), ErrorCategory::Usage);
```
"#]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotePatch {
    values: [Option<i64>; 6],
}

impl NotePatch {
    /// An empty patch
    pub const fn new() -> Self {
        Self { values: [None; 6] }
    }

    /// A patch supplying every field of `note`
    pub fn from_note(note: &Note) -> Self {
        let mut patch = Self::new();
        for field in NoteField::ALL {
            patch = patch.with(field, note.value(field));
        }
        patch
    }

    /// Builds a patch from `(name, value)` pairs.
    ///
    /// Fails on a name that is not a [`NoteField`] or on a field named twice.
    pub fn from_pairs<'s, I>(pairs: I) -> NmfResult<Self>
    where
        I: IntoIterator<Item = (&'s str, i64)>,
    {
        let mut patch = Self::new();
        for (name, value) in pairs {
            let field: NoteField = name.parse()?;
            if patch.get(field).is_some() {
                return Err(UsageError::DuplicateField(field).into());
            }
            patch = patch.with(field, value);
        }
        Ok(patch)
    }

    /// Sets `field` to `value`
    pub const fn with(mut self, field: NoteField, value: i64) -> Self {
        self.values[field as usize] = Some(value);
        self
    }
    /// Sets the time
    pub const fn time(self, value: i64) -> Self {
        self.with(NoteField::Time, value)
    }
    /// Sets the duration
    pub const fn duration(self, value: i64) -> Self {
        self.with(NoteField::Duration, value)
    }
    /// Sets the pitch
    pub const fn pitch(self, value: i64) -> Self {
        self.with(NoteField::Pitch, value)
    }
    /// Sets the articulation
    pub const fn articulation(self, value: i64) -> Self {
        self.with(NoteField::Articulation, value)
    }
    /// Sets the section index
    pub const fn section(self, value: i64) -> Self {
        self.with(NoteField::Section, value)
    }
    /// Sets the one-based layer
    pub const fn layer(self, value: i64) -> Self {
        self.with(NoteField::Layer, value)
    }

    /// The value supplied for `field`, if any
    pub const fn get(&self, field: NoteField) -> Option<i64> {
        self.values[field as usize]
    }

    /// True if no field is supplied
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// True if every field is supplied
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Validates the patch and returns the note it produces.
    ///
    /// With no `base`, every field must be supplied. Nothing is written
    /// anywhere; callers commit the returned note themselves.
    pub(crate) fn apply(&self, base: Option<&Note>, sections: &[u32]) -> NmfResult<Note> {
        let mut note = match base {
            Some(note) => *note,
            None => {
                if let Some(field) = NoteField::ALL.into_iter().find(|f| self.get(*f).is_none()) {
                    return Err(UsageError::MissingField(field).into());
                }
                Note {
                    time: 0,
                    duration: 0,
                    pitch: 0,
                    articulation: 0,
                    section: 0,
                    layer: 0,
                }
            }
        };

        for field in NoteField::ALL {
            let Some(value) = self.get(field) else {
                continue;
            };
            let value = check(field, value)?;
            match field {
                NoteField::Time => note.time = value as u32,
                NoteField::Duration => note.duration = value as i16,
                NoteField::Pitch => note.pitch = value as i8,
                NoteField::Articulation => note.articulation = value as u8,
                NoteField::Section => {
                    let section = value as u16;
                    if usize::from(section) >= sections.len() {
                        return Err(ReferenceError::UnknownSection {
                            section,
                            sections: sections.len(),
                        }
                        .into());
                    }
                    note.section = section;
                }
                NoteField::Layer => note.layer = (value - 1) as u16,
            }
        }

        note.check_section(sections)?;
        Ok(note)
    }
}

#[cfg(test)]
fn full_patch() -> NotePatch {
    NotePatch::new()
        .time(10)
        .duration(-3)
        .pitch(48)
        .articulation(61)
        .section(0)
        .layer(65_536)
}

#[test]
fn patch_builds_note() {
    use pretty_assertions::assert_eq;
    let note = full_patch().apply(None, &[0]).unwrap();

    assert_eq!(note.time(), 10);
    assert_eq!(note.duration(), -3);
    assert_eq!(note.pitch(), 48);
    assert_eq!(note.articulation(), 61);
    assert_eq!(note.section(), 0);
    assert_eq!(note.layer(), 65_536);
    assert_eq!(note.layer_index(), MAX_SHORT);
    assert_eq!(NotePatch::from_note(&note), full_patch());
}

#[test]
fn patch_reports_first_missing_field() {
    use pretty_assertions::assert_eq;
    let patch = NotePatch::new().time(0).duration(1).articulation(0);
    let err = patch.apply(None, &[0]).unwrap_err();
    assert_eq!(err, NmfError::Usage(UsageError::MissingField(NoteField::Pitch)));
}

#[test]
fn patch_range_bounds() {
    use pretty_assertions::assert_eq;
    let cases = [
        (NoteField::Time, i64::from(MAX_INT) + 1),
        (NoteField::Time, -1),
        (NoteField::Duration, -32_768),
        (NoteField::Duration, 32_768),
        (NoteField::Pitch, -40),
        (NoteField::Pitch, 49),
        (NoteField::Articulation, 62),
        (NoteField::Layer, 0),
        (NoteField::Layer, 65_537),
        (NoteField::Section, -1),
    ];
    for (field, value) in cases {
        let err = full_patch().with(field, value).apply(None, &[0]).unwrap_err();
        assert_eq!(err, NmfError::Range(RangeError::Field { field, value }));
    }
}

#[test]
fn patch_checks_section_reference() {
    use pretty_assertions::assert_eq;
    let err = full_patch().section(2).apply(None, &[0, 5]).unwrap_err();
    assert_eq!(
        err,
        NmfError::Reference(ReferenceError::UnknownSection {
            section: 2,
            sections: 2
        })
    );

    let err = full_patch().time(4).section(1).apply(None, &[0, 5]).unwrap_err();
    assert_eq!(
        err,
        NmfError::Reference(ReferenceError::BeforeSection {
            time: 4,
            section: 1,
            offset: 5
        })
    );
}

#[test]
fn note_kind_follows_duration() {
    use pretty_assertions::assert_eq;
    let kind = |d| full_patch().duration(d).apply(None, &[0]).unwrap().kind();
    assert_eq!(kind(1), NoteKind::Regular);
    assert_eq!(kind(0), NoteKind::Cue);
    assert_eq!(kind(-1), NoteKind::Grace);
}

#[test]
fn record_bias_encoding() {
    use pretty_assertions::assert_eq;
    let note = full_patch().time(0x0102_0304).apply(None, &[0]).unwrap();
    let mut out = Vec::new();
    note.write(&mut out);

    assert_eq!(
        out,
        [
            0x01, 0x02, 0x03, 0x04, // time
            0x7F, 0xFF, 0xFF, 0xFD, // -3 + 2^31
            0x80, 0x30, // 48 + 2^15
            0x00, 0x3D, // 61
            0x00, 0x00, // section
            0xFF, 0xFF, // layer 65536, zero-based
        ]
    );

    let mut reader = Reader::from_byte_slice(&out);
    assert_eq!(Note::read(&mut reader, &[0]).unwrap(), note);
}
