mod common;

use common::{RawNote, create_nmf_bytes};
use nmf::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn minimal_file() {
    let bytes = create_nmf_bytes(0, &[0], &[RawNote::cue(0)]);
    let doc = NmfDocument::from_bytes(&bytes).unwrap();

    assert_eq!(doc.basis().value(), -1);
    assert_eq!(doc.section_offsets(), &[0]);
    assert_eq!(doc.notes(), 1);

    let note = doc.get(0).unwrap();
    assert_eq!(note.time(), 0);
    assert_eq!(note.duration(), 0);
    assert_eq!(note.pitch(), 0);
    assert_eq!(note.articulation(), 0);
    assert_eq!(note.section(), 0);
    assert_eq!(note.layer(), 1);
    assert_eq!(note.kind(), NoteKind::Cue);

    assert_eq!(doc.serialize().unwrap(), bytes);
}

#[test]
fn parse_then_serialize_is_identity() {
    let notes = [
        RawNote {
            time: 960,
            duration: 0x8000_0000 + 96,
            pitch: 0x8000 - 39,
            art: 61,
            sect: 2,
            layer: 0xFFFF,
        },
        RawNote {
            time: 0,
            duration: 0x8000_0000 - 32_767,
            pitch: 0x8000 + 48,
            art: 0,
            sect: 0,
            layer: 3,
        },
        RawNote::cue(480),
    ];
    for code in [0, 1, 2, 3, 500, 1026] {
        let bytes = create_nmf_bytes(code, &[0, 480, 960], &notes);
        let doc = NmfDocument::from_bytes(&bytes).unwrap();
        assert_eq!(doc.serialize().unwrap(), bytes);
    }
}

#[test]
fn serialize_then_parse_rebuilds_state() {
    let mut doc = NmfDocument::new();
    doc.set_basis(44_100).unwrap();
    doc.sect(44_100).unwrap();
    doc.sect(88_200).unwrap();
    doc.append(
        &NotePatch::new()
            .time(88_200)
            .duration(32_767)
            .pitch(48)
            .articulation(12)
            .section(2)
            .layer(7),
    )
    .unwrap();
    doc.append(
        &NotePatch::new()
            .time(44_100)
            .duration(-32_767)
            .pitch(-39)
            .articulation(0)
            .section(1)
            .layer(1),
    )
    .unwrap();

    let bytes = doc.serialize().unwrap();
    assert_eq!(bytes.len(), doc.header().file_len());
    assert_eq!(bytes.len(), 16 + 3 * 4 + 2 * 16);

    let parsed = NmfDocument::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, doc);
    assert_eq!(parsed.serialize().unwrap(), bytes);
}

#[test]
fn trailing_bytes_are_ignored() {
    let bytes = create_nmf_bytes(2, &[0], &[RawNote::cue(7)]);
    let mut padded = bytes.clone();
    padded.extend_from_slice(b"trailing garbage");

    let doc = NmfDocument::try_from(padded.as_slice()).unwrap();
    assert_eq!(doc.get(0).unwrap().time(), 7);
    assert_eq!(doc.serialize().unwrap(), bytes);
}

#[test]
fn parse_replaces_previous_state() {
    let mut doc = NmfDocument::new();
    doc.sect(5).unwrap();
    doc.sect(6).unwrap();
    doc.append(
        &NotePatch::from_pairs([
            ("time", 6),
            ("dur", 1),
            ("pitch", 2),
            ("art", 3),
            ("sect", 2),
            ("layer", 4),
        ])
        .unwrap(),
    )
    .unwrap();

    let bytes = create_nmf_bytes(1, &[0], &[RawNote::cue(1), RawNote::cue(2)]);
    doc.parse(&bytes).unwrap();

    assert_eq!(doc.basis(), Basis::HZ_44100);
    assert_eq!(doc.sections(), 1);
    assert_eq!(doc.notes(), 2);
}

#[test]
fn empty_document_cannot_serialize() {
    let doc = NmfDocument::new();
    let err = doc.serialize().unwrap_err();
    assert_eq!(err, NmfError::Usage(UsageError::EmptyDocument));
}
