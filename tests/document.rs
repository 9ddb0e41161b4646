use nmf::prelude::*;
use pretty_assertions::assert_eq;

fn note(time: i64, duration: i64, section: i64) -> NotePatch {
    NotePatch::new()
        .time(time)
        .duration(duration)
        .pitch(0)
        .articulation(0)
        .section(section)
        .layer(1)
}

#[test]
fn new_document_defaults() {
    let doc = NmfDocument::new();
    assert_eq!(doc.basis(), Basis::QUARTER_NOTE);
    assert_eq!(doc.basis().value(), -1);
    assert_eq!(doc.sections(), 1);
    assert_eq!(doc.offset(0), Ok(0));
    assert_eq!(doc.notes(), 0);
    assert_eq!(doc, NmfDocument::default());
}

#[test]
fn set_basis() {
    let mut doc = NmfDocument::new();
    doc.append(&note(0, 1, 0)).unwrap();

    for value in [44_100, 48_000, 1, 1024, -1] {
        doc.set_basis(value).unwrap();
        assert_eq!(doc.basis().value(), value);
    }

    let err = doc.set_basis(1025).unwrap_err();
    assert_eq!(err, NmfError::Encoding(EncodingError::Basis(1025)));
    assert_eq!(err.category(), ErrorCategory::Encoding);
    assert_eq!(doc.basis().value(), -1);
    assert_eq!(doc.notes(), 1);
}

#[test]
fn offset_out_of_range() {
    let doc = NmfDocument::new();
    assert_eq!(
        doc.offset(1),
        Err(NmfError::Usage(UsageError::SectionIndex { index: 1, len: 1 }))
    );
}

#[test]
fn sect_appends_non_decreasing() {
    let mut doc = NmfDocument::new();
    doc.sect(0).unwrap();
    doc.sect(96).unwrap();
    doc.sect(MAX_INT).unwrap();
    assert_eq!(doc.sections(), 4);
    assert_eq!(doc.section_offsets(), &[0, 0, 96, MAX_INT]);

    let err = doc.sect(MAX_INT - 1).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Range);
    let err = doc.sect(MAX_INT + 1).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Range);
    assert_eq!(doc.sections(), 4);
}

#[test]
fn sect_capacity() {
    let mut doc = NmfDocument::new();
    while doc.sections() < usize::from(MAX_SECT) {
        doc.sect(doc.sections() as u32).unwrap();
    }
    assert_eq!(doc.sections(), 65_535);

    let err = doc.sect(MAX_INT).unwrap_err();
    assert_eq!(err, NmfError::Capacity(CapacityError::Sections));
    assert_eq!(doc.sections(), 65_535);
}

#[test]
fn append_capacity() {
    let mut doc = NmfDocument::new();
    while doc.notes() < MAX_NOTE as usize {
        doc.append(&note(doc.notes() as i64, 1, 0)).unwrap();
    }
    assert_eq!(doc.notes(), 1_048_576);

    let err = doc.append(&note(0, 1, 0)).unwrap_err();
    assert_eq!(err, NmfError::Capacity(CapacityError::Notes));
    assert_eq!(err.category(), ErrorCategory::Capacity);
    assert_eq!(doc.notes(), 1_048_576);

    let bytes = doc.serialize().unwrap();
    assert_eq!(bytes.len(), 16 + 4 + 1_048_576 * 16);
    let parsed = NmfDocument::from_bytes(&bytes).unwrap();
    assert_eq!(parsed.notes(), MAX_NOTE as usize);
    assert_eq!(parsed, doc);
}

#[test]
fn append_and_get() {
    let mut doc = NmfDocument::new();
    doc.sect(100).unwrap();

    let patch = NotePatch::new()
        .time(150)
        .duration(-2)
        .pitch(-39)
        .articulation(7)
        .section(1)
        .layer(65_536);
    assert_eq!(doc.append(&patch), Ok(0));
    assert_eq!(doc.notes(), 1);

    let stored = doc.get(0).unwrap();
    assert_eq!(stored.time(), 150);
    assert_eq!(stored.duration(), -2);
    assert_eq!(stored.pitch(), -39);
    assert_eq!(stored.articulation(), 7);
    assert_eq!(stored.section(), 1);
    assert_eq!(stored.layer(), 65_536);
    assert_eq!(NotePatch::from_note(&stored), patch);

    assert_eq!(
        doc.get(1),
        Err(NmfError::Usage(UsageError::NoteIndex { index: 1, len: 1 }))
    );
}

#[test]
fn append_requires_every_field() {
    let mut doc = NmfDocument::new();
    for field in NoteField::ALL {
        let mut patch = NotePatch::new();
        for other in NoteField::ALL.into_iter().filter(|f| *f != field) {
            patch = patch.with(other, if other == NoteField::Layer { 1 } else { 0 });
        }
        let err = doc.append(&patch).unwrap_err();
        assert_eq!(err, NmfError::Usage(UsageError::MissingField(field)));
        assert_eq!(doc.notes(), 0);
    }
}

#[test]
fn append_checks_sections() {
    let mut doc = NmfDocument::new();
    doc.sect(10).unwrap();

    let err = doc.append(&note(0, 1, 2)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Reference);
    let err = doc.append(&note(9, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        NmfError::Reference(ReferenceError::BeforeSection {
            time: 9,
            section: 1,
            offset: 10
        })
    );
    assert_eq!(doc.notes(), 0);

    assert_eq!(doc.append(&note(10, 1, 1)), Ok(0));
}

#[test]
fn set_changes_only_supplied_fields() {
    let mut doc = NmfDocument::new();
    doc.append(&note(4, 1, 0).pitch(12).articulation(3).layer(2))
        .unwrap();
    let before = doc.get(0).unwrap();

    doc.set(0, &NotePatch::from_pairs([("dur", 5)]).unwrap())
        .unwrap();
    let after = doc.get(0).unwrap();

    assert_eq!(after.duration(), 5);
    for field in NoteField::ALL {
        if field != NoteField::Duration {
            assert_eq!(after.value(field), before.value(field), "{field}");
        }
    }
}

#[test]
fn set_is_all_or_nothing() {
    let mut doc = NmfDocument::new();
    doc.sect(10).unwrap();
    doc.append(&note(20, 1, 1)).unwrap();
    let before = doc.clone();

    // valid duration, invalid pitch
    let err = doc
        .set(0, &NotePatch::new().duration(7).pitch(100))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Range);
    assert_eq!(doc, before);

    // moving the note before its section
    let err = doc.set(0, &NotePatch::new().time(5)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Reference);
    assert_eq!(doc, before);

    // but together with a section change it is fine
    doc.set(0, &NotePatch::new().time(5).section(0)).unwrap();
    assert_eq!(doc.get(0).unwrap().time(), 5);
    assert_eq!(doc.get(0).unwrap().section(), 0);
}

#[test]
fn set_edge_cases() {
    let mut doc = NmfDocument::new();
    doc.append(&note(0, 1, 0)).unwrap();
    let before = doc.clone();

    doc.set(0, &NotePatch::new()).unwrap();
    assert_eq!(doc, before);

    assert_eq!(
        doc.set(1, &NotePatch::new().duration(1)),
        Err(NmfError::Usage(UsageError::NoteIndex { index: 1, len: 1 }))
    );

    let err = NotePatch::from_pairs([("dur", 1), ("velocity", 64)]).unwrap_err();
    assert_eq!(
        err,
        NmfError::Usage(UsageError::UnknownField("velocity".into()))
    );

    doc.set(0, &NotePatch::new().layer(3)).unwrap();
    assert_eq!(doc.get(0).unwrap().layer(), 3);
    assert_eq!(doc.get(0).unwrap().layer_index(), 2);
}

#[test]
fn sort_notes_by_time_then_duration() {
    let mut doc = NmfDocument::new();
    doc.append(&note(5, 0, 0)).unwrap();
    doc.append(&note(3, 2, 0)).unwrap();
    doc.append(&note(3, -1, 0)).unwrap();

    doc.sort_notes();

    let order: Vec<_> = doc
        .iter_notes()
        .map(|n| (n.time(), n.duration()))
        .collect();
    assert_eq!(order, [(3, -1), (3, 2), (5, 0)]);
    assert_eq!(doc.notes(), 3);
}

#[test]
fn sort_notes_is_stable() {
    let mut doc = NmfDocument::new();
    for pitch in [3, 1, 2] {
        doc.append(&note(0, 0, 0).pitch(pitch)).unwrap();
    }
    doc.append(&note(0, -5, 0)).unwrap();

    doc.sort_notes();

    let pitches: Vec<_> = doc.iter_notes().map(|n| n.pitch()).collect();
    assert_eq!(pitches, [0, 3, 1, 2]);
}
