use memo_core::{derive_title, Note, NoteValidationError};

#[test]
fn derived_title_takes_first_ten_characters() {
    let note = Note::with_derived_title("Buy milk and eggs");

    assert_eq!(note.title(), "Buy milk a");
    assert_eq!(note.body(), "Buy milk and eggs");
    assert_eq!(note.time_created(), note.time_last_edited());
}

#[test]
fn derived_title_uses_whole_short_body() {
    for body in ["", "a", "ten chars!", "shopping"] {
        let note = Note::with_derived_title(body);
        assert_eq!(note.title(), body);
    }
}

#[test]
fn derived_title_matches_body_prefix_for_long_bodies() {
    let bodies = [
        "12345678901",
        "a longer note body with many words",
        "emoji 🎉🎉🎉🎉🎉 inside",
    ];
    for body in bodies {
        let expected: String = body.chars().take(10).collect();
        assert_eq!(derive_title(body), expected);
        assert_eq!(Note::with_derived_title(body).title(), expected);
    }
}

#[test]
fn explicit_title_is_kept() {
    let note = Note::with_title("whatever the body says", "Chosen");
    assert_eq!(note.title(), "Chosen");
}

#[test]
fn update_body_keeps_title_and_creation_time() {
    let mut note = Note::new("Hello", "Greeting", Some(1_000), Some(1_000)).unwrap();

    let updated = note.update_body_at("Hello world", 2_000).clone();

    assert_eq!(updated.body(), "Hello world");
    assert_eq!(updated.title(), "Greeting");
    assert_eq!(updated.time_created(), 1_000);
    assert_eq!(updated.time_last_edited(), 2_000);
    assert_eq!(updated, note);
}

#[test]
fn update_body_with_wall_clock_never_precedes_creation() {
    let mut note = Note::with_derived_title("draft");
    let created = note.time_created();

    for text in ["d", "dr", "dra", "draft two"] {
        note.update_body(text);
        assert_eq!(note.time_created(), created);
        assert!(note.time_last_edited() >= note.time_created());
    }
    assert_eq!(note.title(), "draft");
}

#[test]
fn update_body_does_not_rederive_title() {
    let mut note = Note::with_derived_title("first body");
    note.update_body("completely different text");
    assert_eq!(note.title(), "first body");
}

#[test]
fn equality_compares_all_four_fields() {
    let base = Note::new("body", "title", Some(1), Some(2)).unwrap();

    assert_eq!(base, Note::new("body", "title", Some(1), Some(2)).unwrap());
    assert_ne!(base, Note::new("other", "title", Some(1), Some(2)).unwrap());
    assert_ne!(base, Note::new("body", "other", Some(1), Some(2)).unwrap());
    assert_ne!(base, Note::new("body", "title", Some(0), Some(2)).unwrap());
    assert_ne!(base, Note::new("body", "title", Some(1), Some(3)).unwrap());
}

#[test]
fn created_at_same_time_ignores_other_fields() {
    let first = Note::new("a", "a", Some(7), Some(7)).unwrap();
    let second = Note::new("b", "b", Some(7), Some(9)).unwrap();
    let third = Note::new("a", "a", Some(8), Some(8)).unwrap();

    assert!(first.created_at_same_time(&second));
    assert!(!first.created_at_same_time(&third));
}

#[test]
fn encode_then_decode_restores_equal_note() {
    let mut note = Note::new("line one\nline two", "line one", Some(1_700_000_000_000), None)
        .unwrap();
    note.update_body_at("line one\nline two\nline three", 1_700_000_360_000);

    let decoded = Note::decode(&note.encode().unwrap()).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn encode_uses_expected_wire_fields() {
    let note = Note::new("body text", "title", Some(10), Some(20)).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&note.encode().unwrap()).unwrap();
    assert_eq!(json["body"], "body text");
    assert_eq!(json["title"], "title");
    assert_eq!(json["timeCreated"], 10);
    assert_eq!(json["timeLastEdited"], 20);
}

#[test]
fn decode_returns_none_for_missing_or_mistyped_fields() {
    let cases: [&[u8]; 6] = [
        br#"{"title":"t","timeCreated":1,"timeLastEdited":1}"#,
        br#"{"body":"b","timeCreated":1,"timeLastEdited":1}"#,
        br#"{"body":"b","title":"t","timeLastEdited":1}"#,
        br#"{"body":"b","title":"t","timeCreated":1}"#,
        br#"{"body":"b","title":"t","timeCreated":"yesterday","timeLastEdited":1}"#,
        b"not json at all",
    ];
    for blob in cases {
        assert_eq!(Note::decode(blob), None);
    }
}

#[test]
fn decode_rejects_reversed_timestamps() {
    let blob = br#"{"body":"b","title":"t","timeCreated":200,"timeLastEdited":100}"#;
    assert_eq!(Note::decode(blob), None);

    let err = serde_json::from_slice::<Note>(blob).unwrap_err();
    assert!(
        err.to_string()
            .contains("timeLastEdited (100) must be >= timeCreated (200)"),
        "unexpected error: {err}"
    );
}

#[test]
fn new_rejects_reversed_window() {
    let err = Note::new("b", "t", Some(5), Some(4)).unwrap_err();
    assert_eq!(
        err,
        NoteValidationError::InvalidEditWindow {
            created: 5,
            last_edited: 4,
        }
    );
}
