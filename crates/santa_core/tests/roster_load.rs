use santa_core::{load_roster, parse_roster, ParticipantValidationError, RosterError};
use std::io::Write;

#[test]
fn parses_records_in_order_with_extra_fields() {
    let json = r#"[
        {"name": "Ann", "address": "ann@example.com", "wishlist": "socks"},
        {"name": "Bob", "address": "bob@example.com"},
        {"address": "cy@example.com", "budget": "20"}
    ]"#;

    let participants = parse_roster(json).unwrap();
    assert_eq!(participants.len(), 3);
    assert_eq!(participants[0].name, "Ann");
    assert_eq!(participants[0].field("wishlist"), Some("socks"));
    assert_eq!(participants[1].address, "bob@example.com");
    assert!(participants[1].extra.is_empty());
    assert_eq!(participants[2].name, "");
    assert_eq!(participants[2].field("budget"), Some("20"));
}

#[test]
fn rejects_invalid_address_with_entry_index() {
    let json = r#"[
        {"name": "Ann", "address": "ann@example.com"},
        {"name": "Bob", "address": "bob"}
    ]"#;

    let err = parse_roster(json).unwrap_err();
    match err {
        RosterError::InvalidParticipant { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(
                source,
                ParticipantValidationError::MalformedAddress("bob".to_string())
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_address_the_mailer_cannot_parse() {
    let json = r#"[
        {"name": "Bob", "address": "bob@example.com"},
        {"name": "Ann", "address": "ann smith@example.com"},
        {"name": "Cy", "address": "cy@example.com"}
    ]"#;

    let err = parse_roster(json).unwrap_err();
    match err {
        RosterError::InvalidParticipant { index, source } => {
            assert_eq!(index, 1);
            assert_eq!(
                source,
                ParticipantValidationError::MalformedAddress("ann smith@example.com".to_string())
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_non_array_document() {
    let err = parse_roster(r#"{"name": "Ann", "address": "ann@example.com"}"#).unwrap_err();
    assert!(matches!(err, RosterError::Parse(_)));
}

#[test]
fn rejects_missing_address() {
    let err = parse_roster(r#"[{"name": "Ann"}]"#).unwrap_err();
    assert!(matches!(err, RosterError::Parse(_)));
}

#[test]
fn rejects_non_string_extra_field() {
    let err = parse_roster(r#"[{"name": "Ann", "address": "ann@example.com", "budget": 20}]"#)
        .unwrap_err();
    assert!(matches!(err, RosterError::Parse(_)));
}

#[test]
fn loads_roster_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let participants = serde_json::json!([
        {"name": "Ann", "address": "ann@example.com"},
        {"name": "Bob", "address": "bob@example.com"}
    ]);
    write!(file, "{participants}").unwrap();

    let loaded = load_roster(file.path()).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].name, "Bob");
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.json");

    let err = load_roster(&path).unwrap_err();
    assert!(matches!(err, RosterError::Io { .. }));
    assert!(err.to_string().contains("people.json"));
}
