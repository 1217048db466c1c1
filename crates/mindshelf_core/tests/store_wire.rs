use chrono::{TimeZone, Utc};
use mindshelf_core::repo::http_store::ThoughtListEnvelope;
use mindshelf_core::{Modality, StoreError, ThoughtRecord, ThoughtValidationError};
use serde_json::json;

#[test]
fn naive_created_at_is_read_as_utc() {
    let record: ThoughtRecord = serde_json::from_value(json!({
        "id": "t-1",
        "created_at": "2025-01-10T12:00:00"
    }))
    .unwrap();

    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    );
}

#[test]
fn space_separated_created_at_with_fraction_is_accepted() {
    let record: ThoughtRecord = serde_json::from_value(json!({
        "id": "t-1",
        "created_at": "2025-01-10 08:30:15.250"
    }))
    .unwrap();

    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 30, 15).unwrap() + chrono::Duration::milliseconds(250)
    );
}

#[test]
fn offset_created_at_is_normalized_to_utc() {
    let record: ThoughtRecord = serde_json::from_value(json!({
        "id": "t-1",
        "created_at": "2025-01-10T12:00:00+02:00"
    }))
    .unwrap();

    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap()
    );
}

#[test]
fn unparseable_created_at_is_rejected() {
    let result = serde_json::from_value::<ThoughtRecord>(json!({
        "id": "t-1",
        "created_at": "last tuesday"
    }));

    let message = result.unwrap_err().to_string();
    assert!(message.contains("invalid timestamp"), "{message}");
}

#[test]
fn null_modality_and_folder_fall_back_to_defaults() {
    let record: ThoughtRecord = serde_json::from_value(json!({
        "id": "t-1",
        "modality": null,
        "folder": null,
        "created_at": "2025-01-10T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(record.modality, Modality::Other);
    assert_eq!(record.folder, "");
}

#[test]
fn unknown_modality_reads_as_other() {
    let record: ThoughtRecord = serde_json::from_value(json!({
        "id": "t-1",
        "modality": "hologram",
        "created_at": "2025-01-10T12:00:00Z"
    }))
    .unwrap();

    assert_eq!(record.modality, Modality::Other);
}

#[test]
fn blank_or_garbled_updated_at_falls_back_to_created_at() {
    for updated_at in [json!(""), json!(null), json!("not a time")] {
        let record: ThoughtRecord = serde_json::from_value(json!({
            "id": "t-1",
            "created_at": "2025-01-10T12:00:00Z",
            "updated_at": updated_at
        }))
        .unwrap();

        assert_eq!(record.updated_at, None);
        assert_eq!(record.effective_updated_at(), record.created_at);
    }
}

#[test]
fn envelope_with_null_or_missing_items_is_empty() {
    let null_items: ThoughtListEnvelope = serde_json::from_value(json!({ "items": null })).unwrap();
    let missing_items: ThoughtListEnvelope = serde_json::from_value(json!({})).unwrap();

    assert!(null_items.into_records().unwrap().is_empty());
    assert!(missing_items.into_records().unwrap().is_empty());
}

#[test]
fn envelope_returns_records_in_wire_order() {
    let envelope: ThoughtListEnvelope = serde_json::from_value(json!({
        "items": [
            { "id": "b", "folder": "tasks", "created_at": "2025-01-02T00:00:00Z" },
            { "id": "a", "folder": "tasks", "created_at": "2025-01-01" }
        ]
    }))
    .unwrap();

    let records = envelope.into_records().unwrap();

    let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(
        records[1].created_at,
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn envelope_with_blank_id_is_rejected() {
    let envelope: ThoughtListEnvelope = serde_json::from_value(json!({
        "items": [
            { "id": "ok", "created_at": "2025-01-02T00:00:00Z" },
            { "id": "", "created_at": "2025-01-02T00:00:00Z" }
        ]
    }))
    .unwrap();

    match envelope.into_records().unwrap_err() {
        StoreError::Validation(err) => assert_eq!(err, ThoughtValidationError::EmptyId),
        other => panic!("unexpected error: {other}"),
    }
}
