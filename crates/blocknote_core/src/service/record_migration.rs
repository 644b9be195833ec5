//! On-read migration of persisted note records.
//!
//! # Responsibility
//! - Split the raw slot payload into independent records.
//! - Upgrade every record into the current `blocks`-based `Note` shape.
//!
//! # Invariants
//! - Only a payload that is not a JSON array fails decoding. A malformed
//!   record never takes its siblings with it.
//! - A record with a `blocks` array keeps its blocks in order.
//! - A record with a string `content` and no `blocks` gets exactly one
//!   paragraph block holding that string.
//! - A record with neither gets an empty block list.
//! - Missing or malformed scalar fields get defaults; ids are kept verbatim.

use crate::model::note::{
    new_id, parse_timestamp, timestamp_from_millis, BlockType, Note, NoteBlock, NoteId,
    Timestamp, DEFAULT_NOTE_EMOJI,
};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Loosely typed persisted record, current or legacy.
///
/// Every field is optional and untyped so that decoding an object never
/// fails; interpretation happens in [`migrate_record`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredNoteRecord {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub blocks: Option<Value>,
    /// Pre-block body. Only string values are meaningful.
    pub content: Option<Value>,
    pub emoji: Option<Value>,
    pub created_at: Option<Value>,
    pub updated_at: Option<Value>,
}

/// Loosely typed persisted block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StoredBlockRecord {
    id: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    content: Option<Value>,
}

/// Which upgrade rule produced a `Note`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationRule {
    /// Record already carried `blocks`.
    Current,
    /// Legacy string `content` became one paragraph block.
    LegacyContent,
    /// Neither `blocks` nor string `content`; body defaulted to empty.
    EmptyBody,
}

/// Decodes a slot payload and migrates every record.
///
/// Array elements that are not JSON objects are skipped with a warning. A
/// record without a usable id is keyed by its position (`record-<index>`) so
/// repeated reads of the same payload agree on it until the next write.
///
/// # Errors
/// Returns the JSON error when the payload is not a JSON array.
pub fn decode_collection(payload: &str) -> Result<Vec<Note>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(payload)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record: Option<StoredNoteRecord> = value
                .is_object()
                .then(|| serde_json::from_value(value).ok())
                .flatten();
            let Some(mut record) = record else {
                warn!("event=record_migrate module=storage status=skipped index={index}");
                return None;
            };
            if record.id.as_ref().and_then(id_from_value).is_none() {
                warn!("event=record_migrate module=storage status=degraded index={index} field=id");
                record.id = Some(Value::String(format!("record-{index}")));
            }
            Some(migrate_record(record).0)
        })
        .collect())
}

/// Upgrades one record into the current note shape.
pub fn migrate_record(record: StoredNoteRecord) -> (Note, MigrationRule) {
    let id = match record.id.as_ref().and_then(id_from_value) {
        Some(id) => id,
        None => {
            let generated = new_id();
            warn!("event=record_migrate module=storage status=degraded note_id={generated} field=id");
            generated
        }
    };

    let legacy_content = match record.content {
        Some(Value::String(text)) => Some(text),
        _ => None,
    };

    let (blocks, rule) = match (record.blocks, legacy_content.as_ref()) {
        (Some(Value::Array(items)), _) => (migrate_blocks(&id, items), MigrationRule::Current),
        (_, Some(text)) => (
            vec![NoteBlock::paragraph(text.clone())],
            MigrationRule::LegacyContent,
        ),
        (_, None) => (Vec::new(), MigrationRule::EmptyBody),
    };

    let (created_at, updated_at) = resolve_timestamps(
        &id,
        record.created_at.as_ref().and_then(parse_record_timestamp),
        record.updated_at.as_ref().and_then(parse_record_timestamp),
    );

    let note = Note {
        id,
        title: string_or_default(record.title, ""),
        blocks,
        emoji: string_or_default(record.emoji, DEFAULT_NOTE_EMOJI),
        created_at,
        updated_at,
        legacy_content,
    };
    (note, rule)
}

/// Repairs each block on its own; repeated block ids are regenerated.
fn migrate_blocks(note_id: &str, items: Vec<Value>) -> Vec<NoteBlock> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter_map(|item| migrate_block(note_id, item))
        .map(|mut block| {
            if !seen.insert(block.id.clone()) {
                block.id = new_id();
            }
            block
        })
        .collect()
}

fn migrate_block(note_id: &str, value: Value) -> Option<NoteBlock> {
    let record: Option<StoredBlockRecord> = value
        .is_object()
        .then(|| serde_json::from_value(value).ok())
        .flatten();
    let Some(record) = record else {
        warn!("event=block_migrate module=storage status=skipped note_id={note_id}");
        return None;
    };

    let kind = match record.kind.as_ref().and_then(Value::as_str) {
        Some(tag) => BlockType::parse(tag).unwrap_or_else(|| {
            warn!("event=block_migrate module=storage status=degraded note_id={note_id} field=type");
            BlockType::Paragraph
        }),
        None => BlockType::Paragraph,
    };

    Some(NoteBlock {
        id: record
            .id
            .as_ref()
            .and_then(id_from_value)
            .unwrap_or_else(new_id),
        kind,
        content: string_or_default(record.content, ""),
    })
}

/// Accepts non-blank strings verbatim and integers in decimal form.
fn id_from_value(value: &Value) -> Option<NoteId> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Some(number.to_string()),
        _ => None,
    }
}

fn string_or_default(value: Option<Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) => text,
        _ => default.to_string(),
    }
}

/// Accepts ISO-8601 strings and epoch-millisecond numbers.
fn parse_record_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(text) => parse_timestamp(text),
        Value::Number(number) => number.as_i64().and_then(timestamp_from_millis),
        _ => None,
    }
}

fn resolve_timestamps(
    note_id: &str,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
) -> (Timestamp, Timestamp) {
    match (created_at, updated_at) {
        (Some(created), Some(updated)) => (created, updated.max(created)),
        (Some(created), None) => {
            warn!("event=record_migrate module=storage status=degraded note_id={note_id} field=updatedAt");
            (created, created)
        }
        (None, Some(updated)) => {
            warn!("event=record_migrate module=storage status=degraded note_id={note_id} field=createdAt");
            (updated, updated)
        }
        (None, None) => {
            warn!("event=record_migrate module=storage status=degraded note_id={note_id} field=createdAt,updatedAt");
            (Timestamp::default(), Timestamp::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, migrate_record, MigrationRule, StoredNoteRecord};
    use crate::model::note::BlockType;
    use serde_json::json;

    fn record(value: serde_json::Value) -> StoredNoteRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_content_becomes_single_paragraph() {
        let (note, rule) = migrate_record(record(json!({
            "id": "11111111-2222-4333-8444-555555555555",
            "title": "old",
            "content": "hello",
            "emoji": "💡",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-02T10:00:00.000Z"
        })));
        assert_eq!(rule, MigrationRule::LegacyContent);
        assert_eq!(note.blocks.len(), 1);
        assert_eq!(note.blocks[0].kind, BlockType::Paragraph);
        assert_eq!(note.blocks[0].content, "hello");
        assert_eq!(note.legacy_content.as_deref(), Some("hello"));
    }

    #[test]
    fn non_string_content_is_treated_as_absent() {
        let (note, rule) = migrate_record(record(json!({
            "id": "1700000000000",
            "content": 42
        })));
        assert_eq!(rule, MigrationRule::EmptyBody);
        assert_eq!(note.id, "1700000000000");
        assert!(note.blocks.is_empty());
        assert_eq!(note.title, "");
        assert_eq!(note.emoji, "📝");
    }

    #[test]
    fn epoch_millis_timestamps_and_numeric_ids_are_accepted() {
        let (note, _) = migrate_record(record(json!({
            "id": 1_700_000_000_000_i64,
            "blocks": [],
            "createdAt": 1_700_000_000_000_i64,
            "updatedAt": 1_700_000_360_000_i64
        })));
        assert_eq!(note.id, "1700000000000");
        assert_eq!(note.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(note.updated_at.timestamp_millis(), 1_700_000_360_000);
    }

    #[test]
    fn missing_updated_at_falls_back_to_created_at() {
        let (note, _) = migrate_record(record(json!({
            "id": "n1",
            "blocks": [],
            "createdAt": "2024-05-01T10:00:00.000Z"
        })));
        assert_eq!(note.updated_at, note.created_at);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn malformed_blocks_are_repaired_in_place() {
        let (note, rule) = migrate_record(record(json!({
            "id": "n1",
            "blocks": [
                {"id": "b1", "type": "todo", "content": "call mom"},
                {"type": "quote", "content": "no id"},
                {"id": "b3", "type": "heading", "content": 7},
                "not a block"
            ]
        })));
        assert_eq!(rule, MigrationRule::Current);
        assert_eq!(note.blocks.len(), 3);
        assert_eq!(note.blocks[0].kind, BlockType::Paragraph);
        assert_eq!(note.blocks[0].content, "call mom");
        assert_eq!(note.blocks[1].kind, BlockType::Quote);
        assert!(!note.blocks[1].id.is_empty());
        assert_eq!(note.blocks[2].content, "");
        assert!(note.validate().is_ok());
    }

    #[test]
    fn repeated_block_ids_are_regenerated() {
        let (note, _) = migrate_record(record(json!({
            "id": "n1",
            "blocks": [
                {"id": "b1", "type": "paragraph", "content": "a"},
                {"id": "b1", "type": "paragraph", "content": "b"}
            ]
        })));
        assert_eq!(note.blocks[0].id, "b1");
        assert_ne!(note.blocks[1].id, "b1");
        assert!(note.validate().is_ok());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let notes = decode_collection(r#"[{"id":"keep"}, 3, null, "x"]"#).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "keep");
        assert!(decode_collection(r#"{"id":"keep"}"#).is_err());
    }

    #[test]
    fn records_without_id_get_a_positional_id() {
        let payload = r#"[{"id":"a"}, {"title":"orphan"}]"#;
        let first = decode_collection(payload).unwrap();
        let second = decode_collection(payload).unwrap();
        assert_eq!(first[1].id, "record-1");
        assert_eq!(first[1].id, second[1].id);
        assert_eq!(first[1].title, "orphan");
    }
}
