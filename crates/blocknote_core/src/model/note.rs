//! Note and block domain model.
//!
//! # Responsibility
//! - Define the canonical note shape persisted in the storage slot.
//! - Provide mutation helpers that keep `updated_at` fresh.
//!
//! # Invariants
//! - `id` is an opaque, non-blank string that is never reassigned after
//!   creation. New ids are UUID v4 strings; stored records may carry any
//!   other shape (e.g. epoch-millisecond strings) and keep it.
//! - Block ids are unique within one note; block order is rendering order.
//! - Every mutation leaves `updated_at` strictly greater than before.
//! - Timestamps are kept at millisecond precision to match the wire format.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one note.
pub type NoteId = String;

/// Identifier of one block, unique within its note.
pub type BlockId = String;

/// UTC timestamp with millisecond precision.
pub type Timestamp = DateTime<Utc>;

/// Title given to notes created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled";

/// Emoji given to newly created notes.
pub const DEFAULT_NOTE_EMOJI: &str = "📝";

/// Content kind of one block.
///
/// Serialized with the external tags `heading`, `paragraph`, `bullet-list`
/// and `quote`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    /// Single-line heading.
    Heading,
    /// Free text. New blocks start as paragraphs.
    #[default]
    Paragraph,
    /// Raw text with one list item per line.
    BulletList,
    /// Quoted text.
    Quote,
}

/// Editing control used for a block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockControl {
    SingleLine,
    MultiLine,
}

impl BlockType {
    /// All block kinds in picker order.
    pub const ALL: [BlockType; 4] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::BulletList,
        BlockType::Quote,
    ];

    /// Stable wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::BulletList => "bullet-list",
            Self::Quote => "quote",
        }
    }

    /// Parses a wire tag.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "heading" => Some(Self::Heading),
            "paragraph" => Some(Self::Paragraph),
            "bullet-list" => Some(Self::BulletList),
            "quote" => Some(Self::Quote),
            _ => None,
        }
    }

    /// Short label shown in the block type picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Paragraph => "Text",
            Self::BulletList => "List",
            Self::Quote => "Quote",
        }
    }

    /// Placeholder shown while the block is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Heading => "Heading...",
            Self::Paragraph => "Text...",
            Self::BulletList => "List (one item per line)",
            Self::Quote => "Quote...",
        }
    }

    pub fn control(self) -> BlockControl {
        match self {
            Self::Heading => BlockControl::SingleLine,
            Self::Paragraph | Self::BulletList | Self::Quote => BlockControl::MultiLine,
        }
    }
}

/// One flat content block of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteBlock {
    pub id: BlockId,
    /// Serialized as `type` to match the persisted record shape.
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// Raw text. Bullet lists keep one item per line.
    pub content: String,
}

impl NoteBlock {
    /// Creates an empty block with a generated id.
    pub fn new(kind: BlockType) -> Self {
        Self::with_content(kind, String::new())
    }

    pub fn with_content(kind: BlockType, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            kind,
            content: content.into(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::with_content(BlockType::Paragraph, content)
    }
}

/// Canonical note record.
///
/// `legacy_content` carries the pre-block `content` string of migrated
/// records. It is written back unchanged and only feeds search/preview;
/// `blocks` is the editable body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub blocks: Vec<NoteBlock>,
    pub emoji: String,
    #[serde(with = "iso_millis")]
    pub created_at: Timestamp,
    #[serde(with = "iso_millis")]
    pub updated_at: Timestamp,
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub legacy_content: Option<String>,
}

impl Note {
    /// Creates a note with one empty paragraph and the default emoji.
    pub fn new(title: impl Into<String>) -> Self {
        Self::new_at(title, now_millis())
    }

    /// Creates a note stamped with the given creation time.
    ///
    /// # Invariants
    /// - `created_at == updated_at` on return.
    pub fn new_at(title: impl Into<String>, now: Timestamp) -> Self {
        let now = now.trunc_subsecs(3);
        Self {
            id: new_id(),
            title: title.into(),
            blocks: vec![NoteBlock::new(BlockType::Paragraph)],
            emoji: DEFAULT_NOTE_EMOJI.to_string(),
            created_at: now,
            updated_at: now,
            legacy_content: None,
        }
    }

    /// Refreshes `updated_at` to the current time.
    pub fn touch(&mut self) {
        self.touch_at(now_millis());
    }

    /// Refreshes `updated_at`, moving it forward by at least one millisecond.
    pub fn touch_at(&mut self, now: Timestamp) {
        let now = now.trunc_subsecs(3);
        let floor = self.updated_at + TimeDelta::milliseconds(1);
        self.updated_at = if now >= floor { now } else { floor };
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_emoji(&mut self, emoji: impl Into<String>) {
        self.emoji = emoji.into();
        self.touch();
    }

    pub fn replace_blocks(&mut self, blocks: Vec<NoteBlock>) {
        self.blocks = blocks;
        self.touch();
    }

    pub fn block(&self, block_id: &str) -> Option<&NoteBlock> {
        self.blocks.iter().find(|block| block.id == block_id)
    }

    /// Replaces one block's text. Returns `false` when the block is unknown.
    pub fn set_block_content(&mut self, block_id: &str, content: impl Into<String>) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|block| block.id == block_id) else {
            return false;
        };
        block.content = content.into();
        self.touch();
        true
    }

    /// Changes one block's kind, keeping its text. Returns `false` when the
    /// block is unknown.
    pub fn set_block_type(&mut self, block_id: &str, kind: BlockType) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|block| block.id == block_id) else {
            return false;
        };
        block.kind = kind;
        self.touch();
        true
    }

    /// Appends an empty block and returns its id.
    pub fn push_block(&mut self, kind: BlockType) -> BlockId {
        let block = NoteBlock::new(kind);
        let block_id = block.id.clone();
        self.blocks.push(block);
        self.touch();
        block_id
    }

    /// Removes one block. Returns `false` when the block is unknown.
    pub fn remove_block(&mut self, block_id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.id != block_id);
        if self.blocks.len() == before {
            return false;
        }
        self.touch();
        true
    }

    /// Concatenated block text, one block per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Validates persistence invariants.
    ///
    /// # Errors
    /// - `BlankId` when the note id is empty or whitespace.
    /// - `DuplicateBlockId` when two blocks share an id.
    /// - `UpdatedBeforeCreated` when `updated_at < created_at`.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::BlankId);
        }

        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(block.id.as_str()) {
                return Err(NoteValidationError::DuplicateBlockId(block.id.clone()));
            }
        }

        if self.updated_at < self.created_at {
            return Err(NoteValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }

        Ok(())
    }
}

/// Note invariant violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    BlankId,
    DuplicateBlockId(BlockId),
    UpdatedBeforeCreated {
        created_at: Timestamp,
        updated_at: Timestamp,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "note id must not be blank"),
            Self::DuplicateBlockId(block_id) => write!(f, "duplicate block id: {block_id}"),
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "updatedAt ({}) must be >= createdAt ({})",
                format_timestamp(*updated_at),
                format_timestamp(*created_at)
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Generates a fresh note or block id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time truncated to milliseconds.
pub fn now_millis() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Formats a timestamp as ISO-8601 UTC with milliseconds, e.g.
/// `2026-01-02T03:04:05.678Z`.
pub fn format_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 / ISO-8601 timestamp with offset into UTC.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc).trunc_subsecs(3))
}

/// Converts epoch milliseconds into a timestamp.
pub fn timestamp_from_millis(value: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(value)
}

mod iso_millis {
    use super::{format_timestamp, parse_timestamp, Timestamp};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp `{raw}`")))
    }
}
