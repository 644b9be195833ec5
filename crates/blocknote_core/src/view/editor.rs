//! Headless editor view model for one note.
//!
//! # Responsibility
//! - Hold local editable copies of title, emoji and blocks.
//! - Turn every field-level edit into a full updated `Note` for the caller
//!   to persist; there is no draft state or save button.
//! - Describe what to render as a plain data tree (`EditorView`).
//!
//! # Invariants
//! - Local copies resync only when the edited note's identity changes.
//! - Every emitted note has `updated_at` strictly after the previous one.
//! - New blocks default to `BlockType::Paragraph` and append at the end.

use crate::model::note::{
    BlockControl, BlockId, BlockType, Note, NoteBlock, NoteId, DEFAULT_NOTE_EMOJI,
    DEFAULT_NOTE_TITLE,
};
use crate::view::format::last_edited_label;
use crate::view::EmptyState;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed emoji palette offered by the picker.
pub const EMOJI_PALETTE: [&str; 10] = ["📝", "💡", "🎯", "📚", "✨", "🔥", "💭", "🎨", "📋", "⭐"];

const EMPTY_EDITOR: EmptyState = EmptyState {
    headline: "Select a note to edit",
    hint: "Choose a note from the sidebar or create a new one",
};

/// Render tree for the editor pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorView {
    Empty(EmptyState),
    Note(NoteView),
}

/// Editable projection of the selected note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub note_id: NoteId,
    pub emoji: String,
    pub title: String,
    pub title_placeholder: &'static str,
    pub palette: &'static [&'static str],
    pub blocks: Vec<BlockView>,
    pub last_edited: String,
}

/// One block row: type picker, input control and delete affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub block_id: BlockId,
    pub kind: BlockType,
    pub control: BlockControl,
    pub placeholder: &'static str,
    pub content: String,
    /// `(kind, label)` pairs for the type picker.
    pub type_options: Vec<(BlockType, &'static str)>,
}

impl BlockView {
    fn from_block(block: &NoteBlock) -> Self {
        Self {
            block_id: block.id.clone(),
            kind: block.kind,
            control: block.kind.control(),
            placeholder: block.kind.placeholder(),
            content: block.content.clone(),
            type_options: BlockType::ALL
                .iter()
                .map(|kind| (*kind, kind.label()))
                .collect(),
        }
    }
}

/// Editor state for at most one note.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    base: Option<Note>,
    title: String,
    emoji: String,
    blocks: Vec<NoteBlock>,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self {
            base: None,
            title: String::new(),
            emoji: DEFAULT_NOTE_EMOJI.to_string(),
            blocks: Vec::new(),
        }
    }
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the editor at `note`.
    ///
    /// A different note id resyncs the local copies. The same id only
    /// refreshes the base note that later edits are applied to.
    pub fn sync(&mut self, note: Option<&Note>) {
        let Some(note) = note else {
            self.base = None;
            return;
        };

        let switched = self.note_id() != Some(note.id.as_str());
        if switched {
            debug!("event=editor_sync module=view status=ok note_id={}", note.id);
            self.title = note.title.clone();
            self.emoji = note.emoji.clone();
            self.blocks = note.blocks.clone();
        }
        self.base = Some(note.clone());
    }

    pub fn note_id(&self) -> Option<&str> {
        self.base.as_ref().map(|note| note.id.as_str())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    pub fn blocks(&self) -> &[NoteBlock] {
        &self.blocks
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) -> Option<Note> {
        let title = title.into();
        self.title = title.clone();
        self.commit(|note| note.rename(title))
    }

    /// Replaces the emoji.
    pub fn set_emoji(&mut self, emoji: impl Into<String>) -> Option<Note> {
        let emoji = emoji.into();
        self.emoji = emoji.clone();
        self.commit(|note| note.set_emoji(emoji))
    }

    /// Picks a palette emoji uniformly at random with the thread RNG.
    pub fn randomize_emoji(&mut self) -> Option<Note> {
        self.randomize_emoji_with(&mut rand::thread_rng())
    }

    /// Picks a palette emoji uniformly at random with `rng`.
    pub fn randomize_emoji_with<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Option<Note> {
        let emoji = EMOJI_PALETTE
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_NOTE_EMOJI);
        self.set_emoji(emoji)
    }

    /// Replaces the text of one block.
    pub fn set_block_content(
        &mut self,
        block_id: &str,
        content: impl Into<String>,
    ) -> Option<Note> {
        let content = content.into();
        let block = self.blocks.iter_mut().find(|block| block.id == block_id)?;
        block.content = content;
        self.commit_blocks()
    }

    /// Changes the kind of one block, keeping its text.
    pub fn set_block_type(&mut self, block_id: &str, kind: BlockType) -> Option<Note> {
        let block = self.blocks.iter_mut().find(|block| block.id == block_id)?;
        block.kind = kind;
        self.commit_blocks()
    }

    /// Appends an empty paragraph block.
    pub fn add_block(&mut self) -> Option<Note> {
        self.add_block_of(BlockType::default())
    }

    /// Appends an empty block of `kind`.
    pub fn add_block_of(&mut self, kind: BlockType) -> Option<Note> {
        self.blocks.push(NoteBlock::new(kind));
        self.commit_blocks()
    }

    /// Removes one block.
    pub fn delete_block(&mut self, block_id: &str) -> Option<Note> {
        let before = self.blocks.len();
        self.blocks.retain(|block| block.id != block_id);
        if self.blocks.len() == before {
            return None;
        }
        self.commit_blocks()
    }

    /// Builds the render tree for the current state.
    pub fn view(&self) -> EditorView {
        let Some(note) = self.base.as_ref() else {
            return EditorView::Empty(EMPTY_EDITOR);
        };

        EditorView::Note(NoteView {
            note_id: note.id.clone(),
            emoji: self.emoji.clone(),
            title: self.title.clone(),
            title_placeholder: DEFAULT_NOTE_TITLE,
            palette: &EMOJI_PALETTE,
            blocks: self.blocks.iter().map(BlockView::from_block).collect(),
            last_edited: last_edited_label(note.updated_at),
        })
    }

    fn commit_blocks(&mut self) -> Option<Note> {
        let blocks = self.blocks.clone();
        self.commit(|note| note.replace_blocks(blocks))
    }

    /// Applies one field change to a copy of the base note and makes the
    /// result the new base.
    fn commit(&mut self, apply: impl FnOnce(&mut Note)) -> Option<Note> {
        let base = self.base.as_mut()?;
        let mut updated = base.clone();
        apply(&mut updated);
        *base = updated.clone();
        Some(updated)
    }
}
