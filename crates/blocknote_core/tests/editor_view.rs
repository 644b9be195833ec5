use blocknote_core::{
    BlockControl, BlockType, EditorView, Note, NoteBlock, NoteEditor, NoteView,
    DEFAULT_NOTE_TITLE, EMOJI_PALETTE,
};

fn editing(note: &Note) -> NoteEditor {
    let mut editor = NoteEditor::new();
    editor.sync(Some(note));
    editor
}

fn note_view(editor: &NoteEditor) -> NoteView {
    match editor.view() {
        EditorView::Note(view) => view,
        EditorView::Empty(state) => panic!("expected note view, got {state:?}"),
    }
}

#[test]
fn empty_editor_shows_selection_prompt() {
    let editor = NoteEditor::new();
    let EditorView::Empty(state) = editor.view() else {
        panic!("expected empty state");
    };
    assert_eq!(state.headline, "Select a note to edit");
    assert_eq!(
        state.hint,
        "Choose a note from the sidebar or create a new one"
    );
}

#[test]
fn sync_with_same_id_keeps_local_copies() {
    let note = Note::new("local");
    let mut editor = editing(&note);
    editor.set_title("typed locally");

    let mut outside = note.clone();
    outside.rename("changed elsewhere");
    editor.sync(Some(&outside));

    assert_eq!(editor.title(), "typed locally");
}

#[test]
fn sync_with_new_id_replaces_local_copies() {
    let first = Note::new("first");
    let mut second = Note::new("second");
    second.set_emoji("🔥");
    let mut editor = editing(&first);
    editor.set_title("draft");

    editor.sync(Some(&second));
    assert_eq!(editor.note_id(), Some(second.id.as_str()));
    assert_eq!(editor.title(), "second");
    assert_eq!(editor.emoji(), "🔥");
    assert_eq!(editor.blocks(), second.blocks.as_slice());

    editor.sync(None);
    assert!(matches!(editor.view(), EditorView::Empty(_)));
    assert!(editor.set_title("lost").is_none());
}

#[test]
fn every_edit_emits_a_full_note_with_newer_timestamp() {
    let note = Note::new("t");
    let first_block = note.blocks[0].id.clone();
    let mut editor = editing(&note);
    let mut last = note.updated_at;

    let edits = [
        editor.set_title("Shopping List"),
        editor.set_emoji("📋"),
        editor.set_block_content(&first_block, "weekly run"),
        editor.set_block_type(&first_block, BlockType::Heading),
        editor.add_block(),
    ];

    for edit in edits {
        let updated = edit.unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at > last);
        last = updated.updated_at;
    }
}

#[test]
fn edits_accumulate_on_the_base_note() {
    let note = Note::new("t");
    let first_block = note.blocks[0].id.clone();
    let mut editor = editing(&note);

    editor.set_title("Shopping List");
    editor.set_emoji("📋");
    let updated = editor.set_block_content(&first_block, "milk").unwrap();

    assert_eq!(updated.title, "Shopping List");
    assert_eq!(updated.emoji, "📋");
    assert_eq!(updated.blocks[0].content, "milk");
}

#[test]
fn added_blocks_default_to_paragraph_at_the_end() {
    let mut note = Note::new("t");
    note.replace_blocks(vec![
        NoteBlock::with_content(BlockType::Heading, "Groceries"),
        NoteBlock::paragraph("weekly"),
    ]);
    let mut editor = editing(&note);

    let updated = editor.add_block().unwrap();
    assert_eq!(updated.blocks.len(), 3);
    let added = updated.blocks.last().unwrap();
    assert_eq!(added.kind, BlockType::Paragraph);
    assert!(added.content.is_empty());
    assert_eq!(updated.blocks[0].content, "Groceries");
}

#[test]
fn deleting_the_only_block_leaves_an_empty_body() {
    let note = Note::new("t");
    let only = note.blocks[0].id.clone();
    let mut editor = editing(&note);

    let updated = editor.delete_block(&only).unwrap();
    assert!(updated.blocks.is_empty());
    assert!(note_view(&editor).blocks.is_empty());
}

#[test]
fn changing_block_type_keeps_text() {
    let mut note = Note::new("t");
    let first = note.blocks[0].id.clone();
    note.set_block_content(&first, "keep me");
    let mut editor = editing(&note);

    let updated = editor.set_block_type(&first, BlockType::Quote).unwrap();
    assert_eq!(updated.blocks[0].kind, BlockType::Quote);
    assert_eq!(updated.blocks[0].content, "keep me");
}

#[test]
fn view_describes_controls_and_placeholders() {
    let mut note = Note::new("");
    note.replace_blocks(vec![
        NoteBlock::new(BlockType::Heading),
        NoteBlock::new(BlockType::Paragraph),
        NoteBlock::new(BlockType::BulletList),
        NoteBlock::new(BlockType::Quote),
    ]);
    let editor = editing(&note);
    let view = note_view(&editor);

    assert_eq!(view.note_id, note.id);
    assert_eq!(view.title, "");
    assert_eq!(view.title_placeholder, DEFAULT_NOTE_TITLE);
    assert_eq!(view.palette, &EMOJI_PALETTE);
    assert!(view.last_edited.starts_with("Last edited "));

    let controls: Vec<BlockControl> = view.blocks.iter().map(|block| block.control).collect();
    assert_eq!(
        controls,
        vec![
            BlockControl::SingleLine,
            BlockControl::MultiLine,
            BlockControl::MultiLine,
            BlockControl::MultiLine,
        ]
    );
    for block in &view.blocks {
        assert_eq!(block.placeholder, block.kind.placeholder());
        assert_eq!(block.type_options.len(), BlockType::ALL.len());
    }
    let labels: Vec<&str> = view.blocks[0]
        .type_options
        .iter()
        .map(|(_, label)| *label)
        .collect();
    assert_eq!(labels, vec!["Heading", "Text", "List", "Quote"]);
}
