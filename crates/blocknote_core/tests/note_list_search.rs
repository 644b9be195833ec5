use blocknote_core::model::note::parse_timestamp;
use blocknote_core::{
    filter_notes, note_matches, BlockType, InMemorySlotRepository, ListIntent, Note,
    NoteListView, NoteStorage, NotesController, Timestamp,
};
use chrono::TimeDelta;
use proptest::prelude::*;

fn now() -> Timestamp {
    parse_timestamp("2026-03-04T12:00:00.000Z").unwrap()
}

fn shopping_and_recipes() -> Vec<Note> {
    let mut shopping = Note::new_at("Shopping List", now());
    let list = shopping.push_block(BlockType::BulletList);
    shopping.set_block_content(&list, "milk\neggs");
    let mut recipes = Note::new_at("Recipe Ideas", now());
    let first = recipes.blocks[0].id.clone();
    recipes.set_block_content(&first, "pancakes with syrup");
    for note in [&mut shopping, &mut recipes] {
        note.updated_at = note.created_at;
    }
    vec![shopping, recipes]
}

#[test]
fn search_matches_title_case_insensitively() {
    let notes = shopping_and_recipes();
    for query in ["shop", "SHOP", "Shop"] {
        let hits = filter_notes(&notes, query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Shopping List");
    }
}

#[test]
fn search_matches_block_and_legacy_content() {
    let mut notes = shopping_and_recipes();
    assert_eq!(filter_notes(&notes, "EGGS")[0].title, "Shopping List");
    assert_eq!(filter_notes(&notes, "syrup")[0].title, "Recipe Ideas");

    let mut legacy = Note::new_at("Old", now());
    legacy.legacy_content = Some("Imported Body".to_string());
    notes.push(legacy);
    assert_eq!(filter_notes(&notes, "imported")[0].title, "Old");
}

#[test]
fn empty_query_matches_everything() {
    let notes = shopping_and_recipes();
    assert_eq!(filter_notes(&notes, "").len(), 2);
    assert!(filter_notes(&notes, "absent").is_empty());
}

#[test]
fn rows_fall_back_for_untitled_and_empty_notes() {
    let untitled = Note::new_at("", now());
    let view = NoteListView::new();

    let listing = view.render(std::slice::from_ref(&untitled), None, now());
    let row = &listing.rows[0];
    assert_eq!(row.title, "Untitled");
    assert_eq!(row.preview, "No content");
    assert_eq!(row.emoji, "📝");
    assert_eq!(row.modified, "Just now");
    assert!(!row.is_selected);
    assert!(listing.empty_state.is_none());
}

#[test]
fn rows_keep_collection_order_and_mark_selection() {
    let notes = shopping_and_recipes();
    let view = NoteListView::new();

    let listing = view.render(&notes, Some(notes[1].id.as_str()), now());
    let titles: Vec<&str> = listing.rows.iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["Shopping List", "Recipe Ideas"]);
    assert!(!listing.rows[0].is_selected);
    assert!(listing.rows[1].is_selected);
    assert_eq!(listing.rows[0].preview, "milk eggs");
}

#[test]
fn modified_label_uses_age_relative_to_render_time() {
    let notes = shopping_and_recipes();
    let view = NoteListView::new();

    let listing = view.render(&notes, None, now() + TimeDelta::minutes(5));
    assert_eq!(listing.rows[0].modified, "5 min ago");
    let listing = view.render(&notes, None, now() + TimeDelta::days(3));
    assert_eq!(listing.rows[0].modified, "Mar 4, 2026");
}

#[test]
fn no_surviving_rows_shows_empty_state() {
    let mut view = NoteListView::new();
    let listing = view.render(&[], None, now());
    let empty = listing.empty_state.unwrap();
    assert_eq!(empty.headline, "No notes yet");
    assert_eq!(empty.hint, "Create your first note to get started");

    view.set_query("nothing matches");
    let listing = view.render(&shopping_and_recipes(), None, now());
    assert!(listing.rows.is_empty());
    assert!(listing.empty_state.is_some());
    assert_eq!(listing.query, "nothing matches");

    view.clear_query();
    assert_eq!(view.query(), "");
    assert_eq!(view.render(&shopping_and_recipes(), None, now()).rows.len(), 2);
}

#[test]
fn clicks_become_intents() {
    let notes = shopping_and_recipes();
    let view = NoteListView::new();
    assert_eq!(view.click_create(), ListIntent::Create);
    assert_eq!(
        view.click_row(&notes[0].id),
        ListIntent::Select(notes[0].id.clone())
    );
    assert_eq!(
        view.click_delete(&notes[0].id),
        ListIntent::Delete(notes[0].id.clone())
    );
}

#[test]
fn search_then_delete_through_controller() {
    let storage = NoteStorage::new(InMemorySlotRepository::new());
    for note in shopping_and_recipes() {
        storage.save(&note).unwrap();
    }
    let mut controller = NotesController::start(storage);
    let mut view = NoteListView::new();

    view.set_query("recipe");
    let listing = view.render(controller.notes(), controller.selected_id(), now());
    assert_eq!(listing.rows.len(), 1);
    let target = listing.rows[0].note_id.clone();

    controller.handle(view.click_delete(&target)).unwrap();
    let listing = view.render(controller.notes(), controller.selected_id(), now());
    assert!(listing.empty_state.is_some());
    assert_eq!(controller.notes().len(), 1);
}

proptest! {
    #[test]
    fn title_match_ignores_case(title in "[a-zA-Z ]{1,24}", start in 0usize..24, len in 1usize..8) {
        let start = start.min(title.len() - 1);
        let end = (start + len).min(title.len());
        let needle = &title[start..end];
        let note = Note::new(title.clone());

        prop_assert!(note_matches(&note, &needle.to_uppercase()));
        prop_assert!(note_matches(&note, &needle.to_lowercase()));
    }
}
