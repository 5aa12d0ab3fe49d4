//! State-machine tests for the generic record navigator, driven against an
//! in-memory database through the real screen descriptors.

mod common;

use library_desk::db::people;
use library_desk::navigator::{Action, Cursor, Navigator};
use library_desk::screens::{GenresScreen, LendingsScreen, NameRef, ReadersScreen};

use common::{mem_conn, recording_channel, seed_book, seed_genre, seed_librarian, seed_reader};

#[test]
fn opens_reviewing_first_row_when_snapshot_is_non_empty() {
    let conn = mem_conn();
    seed_genre(&conn, "Poetry");
    seed_genre(&conn, "Prose");

    let (channel, _) = recording_channel();
    let nav = Navigator::open(GenresScreen, &conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Reviewing(0));
    assert_eq!(nav.rows().len(), 2);
    assert_eq!(nav.form().name, "Poetry");
}

#[test]
fn opens_composing_when_snapshot_is_empty() {
    let conn = mem_conn();
    let (channel, messages) = recording_channel();
    let nav = Navigator::open(GenresScreen, &conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.form().name.is_empty());
    assert!(messages
        .borrow()
        .iter()
        .any(|m| m.contains("composing a new genre record")));
}

#[test]
fn load_failure_reports_and_falls_back_to_composing() {
    let conn = mem_conn();
    conn.execute_batch("DROP TABLE genres").unwrap();

    let (channel, messages) = recording_channel();
    let nav = Navigator::open(GenresScreen, &conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.rows().is_empty());
    assert!(messages.borrow().iter().any(|m| m.contains("genre query")));
}

#[test]
fn previous_at_first_record_is_a_noop_with_one_notification() {
    let conn = mem_conn();
    seed_genre(&conn, "Poetry");
    seed_genre(&conn, "Prose");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    messages.borrow_mut().clear();

    nav.previous(&conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Reviewing(0));
    assert_eq!(messages.borrow().len(), 1);
    assert_eq!(messages.borrow()[0], "this is the first record");
}

#[test]
fn previous_while_composing_over_empty_snapshot_notifies_first_record() {
    let conn = mem_conn();
    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    messages.borrow_mut().clear();

    nav.previous(&conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert_eq!(messages.borrow().len(), 1);
    assert_eq!(messages.borrow()[0], "this is the first record");
}

#[test]
fn previous_while_composing_returns_to_the_last_row() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Poetry");
    seed_genre(&conn, "Prose");

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    // Walk off the end into composing mode, then step back.
    nav.dispatch(Action::Next, &mut conn, &channel);
    nav.dispatch(Action::Next, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);

    nav.dispatch(Action::Previous, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(1));
    assert_eq!(nav.form().name, "Prose");
}

#[test]
fn next_at_last_row_enters_composing_with_cleared_fields() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Poetry");

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    nav.dispatch(Action::Next, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.form().name.is_empty());
}

#[test]
fn successful_insert_lands_on_the_new_last_row() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Poetry");

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    nav.dispatch(Action::Next, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);

    nav.set_field(&conn, "name", "Prose").unwrap();
    nav.dispatch(Action::Next, &mut conn, &channel);

    assert_eq!(nav.rows().len(), 2);
    assert_eq!(nav.cursor(), Cursor::Reviewing(1));
    assert_eq!(nav.form().name, "Prose");
}

#[test]
fn save_while_composing_commits_like_next() {
    let mut conn = mem_conn();
    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    nav.set_field(&conn, "name", "Drama").unwrap();
    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.rows().len(), 1);
    assert_eq!(nav.cursor(), Cursor::Reviewing(0));
}

#[test]
fn failed_insert_stays_composing_and_mutates_nothing() {
    let mut conn = mem_conn();
    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    messages.borrow_mut().clear();

    // Blank name: validation rejects before the store is touched.
    nav.dispatch(Action::Next, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.rows().is_empty());
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].contains("genre name is required"));
}

#[test]
fn store_failure_on_insert_keeps_cursor_snapshot_and_form() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Poetry");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    nav.dispatch(Action::Next, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);

    // A duplicate of an existing unique name passes validation; the store
    // itself rejects the row.
    nav.set_field(&conn, "name", "Poetry").unwrap();
    messages.borrow_mut().clear();

    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert_eq!(nav.rows().len(), 1);
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].contains("adding genre"));
    // The rejected name stays in the form for the user to change.
    assert_eq!(nav.form().name, "Poetry");
}

#[test]
fn store_failure_on_update_keeps_cursor_and_stored_row() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Poetry");
    seed_genre(&conn, "Prose");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(0));

    nav.set_field(&conn, "name", "Prose").unwrap();
    messages.borrow_mut().clear();
    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Reviewing(0));
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].contains("updating genre"));
    assert_eq!(nav.rows()[0].name, "Poetry");
    assert_eq!(nav.form().name, "Prose");
}

#[test]
fn update_follows_the_same_logical_record_across_reorder() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Alpha");
    seed_genre(&conn, "Beta");
    seed_genre(&conn, "Gamma");

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    assert_eq!(nav.form().name, "Alpha");

    // Renaming Alpha to Zeta pushes it to the end of the name-ordered
    // snapshot; the cursor must follow it there.
    nav.set_field(&conn, "name", "Zeta").unwrap();
    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Reviewing(2));
    assert_eq!(nav.form().name, "Zeta");
}

#[test]
fn delete_repositions_on_the_neighbour_and_empties_into_composing() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Alpha");
    seed_genre(&conn, "Beta");
    seed_genre(&conn, "Gamma");

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);

    // Delete the last row while standing on it: cursor clamps backwards.
    nav.dispatch(Action::Next, &mut conn, &channel);
    nav.dispatch(Action::Next, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(2));
    nav.dispatch(Action::Delete, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(1));
    assert_eq!(nav.rows().len(), 2);

    nav.dispatch(Action::Delete, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(0));

    nav.dispatch(Action::Delete, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.rows().is_empty());
}

#[test]
fn delete_while_composing_is_ignored() {
    let mut conn = mem_conn();
    seed_genre(&conn, "Alpha");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(GenresScreen, &conn, &channel);
    nav.dispatch(Action::Next, &mut conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);
    messages.borrow_mut().clear();

    nav.dispatch(Action::Delete, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert_eq!(nav.rows().len(), 1);
    assert!(messages.borrow().is_empty());
}

#[test]
fn malformed_registration_date_rejects_the_save_without_mutation() {
    // Scenario: a reader form carrying "01/01/2024" must be rejected with a
    // notification, no store mutation, and an unchanged cursor.
    let mut conn = mem_conn();
    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(ReadersScreen, &conn, &channel);

    nav.set_field(&conn, "last_name", "Ivanov").unwrap();
    nav.set_field(&conn, "first_name", "Petr").unwrap();
    nav.set_field(&conn, "passport", "1234 567890").unwrap();
    nav.set_field(&conn, "phone", "555-0100").unwrap();
    nav.set_field(&conn, "email", "petr@example.com").unwrap();
    nav.set_field(&conn, "registered_on", "01/01/2024").unwrap();
    messages.borrow_mut().clear();

    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(people::fetch_readers(&conn).unwrap().is_empty());
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].contains("registration date"));
    // The rejected value is still in the form for the user to correct.
    assert_eq!(nav.form().registered_on, "01/01/2024");
}

#[test]
fn malformed_date_on_update_keeps_cursor_and_stored_row() {
    let mut conn = mem_conn();
    seed_reader(&conn, "Ivanov", "Petr", "Sergeevich");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(ReadersScreen, &conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Reviewing(0));

    nav.set_field(&conn, "registered_on", "2024/01/01").unwrap();
    messages.borrow_mut().clear();
    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Reviewing(0));
    assert_eq!(messages.borrow().len(), 1);
    let stored = &people::fetch_readers(&conn).unwrap()[0];
    assert_eq!(stored.registered_on, "2023-06-01");
}

#[test]
fn unresolved_display_name_aborts_the_insert_in_place() {
    let mut conn = mem_conn();
    seed_book(&conn, "Known Book", 3, 3);
    seed_reader(&conn, "Ivanov", "Petr", "");
    seed_librarian(&conn, "Petrova", "Anna", "");

    let (channel, messages) = recording_channel();
    let mut nav = Navigator::open(LendingsScreen, &conn, &channel);
    assert_eq!(nav.cursor(), Cursor::Composing);

    nav.set_field(&conn, "issued_on", "2024-01-10").unwrap();
    nav.set_field(&conn, "reader", "Ivanov Petr").unwrap();
    nav.set_field(&conn, "librarian", "Petrova Anna").unwrap();
    // Bypass the eager dropdown resolution with free-typed text so the
    // commit-time fallback has to handle the unknown title.
    nav.form_mut().book = NameRef::typed("Ghost Book");
    messages.borrow_mut().clear();

    nav.dispatch(Action::Save, &mut conn, &channel);

    assert_eq!(nav.cursor(), Cursor::Composing);
    assert!(nav.rows().is_empty());
    assert_eq!(messages.borrow().len(), 1);
    assert!(messages.borrow()[0].contains("book \"Ghost Book\" not found"));
    // The form keeps what the user entered.
    assert_eq!(nav.form().book.text, "Ghost Book");
}

#[test]
fn eager_field_resolution_rejects_unknown_names_without_touching_the_form() {
    let conn = mem_conn();
    seed_book(&conn, "Known Book", 3, 3);

    let (channel, _) = recording_channel();
    let mut nav = Navigator::open(LendingsScreen, &conn, &channel);

    nav.set_field(&conn, "book", "Known Book").unwrap();
    assert!(nav.form().book.chosen.is_some());

    let err = nav.set_field(&conn, "book", "Ghost Book").unwrap_err();
    assert!(err.to_string().contains("Ghost Book"));
    // The previously chosen reference survives the failed selection.
    assert_eq!(nav.form().book.text, "Known Book");
}
