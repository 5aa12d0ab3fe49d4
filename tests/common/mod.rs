//! Shared fixtures for the integration tests: an in-memory database with the
//! production schema, a notification channel that records what it delivers,
//! and seed helpers going through the same persistence functions the screens
//! use.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rusqlite::Connection;

use library_desk::db::{self, books, genres, people, resolve};
use library_desk::NotificationChannel;

/// Open an in-memory database carrying the full production schema.
pub fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    db::ensure_schema(&conn).expect("migrate schema");
    conn
}

/// A channel wired to a recorder so tests can assert on exactly what was
/// published.
pub fn recording_channel() -> (NotificationChannel, Rc<RefCell<Vec<String>>>) {
    let channel = NotificationChannel::new();
    let messages = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&messages);
    channel.subscribe(move |message| sink.borrow_mut().push(message.to_string()));
    (channel, messages)
}

/// Insert a genre and return its id, reusing an existing row by name.
pub fn seed_genre(conn: &Connection, name: &str) -> i64 {
    if let Some(id) = resolve::genre_id_by_name(conn, name).unwrap() {
        return id;
    }
    genres::insert_genre(conn, name).unwrap();
    conn.last_insert_rowid()
}

/// Insert a book with the given counters and return its id.
pub fn seed_book(conn: &Connection, title: &str, total: i64, available: i64) -> i64 {
    let genre_id = seed_genre(conn, "General");
    books::insert_book(
        conn,
        "978-0-00-000000-0",
        title,
        "Test Author",
        "Test Press",
        2020,
        genre_id,
        total,
        available,
        "Shelf A",
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Insert a librarian and return their id.
pub fn seed_librarian(conn: &Connection, last: &str, first: &str, middle: &str) -> i64 {
    people::insert_librarian(conn, last, first, middle, "staff", "secret", "standard").unwrap();
    conn.last_insert_rowid()
}

/// Insert a reader and return their id.
pub fn seed_reader(conn: &Connection, last: &str, first: &str, middle: &str) -> i64 {
    people::insert_reader(
        conn,
        last,
        first,
        middle,
        "1234 567890",
        "555-0100",
        "reader@example.com",
        "2023-06-01",
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Read one book's `(total, available)` counters.
pub fn counters(conn: &Connection, book_id: i64) -> (i64, i64) {
    books::fetch_counters(conn, book_id).unwrap()
}

/// Assert the stock invariant `0 <= available <= total` for every book.
pub fn assert_stock_invariant(conn: &Connection) {
    for book in books::fetch_books(conn).unwrap() {
        assert!(
            book.available_copies >= 0 && book.available_copies <= book.total_copies,
            "book {} violates the stock invariant: available {} total {}",
            book.title,
            book.available_copies,
            book.total_copies
        );
    }
}
