//! Queries for the book catalogue. Inventory counters live on these rows but
//! are adjusted through `db::inventory`; the plain update here writes
//! whatever the Books form carries, so staff can correct the counters
//! directly.

use rusqlite::{params, Connection, Row};

use crate::error::{OpError, StoreContext};
use crate::models::Book;

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        isbn: row.get(1)?,
        title: row.get(2)?,
        author: row.get(3)?,
        publisher: row.get(4)?,
        year_published: row.get(5)?,
        genre_id: row.get(6)?,
        total_copies: row.get(7)?,
        available_copies: row.get(8)?,
        storage_location: row.get(9)?,
    })
}

/// Retrieve every book in id order, the order the navigator pages through.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>, OpError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, isbn, title, author, publisher, year_published,
                    genre_id, total_copies, available_copies, storage_location
             FROM books ORDER BY id",
        )
        .store_context("preparing book query")?;

    let books = stmt
        .query_map([], book_from_row)
        .store_context("loading books")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting books")?;

    Ok(books)
}

/// Fetch one book's inventory counters, used by tests and the driver to
/// report stock levels.
pub fn fetch_counters(conn: &Connection, id: i64) -> Result<(i64, i64), OpError> {
    conn.query_row(
        "SELECT total_copies, available_copies FROM books WHERE id = ?1",
        params![id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .store_context("reading book counters")
}

#[allow(clippy::too_many_arguments)]
pub fn insert_book(
    conn: &Connection,
    isbn: &str,
    title: &str,
    author: &str,
    publisher: &str,
    year_published: i64,
    genre_id: i64,
    total_copies: i64,
    available_copies: i64,
    storage_location: &str,
) -> Result<(), OpError> {
    conn.execute(
        "INSERT INTO books (isbn, title, author, publisher, year_published,
                            genre_id, total_copies, available_copies, storage_location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            isbn,
            title,
            author,
            publisher,
            year_published,
            genre_id,
            total_copies,
            available_copies,
            storage_location
        ],
    )
    .store_context("adding book")?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update_book(
    conn: &Connection,
    id: i64,
    isbn: &str,
    title: &str,
    author: &str,
    publisher: &str,
    year_published: i64,
    genre_id: i64,
    total_copies: i64,
    available_copies: i64,
    storage_location: &str,
) -> Result<(), OpError> {
    conn.execute(
        "UPDATE books SET isbn = ?1, title = ?2, author = ?3, publisher = ?4,
                          year_published = ?5, genre_id = ?6, total_copies = ?7,
                          available_copies = ?8, storage_location = ?9
         WHERE id = ?10",
        params![
            isbn,
            title,
            author,
            publisher,
            year_published,
            genre_id,
            total_copies,
            available_copies,
            storage_location,
            id
        ],
    )
    .store_context("updating book")?;
    Ok(())
}

pub fn delete_book(conn: &Connection, id: i64) -> Result<(), OpError> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])
        .store_context("deleting book")?;
    Ok(())
}
