//! Queries for book lendings. Like receipts, every mutation adjusts the
//! referenced book's available-copies counter inside the same transaction.
//! Nullable text columns surface as empty strings on the model so the forms
//! can treat "blank" uniformly.

use rusqlite::{params, Connection};

use crate::db::inventory;
use crate::error::{OpError, StoreContext};
use crate::models::{joined_full_name, Lending};

/// Turn a blank form value into NULL for the nullable lending columns.
fn blank_to_null(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Retrieve every lending in id order, hydrated with the book title and the
/// reader/librarian display names.
pub fn fetch_lendings(conn: &Connection) -> Result<Vec<Lending>, OpError> {
    let mut stmt = conn
        .prepare(
            "SELECT ln.id, ln.issued_on,
                    COALESCE(ln.return_period, '') AS return_period,
                    COALESCE(ln.returned_on, '') AS returned_on,
                    COALESCE(ln.status, '') AS status,
                    ln.book_id, ln.reader_id, ln.librarian_id,
                    COALESCE(b.title, '') AS book_title,
                    r.last_name, r.first_name, r.middle_name,
                    l.last_name, l.first_name, l.middle_name
             FROM lendings ln
             LEFT JOIN books b ON ln.book_id = b.id
             LEFT JOIN readers r ON ln.reader_id = r.id
             LEFT JOIN librarians l ON ln.librarian_id = l.id
             ORDER BY ln.id",
        )
        .store_context("preparing lending query")?;

    let lendings = stmt
        .query_map([], |row| {
            Ok(Lending {
                id: row.get(0)?,
                issued_on: row.get(1)?,
                return_period: row.get(2)?,
                returned_on: row.get(3)?,
                status: row.get(4)?,
                book_id: row.get(5)?,
                reader_id: row.get(6)?,
                librarian_id: row.get(7)?,
                book_title: row.get(8)?,
                reader_name: joined_full_name(row.get(9)?, row.get(10)?, row.get(11)?),
                librarian_name: joined_full_name(row.get(12)?, row.get(13)?, row.get(14)?),
            })
        })
        .store_context("loading lendings")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting lendings")?;

    Ok(lendings)
}

/// Insert a lending and take one copy off the shelf. The availability guard
/// only skips the decrement; it does not block the lending row itself, so
/// the insert still commits when no copies are available (a known gap,
/// deliberately left in place).
#[allow(clippy::too_many_arguments)]
pub fn insert_lending(
    conn: &mut Connection,
    issued_on: &str,
    return_period: &str,
    returned_on: &str,
    status: &str,
    book_id: i64,
    reader_id: i64,
    librarian_id: i64,
) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting lending insert")?;

    tx.execute(
        "INSERT INTO lendings (issued_on, return_period, returned_on, status,
                               book_id, reader_id, librarian_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            issued_on,
            blank_to_null(return_period),
            blank_to_null(returned_on),
            blank_to_null(status),
            book_id,
            reader_id,
            librarian_id
        ],
    )
    .store_context("adding lending")?;

    inventory::lend_copy(&tx, book_id)?;

    tx.commit().store_context("committing lending insert")
}

/// Update a lending. Two independent counter rules apply: a changed book
/// reference returns a copy to the old book and lends one from the new; and
/// a return-date transition moves one copy on or off the shelf. The
/// book-change adjustment applies first, so the return transition acts on
/// the new book.
#[allow(clippy::too_many_arguments)]
pub fn update_lending(
    conn: &mut Connection,
    old: &Lending,
    issued_on: &str,
    return_period: &str,
    returned_on: &str,
    status: &str,
    book_id: i64,
    reader_id: i64,
    librarian_id: i64,
) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting lending update")?;

    tx.execute(
        "UPDATE lendings SET issued_on = ?1, return_period = ?2, returned_on = ?3,
                             status = ?4, book_id = ?5, reader_id = ?6, librarian_id = ?7
         WHERE id = ?8",
        params![
            issued_on,
            blank_to_null(return_period),
            blank_to_null(returned_on),
            blank_to_null(status),
            book_id,
            reader_id,
            librarian_id,
            old.id
        ],
    )
    .store_context("updating lending")?;

    if book_id != old.book_id {
        inventory::return_copy(&tx, old.book_id)?;
        inventory::lend_copy(&tx, book_id)?;
    }

    let was_returned = old.is_returned();
    let is_returned = !returned_on.is_empty();
    if !was_returned && is_returned {
        inventory::return_copy(&tx, book_id)?;
    } else if was_returned && !is_returned {
        inventory::lend_copy(&tx, book_id)?;
    }

    tx.commit().store_context("committing lending update")
}

/// Delete a lending and put its copy back on the shelf, unconditionally.
pub fn delete_lending(conn: &mut Connection, lending: &Lending) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting lending delete")?;

    tx.execute("DELETE FROM lendings WHERE id = ?1", params![lending.id])
        .store_context("deleting lending")?;

    inventory::return_copy(&tx, lending.book_id)?;

    tx.commit().store_context("committing lending delete")
}
