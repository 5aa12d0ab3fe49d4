//! Queries for the two person tables. Librarians and readers share the name
//! triple but diverge in their role-specific columns, so each gets its own
//! query family rather than forcing a shared shape.

use rusqlite::{params, Connection};

use crate::error::{OpError, StoreContext};
use crate::models::{Librarian, Reader};

/// Turn an optional form value into a NULL-able column value. Blank text is
/// stored as NULL so the resolver's COALESCE-style display strings stay
/// clean.
fn blank_to_null(text: &str) -> Option<&str> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Retrieve every librarian in id order.
pub fn fetch_librarians(conn: &Connection) -> Result<Vec<Librarian>, OpError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, last_name, first_name, middle_name, login, password, access_level
             FROM librarians ORDER BY id",
        )
        .store_context("preparing librarian query")?;

    let librarians = stmt
        .query_map([], |row| {
            Ok(Librarian {
                id: row.get(0)?,
                last_name: row.get(1)?,
                first_name: row.get(2)?,
                middle_name: row.get(3)?,
                login: row.get(4)?,
                password: row.get(5)?,
                access_level: row.get(6)?,
            })
        })
        .store_context("loading librarians")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting librarians")?;

    Ok(librarians)
}

pub fn insert_librarian(
    conn: &Connection,
    last_name: &str,
    first_name: &str,
    middle_name: &str,
    login: &str,
    password: &str,
    access_level: &str,
) -> Result<(), OpError> {
    conn.execute(
        "INSERT INTO librarians (last_name, first_name, middle_name, login, password, access_level)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            last_name,
            first_name,
            blank_to_null(middle_name),
            login,
            password,
            blank_to_null(access_level)
        ],
    )
    .store_context("adding librarian")?;
    Ok(())
}

pub fn update_librarian(
    conn: &Connection,
    id: i64,
    last_name: &str,
    first_name: &str,
    middle_name: &str,
    login: &str,
    password: &str,
    access_level: &str,
) -> Result<(), OpError> {
    conn.execute(
        "UPDATE librarians SET last_name = ?1, first_name = ?2, middle_name = ?3,
                               login = ?4, password = ?5, access_level = ?6
         WHERE id = ?7",
        params![
            last_name,
            first_name,
            blank_to_null(middle_name),
            login,
            password,
            blank_to_null(access_level),
            id
        ],
    )
    .store_context("updating librarian")?;
    Ok(())
}

pub fn delete_librarian(conn: &Connection, id: i64) -> Result<(), OpError> {
    conn.execute("DELETE FROM librarians WHERE id = ?1", params![id])
        .store_context("deleting librarian")?;
    Ok(())
}

/// Retrieve every reader in id order.
pub fn fetch_readers(conn: &Connection) -> Result<Vec<Reader>, OpError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, last_name, first_name, middle_name, passport, phone, email, registered_on
             FROM readers ORDER BY id",
        )
        .store_context("preparing reader query")?;

    let readers = stmt
        .query_map([], |row| {
            Ok(Reader {
                id: row.get(0)?,
                last_name: row.get(1)?,
                first_name: row.get(2)?,
                middle_name: row.get(3)?,
                passport: row.get(4)?,
                phone: row.get(5)?,
                email: row.get(6)?,
                registered_on: row.get(7)?,
            })
        })
        .store_context("loading readers")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting readers")?;

    Ok(readers)
}

#[allow(clippy::too_many_arguments)]
pub fn insert_reader(
    conn: &Connection,
    last_name: &str,
    first_name: &str,
    middle_name: &str,
    passport: &str,
    phone: &str,
    email: &str,
    registered_on: &str,
) -> Result<(), OpError> {
    conn.execute(
        "INSERT INTO readers (last_name, first_name, middle_name, passport, phone, email, registered_on)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            last_name,
            first_name,
            blank_to_null(middle_name),
            passport,
            phone,
            email,
            registered_on
        ],
    )
    .store_context("adding reader")?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update_reader(
    conn: &Connection,
    id: i64,
    last_name: &str,
    first_name: &str,
    middle_name: &str,
    passport: &str,
    phone: &str,
    email: &str,
    registered_on: &str,
) -> Result<(), OpError> {
    conn.execute(
        "UPDATE readers SET last_name = ?1, first_name = ?2, middle_name = ?3,
                            passport = ?4, phone = ?5, email = ?6, registered_on = ?7
         WHERE id = ?8",
        params![
            last_name,
            first_name,
            blank_to_null(middle_name),
            passport,
            phone,
            email,
            registered_on,
            id
        ],
    )
    .store_context("updating reader")?;
    Ok(())
}

pub fn delete_reader(conn: &Connection, id: i64) -> Result<(), OpError> {
    conn.execute("DELETE FROM readers WHERE id = ?1", params![id])
        .store_context("deleting reader")?;
    Ok(())
}
