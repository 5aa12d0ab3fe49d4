//! Database location and lazy schema migrations. Opening is split from
//! schema creation so tests can run the exact same migrations against an
//! in-memory connection.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use crate::error::{OpError, StoreContext};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-desk";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";

/// Open the on-disk database, creating the data directory and the schema on
/// first run, and return a live connection.
pub fn open_default() -> Result<Connection> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    ensure_schema(&conn).context("failed to migrate schema")?;
    Ok(conn)
}

/// Resolve the absolute path of the application data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs =
        directories::BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

/// Run the lazy migrations and toggle `PRAGMA foreign_keys = ON` so the
/// referential integrity checks behave the same during tests and production
/// runs. Safe to call on every startup.
pub fn ensure_schema(conn: &Connection) -> Result<(), OpError> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .store_context("enabling foreign keys")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            isbn TEXT NOT NULL,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            publisher TEXT NOT NULL,
            year_published INTEGER NOT NULL,
            genre_id INTEGER REFERENCES genres(id),
            total_copies INTEGER NOT NULL DEFAULT 0,
            available_copies INTEGER NOT NULL DEFAULT 0,
            storage_location TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS librarians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            middle_name TEXT,
            login TEXT NOT NULL,
            password TEXT NOT NULL,
            access_level TEXT
        );

        CREATE TABLE IF NOT EXISTS readers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name TEXT NOT NULL,
            first_name TEXT NOT NULL,
            middle_name TEXT,
            passport TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            registered_on TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS receipts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            invoice_number TEXT NOT NULL,
            received_on TEXT NOT NULL,
            supplier TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            book_id INTEGER NOT NULL REFERENCES books(id),
            librarian_id INTEGER NOT NULL REFERENCES librarians(id)
        );

        CREATE TABLE IF NOT EXISTS lendings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            issued_on TEXT NOT NULL,
            return_period TEXT,
            returned_on TEXT,
            status TEXT,
            book_id INTEGER NOT NULL REFERENCES books(id),
            reader_id INTEGER NOT NULL REFERENCES readers(id),
            librarian_id INTEGER NOT NULL REFERENCES librarians(id)
        );",
    )
    .store_context("creating schema")?;

    Ok(())
}
