//! Queries for the genre catalogue.

use rusqlite::{params, Connection};

use crate::error::{OpError, StoreContext};
use crate::models::Genre;

/// Retrieve every genre ordered by name, the same ordering the dropdowns
/// show.
pub fn fetch_genres(conn: &Connection) -> Result<Vec<Genre>, OpError> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM genres ORDER BY name")
        .store_context("preparing genre query")?;

    let genres = stmt
        .query_map([], |row| {
            Ok(Genre {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .store_context("loading genres")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting genres")?;

    Ok(genres)
}

pub fn insert_genre(conn: &Connection, name: &str) -> Result<(), OpError> {
    conn.execute("INSERT INTO genres (name) VALUES (?1)", params![name])
        .store_context("adding genre")?;
    Ok(())
}

pub fn update_genre(conn: &Connection, id: i64, name: &str) -> Result<(), OpError> {
    conn.execute(
        "UPDATE genres SET name = ?1 WHERE id = ?2",
        params![name, id],
    )
    .store_context("updating genre")?;
    Ok(())
}

pub fn delete_genre(conn: &Connection, id: i64) -> Result<(), OpError> {
    conn.execute("DELETE FROM genres WHERE id = ?1", params![id])
        .store_context("deleting genre")?;
    Ok(())
}
