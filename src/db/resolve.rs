//! The name resolver: stateless lookups translating the human-readable
//! display strings shown in dropdowns into stable row ids. Every query here
//! binds its inputs as parameters; nothing is interpolated, including the
//! genre-name-by-id lookup.
//!
//! Person display strings are split positionally: first token = last name,
//! second = first name, everything after joined back together as the middle
//! name. Multi-word surnames therefore mis-split ("van Dyke Jan" reads as
//! last name "van", a known fragility of resolving people by display text
//! rather than by carried id).

use rusqlite::{Connection, OptionalExtension};

use crate::error::{OpError, StoreContext};

/// Which person table a full-name lookup runs against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PersonKind {
    Librarian,
    Reader,
}

impl PersonKind {
    fn table(self) -> &'static str {
        match self {
            PersonKind::Librarian => "librarians",
            PersonKind::Reader => "readers",
        }
    }
}

/// Exact-title book lookup.
pub fn book_id_by_title(conn: &Connection, title: &str) -> Result<Option<i64>, OpError> {
    conn.query_row("SELECT id FROM books WHERE title = ?1", [title], |row| {
        row.get(0)
    })
    .optional()
    .store_context("looking up book id")
}

/// Exact-name genre lookup.
pub fn genre_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, OpError> {
    conn.query_row("SELECT id FROM genres WHERE name = ?1", [name], |row| {
        row.get(0)
    })
    .optional()
    .store_context("looking up genre id")
}

/// Reverse genre lookup used when hydrating the Books form from a row.
pub fn genre_name_by_id(conn: &Connection, id: i64) -> Result<Option<String>, OpError> {
    conn.query_row("SELECT name FROM genres WHERE id = ?1", [id], |row| {
        row.get(0)
    })
    .optional()
    .store_context("looking up genre name")
}

/// Split a display name into its positional components. The remainder after
/// the second token is rejoined as the middle name, so "Ivanov Petr
/// Sergeevich Jr" queries with middle name "Sergeevich Jr".
pub fn split_full_name(full_name: &str) -> (String, String, Option<String>) {
    let mut parts = full_name.split_whitespace();
    let last = parts.next().unwrap_or_default().to_string();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let middle = if rest.is_empty() { None } else { Some(rest) };
    (last, first, middle)
}

/// Resolve a person display string against one of the person tables. When no
/// middle-name token is present the middle-name column is left
/// unconstrained, so "Ivanov Petr" matches rows regardless of middle name.
pub fn person_id_by_full_name(
    conn: &Connection,
    kind: PersonKind,
    full_name: &str,
) -> Result<Option<i64>, OpError> {
    let (last, first, middle) = split_full_name(full_name);
    if last.is_empty() || first.is_empty() {
        return Ok(None);
    }

    // The table name comes from a closed enum, never from user input; the
    // user-supplied name components are all bound.
    let result = match middle {
        Some(middle) => conn
            .query_row(
                &format!(
                    "SELECT id FROM {} WHERE last_name = ?1 AND first_name = ?2 AND middle_name = ?3",
                    kind.table()
                ),
                [last.as_str(), first.as_str(), middle.as_str()],
                |row| row.get(0),
            )
            .optional(),
        None => conn
            .query_row(
                &format!(
                    "SELECT id FROM {} WHERE last_name = ?1 AND first_name = ?2",
                    kind.table()
                ),
                [last.as_str(), first.as_str()],
                |row| row.get(0),
            )
            .optional(),
    };

    result.store_context("looking up person id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{connection, people};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        connection::ensure_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn full_name_split_joins_trailing_tokens() {
        assert_eq!(
            split_full_name("Ivanov Petr Sergeevich"),
            (
                "Ivanov".to_string(),
                "Petr".to_string(),
                Some("Sergeevich".to_string())
            )
        );
        assert_eq!(
            split_full_name("Ivanov Petr"),
            ("Ivanov".to_string(), "Petr".to_string(), None)
        );
        assert_eq!(
            split_full_name("Ivanov Petr Sergeevich Jr"),
            (
                "Ivanov".to_string(),
                "Petr".to_string(),
                Some("Sergeevich Jr".to_string())
            )
        );
    }

    #[test]
    fn person_lookup_matches_middle_name_exactly_when_present() {
        let conn = test_conn();
        people::insert_reader(
            &conn,
            "Ivanov",
            "Petr",
            "Sergeevich",
            "1234 567890",
            "555-0101",
            "petr@example.com",
            "2024-01-01",
        )
        .unwrap();
        people::insert_reader(
            &conn,
            "Ivanov",
            "Petr",
            "Nikolaevich",
            "1234 567891",
            "555-0102",
            "petr2@example.com",
            "2024-01-02",
        )
        .unwrap();

        let readers = people::fetch_readers(&conn).unwrap();
        let sergeevich = readers
            .iter()
            .find(|r| r.middle_name.as_deref() == Some("Sergeevich"))
            .unwrap();

        let id = person_id_by_full_name(&conn, PersonKind::Reader, "Ivanov Petr Sergeevich")
            .unwrap()
            .unwrap();
        assert_eq!(id, sergeevich.id);

        assert!(
            person_id_by_full_name(&conn, PersonKind::Reader, "Ivanov Petr Mikhailovich")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn person_lookup_without_middle_matches_any_middle_name() {
        let conn = test_conn();
        people::insert_reader(
            &conn,
            "Ivanov",
            "Petr",
            "Sergeevich",
            "1234 567890",
            "555-0101",
            "petr@example.com",
            "2024-01-01",
        )
        .unwrap();

        assert!(person_id_by_full_name(&conn, PersonKind::Reader, "Ivanov Petr")
            .unwrap()
            .is_some());
    }

    #[test]
    fn lookups_are_safe_with_quote_characters() {
        let conn = test_conn();
        people::insert_librarian(&conn, "O'Brien", "Sean", "", "sob", "secret", "admin").unwrap();

        assert!(
            person_id_by_full_name(&conn, PersonKind::Librarian, "O'Brien Sean")
                .unwrap()
                .is_some()
        );
        // A classic injection shape resolves to nothing instead of breaking
        // the query.
        assert!(
            person_id_by_full_name(&conn, PersonKind::Librarian, "x' OR '1'='1")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn genre_lookups_round_trip_by_id_and_name() {
        let conn = test_conn();
        crate::db::genres::insert_genre(&conn, "Science Fiction").unwrap();
        let id = genre_id_by_name(&conn, "Science Fiction").unwrap().unwrap();
        assert_eq!(
            genre_name_by_id(&conn, id).unwrap().as_deref(),
            Some("Science Fiction")
        );
        assert!(genre_id_by_name(&conn, "Poetry").unwrap().is_none());
    }
}
