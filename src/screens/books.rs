//! Screen for the book catalogue. The genre is a foreign key edited through
//! its display name; hydrating the form resolves the stored id back to that
//! name through the parameter-bound reverse lookup. The inventory counters
//! are editable here directly (staff corrections), but the form refuses an
//! available count above the total so the stock invariant holds at entry.

use rusqlite::Connection;

use crate::db::{books, resolve};
use crate::error::OpError;
use crate::models::Book;
use crate::navigator::Screen;

use super::{require, require_i64, unknown_field, NameRef};

pub struct BooksScreen;

#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year_published: String,
    pub genre: NameRef,
    pub total_copies: String,
    pub available_copies: String,
    pub storage_location: String,
}

/// Parsed, resolver-free part of the form validation.
struct ValidBook {
    year_published: i64,
    total_copies: i64,
    available_copies: i64,
}

impl BookForm {
    fn validate(&self) -> Result<ValidBook, OpError> {
        require("ISBN", &self.isbn)?;
        require("title", &self.title)?;
        require("author", &self.author)?;
        require("publisher", &self.publisher)?;
        require("storage location", &self.storage_location)?;
        let year_published = require_i64("publication year", &self.year_published)?;
        let total_copies = require_i64("total copies", &self.total_copies)?;
        let available_copies = require_i64("available copies", &self.available_copies)?;
        if total_copies < 0 || available_copies < 0 {
            return Err(OpError::validation("copy counts cannot be negative"));
        }
        if available_copies > total_copies {
            return Err(OpError::validation(
                "available copies cannot exceed total copies",
            ));
        }
        Ok(ValidBook {
            year_published,
            total_copies,
            available_copies,
        })
    }
}

impl Screen for BooksScreen {
    type Row = Book;
    type Form = BookForm;

    fn kind(&self) -> &'static str {
        "book"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Book>, OpError> {
        books::fetch_books(conn)
    }

    fn row_id(&self, row: &Book) -> i64 {
        row.id
    }

    fn form_for(&self, conn: &Connection, row: &Book) -> BookForm {
        let genre = match row.genre_id {
            Some(id) => match resolve::genre_name_by_id(conn, id) {
                Ok(Some(name)) => NameRef::chosen(id, name),
                Ok(None) => {
                    log::warn!("book {} references missing genre {id}", row.id);
                    NameRef::default()
                }
                Err(err) => {
                    log::warn!("genre lookup failed for book {}: {err}", row.id);
                    NameRef::chosen(id, "")
                }
            },
            None => NameRef::default(),
        };

        BookForm {
            isbn: row.isbn.clone(),
            title: row.title.clone(),
            author: row.author.clone(),
            publisher: row.publisher.clone(),
            year_published: row.year_published.to_string(),
            genre,
            total_copies: row.total_copies.to_string(),
            available_copies: row.available_copies.to_string(),
            storage_location: row.storage_location.clone(),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &BookForm) -> Result<(), OpError> {
        let valid = form.validate()?;
        let genre_id = form
            .genre
            .resolve_with("genre", |name| resolve::genre_id_by_name(conn, name))?;
        books::insert_book(
            conn,
            &form.isbn,
            &form.title,
            &form.author,
            &form.publisher,
            valid.year_published,
            genre_id,
            valid.total_copies,
            valid.available_copies,
            &form.storage_location,
        )
    }

    fn update(&self, conn: &mut Connection, row: &Book, form: &BookForm) -> Result<(), OpError> {
        let valid = form.validate()?;
        let genre_id = form
            .genre
            .resolve_with("genre", |name| resolve::genre_id_by_name(conn, name))?;
        books::update_book(
            conn,
            row.id,
            &form.isbn,
            &form.title,
            &form.author,
            &form.publisher,
            valid.year_published,
            genre_id,
            valid.total_copies,
            valid.available_copies,
            &form.storage_location,
        )
    }

    fn delete(&self, conn: &mut Connection, row: &Book) -> Result<(), OpError> {
        books::delete_book(conn, row.id)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "isbn",
            "title",
            "author",
            "publisher",
            "year_published",
            "genre",
            "total_copies",
            "available_copies",
            "storage_location",
        ]
    }

    fn set_field(
        &self,
        conn: &Connection,
        form: &mut BookForm,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        match field {
            "genre" => {
                // Dropdown semantics: resolve at selection time and carry
                // the id from here on.
                let id = resolve::genre_id_by_name(conn, value)?
                    .ok_or_else(|| OpError::not_found("genre", value))?;
                form.genre = NameRef::chosen(id, value);
                Ok(())
            }
            "isbn" => {
                form.isbn = value.to_string();
                Ok(())
            }
            "title" => {
                form.title = value.to_string();
                Ok(())
            }
            "author" => {
                form.author = value.to_string();
                Ok(())
            }
            "publisher" => {
                form.publisher = value.to_string();
                Ok(())
            }
            "year_published" => {
                form.year_published = value.to_string();
                Ok(())
            }
            "total_copies" => {
                form.total_copies = value.to_string();
                Ok(())
            }
            "available_copies" => {
                form.available_copies = value.to_string();
                Ok(())
            }
            "storage_location" => {
                form.storage_location = value.to_string();
                Ok(())
            }
            other => Err(unknown_field(other)),
        }
    }

    fn field_values(&self, form: &BookForm) -> Vec<(&'static str, String)> {
        vec![
            ("isbn", form.isbn.clone()),
            ("title", form.title.clone()),
            ("author", form.author.clone()),
            ("publisher", form.publisher.clone()),
            ("year_published", form.year_published.clone()),
            ("genre", form.genre.text.clone()),
            ("total_copies", form.total_copies.clone()),
            ("available_copies", form.available_copies.clone()),
            ("storage_location", form.storage_location.clone()),
        ]
    }
}
