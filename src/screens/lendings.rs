//! Screen for book loans. Three foreign keys travel as display strings, the
//! return date doubles as the "still out" flag, and the persistence layer
//! moves the book's available counter in the same transaction as the
//! lending row.

use rusqlite::Connection;

use crate::dates::{optional_date, require_date};
use crate::db::lendings;
use crate::db::resolve::{self, PersonKind};
use crate::error::OpError;
use crate::models::Lending;
use crate::navigator::Screen;

use super::{require, unknown_field, NameRef};

pub struct LendingsScreen;

#[derive(Debug, Clone, Default)]
pub struct LendingForm {
    pub issued_on: String,
    pub return_period: String,
    pub returned_on: String,
    pub status: String,
    pub book: NameRef,
    pub reader: NameRef,
    pub librarian: NameRef,
}

impl LendingForm {
    fn validate(&self) -> Result<(), OpError> {
        require("issue date", &self.issued_on)?;
        require_date("issue date", &self.issued_on)?;
        optional_date("return date", &self.returned_on)
    }

    fn resolve_refs(&self, conn: &Connection) -> Result<(i64, i64, i64), OpError> {
        let book_id = self
            .book
            .resolve_with("book", |title| resolve::book_id_by_title(conn, title))?;
        let reader_id = self.reader.resolve_with("reader", |name| {
            resolve::person_id_by_full_name(conn, PersonKind::Reader, name)
        })?;
        let librarian_id = self.librarian.resolve_with("librarian", |name| {
            resolve::person_id_by_full_name(conn, PersonKind::Librarian, name)
        })?;
        Ok((book_id, reader_id, librarian_id))
    }
}

impl Screen for LendingsScreen {
    type Row = Lending;
    type Form = LendingForm;

    fn kind(&self) -> &'static str {
        "lending"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Lending>, OpError> {
        lendings::fetch_lendings(conn)
    }

    fn row_id(&self, row: &Lending) -> i64 {
        row.id
    }

    fn form_for(&self, _conn: &Connection, row: &Lending) -> LendingForm {
        LendingForm {
            issued_on: row.issued_on.clone(),
            return_period: row.return_period.clone(),
            returned_on: row.returned_on.clone(),
            status: row.status.clone(),
            book: NameRef::chosen(row.book_id, row.book_title.clone()),
            reader: NameRef::chosen(row.reader_id, row.reader_name.clone()),
            librarian: NameRef::chosen(row.librarian_id, row.librarian_name.clone()),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &LendingForm) -> Result<(), OpError> {
        form.validate()?;
        let (book_id, reader_id, librarian_id) = form.resolve_refs(conn)?;
        lendings::insert_lending(
            conn,
            &form.issued_on,
            &form.return_period,
            &form.returned_on,
            &form.status,
            book_id,
            reader_id,
            librarian_id,
        )
    }

    fn update(
        &self,
        conn: &mut Connection,
        row: &Lending,
        form: &LendingForm,
    ) -> Result<(), OpError> {
        form.validate()?;
        let (book_id, reader_id, librarian_id) = form.resolve_refs(conn)?;
        lendings::update_lending(
            conn,
            row,
            &form.issued_on,
            &form.return_period,
            &form.returned_on,
            &form.status,
            book_id,
            reader_id,
            librarian_id,
        )
    }

    fn delete(&self, conn: &mut Connection, row: &Lending) -> Result<(), OpError> {
        lendings::delete_lending(conn, row)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "issued_on",
            "return_period",
            "returned_on",
            "status",
            "book",
            "reader",
            "librarian",
        ]
    }

    fn set_field(
        &self,
        conn: &Connection,
        form: &mut LendingForm,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        match field {
            "book" => {
                let id = resolve::book_id_by_title(conn, value)?
                    .ok_or_else(|| OpError::not_found("book", value))?;
                form.book = NameRef::chosen(id, value);
                Ok(())
            }
            "reader" => {
                let id = resolve::person_id_by_full_name(conn, PersonKind::Reader, value)?
                    .ok_or_else(|| OpError::not_found("reader", value))?;
                form.reader = NameRef::chosen(id, value);
                Ok(())
            }
            "librarian" => {
                let id = resolve::person_id_by_full_name(conn, PersonKind::Librarian, value)?
                    .ok_or_else(|| OpError::not_found("librarian", value))?;
                form.librarian = NameRef::chosen(id, value);
                Ok(())
            }
            "issued_on" => {
                form.issued_on = value.to_string();
                Ok(())
            }
            "return_period" => {
                form.return_period = value.to_string();
                Ok(())
            }
            "returned_on" => {
                form.returned_on = value.to_string();
                Ok(())
            }
            "status" => {
                form.status = value.to_string();
                Ok(())
            }
            other => Err(unknown_field(other)),
        }
    }

    fn field_values(&self, form: &LendingForm) -> Vec<(&'static str, String)> {
        vec![
            ("issued_on", form.issued_on.clone()),
            ("return_period", form.return_period.clone()),
            ("returned_on", form.returned_on.clone()),
            ("status", form.status.clone()),
            ("book", form.book.text.clone()),
            ("reader", form.reader.text.clone()),
            ("librarian", form.librarian.text.clone()),
        ]
    }
}
