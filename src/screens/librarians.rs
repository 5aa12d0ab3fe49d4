//! Screen for staff records. Middle name and access level are optional;
//! blank values land as NULL columns.

use rusqlite::Connection;

use crate::db::people;
use crate::error::OpError;
use crate::models::Librarian;
use crate::navigator::Screen;

use super::{require, unknown_field};

pub struct LibrariansScreen;

#[derive(Debug, Clone, Default)]
pub struct LibrarianForm {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub login: String,
    pub password: String,
    pub access_level: String,
}

impl LibrarianForm {
    fn validate(&self) -> Result<(), OpError> {
        require("last name", &self.last_name)?;
        require("first name", &self.first_name)?;
        require("login", &self.login)?;
        require("password", &self.password)
    }
}

impl Screen for LibrariansScreen {
    type Row = Librarian;
    type Form = LibrarianForm;

    fn kind(&self) -> &'static str {
        "librarian"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Librarian>, OpError> {
        people::fetch_librarians(conn)
    }

    fn row_id(&self, row: &Librarian) -> i64 {
        row.id
    }

    fn form_for(&self, _conn: &Connection, row: &Librarian) -> LibrarianForm {
        LibrarianForm {
            last_name: row.last_name.clone(),
            first_name: row.first_name.clone(),
            middle_name: row.middle_name.clone().unwrap_or_default(),
            login: row.login.clone(),
            password: row.password.clone(),
            access_level: row.access_level.clone().unwrap_or_default(),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &LibrarianForm) -> Result<(), OpError> {
        form.validate()?;
        people::insert_librarian(
            conn,
            &form.last_name,
            &form.first_name,
            &form.middle_name,
            &form.login,
            &form.password,
            &form.access_level,
        )
    }

    fn update(
        &self,
        conn: &mut Connection,
        row: &Librarian,
        form: &LibrarianForm,
    ) -> Result<(), OpError> {
        form.validate()?;
        people::update_librarian(
            conn,
            row.id,
            &form.last_name,
            &form.first_name,
            &form.middle_name,
            &form.login,
            &form.password,
            &form.access_level,
        )
    }

    fn delete(&self, conn: &mut Connection, row: &Librarian) -> Result<(), OpError> {
        people::delete_librarian(conn, row.id)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "last_name",
            "first_name",
            "middle_name",
            "login",
            "password",
            "access_level",
        ]
    }

    fn set_field(
        &self,
        _conn: &Connection,
        form: &mut LibrarianForm,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        let slot = match field {
            "last_name" => &mut form.last_name,
            "first_name" => &mut form.first_name,
            "middle_name" => &mut form.middle_name,
            "login" => &mut form.login,
            "password" => &mut form.password,
            "access_level" => &mut form.access_level,
            other => return Err(unknown_field(other)),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field_values(&self, form: &LibrarianForm) -> Vec<(&'static str, String)> {
        vec![
            ("last_name", form.last_name.clone()),
            ("first_name", form.first_name.clone()),
            ("middle_name", form.middle_name.clone()),
            ("login", form.login.clone()),
            ("password", form.password.clone()),
            ("access_level", form.access_level.clone()),
        ]
    }
}
