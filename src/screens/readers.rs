//! Screen for patron records. Registration date must be a strict
//! `YYYY-MM-DD` string; anything else is rejected before the store is
//! touched.

use rusqlite::Connection;

use crate::dates::require_date;
use crate::db::people;
use crate::error::OpError;
use crate::models::Reader;
use crate::navigator::Screen;

use super::{require, unknown_field};

pub struct ReadersScreen;

#[derive(Debug, Clone, Default)]
pub struct ReaderForm {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub passport: String,
    pub phone: String,
    pub email: String,
    pub registered_on: String,
}

impl ReaderForm {
    fn validate(&self) -> Result<(), OpError> {
        require("last name", &self.last_name)?;
        require("first name", &self.first_name)?;
        require("passport", &self.passport)?;
        require("phone", &self.phone)?;
        require("email", &self.email)?;
        require("registration date", &self.registered_on)?;
        require_date("registration date", &self.registered_on)
    }
}

impl Screen for ReadersScreen {
    type Row = Reader;
    type Form = ReaderForm;

    fn kind(&self) -> &'static str {
        "reader"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Reader>, OpError> {
        people::fetch_readers(conn)
    }

    fn row_id(&self, row: &Reader) -> i64 {
        row.id
    }

    fn form_for(&self, _conn: &Connection, row: &Reader) -> ReaderForm {
        ReaderForm {
            last_name: row.last_name.clone(),
            first_name: row.first_name.clone(),
            middle_name: row.middle_name.clone().unwrap_or_default(),
            passport: row.passport.clone(),
            phone: row.phone.clone(),
            email: row.email.clone(),
            registered_on: row.registered_on.clone(),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &ReaderForm) -> Result<(), OpError> {
        form.validate()?;
        people::insert_reader(
            conn,
            &form.last_name,
            &form.first_name,
            &form.middle_name,
            &form.passport,
            &form.phone,
            &form.email,
            &form.registered_on,
        )
    }

    fn update(&self, conn: &mut Connection, row: &Reader, form: &ReaderForm) -> Result<(), OpError> {
        form.validate()?;
        people::update_reader(
            conn,
            row.id,
            &form.last_name,
            &form.first_name,
            &form.middle_name,
            &form.passport,
            &form.phone,
            &form.email,
            &form.registered_on,
        )
    }

    fn delete(&self, conn: &mut Connection, row: &Reader) -> Result<(), OpError> {
        people::delete_reader(conn, row.id)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "last_name",
            "first_name",
            "middle_name",
            "passport",
            "phone",
            "email",
            "registered_on",
        ]
    }

    fn set_field(
        &self,
        _conn: &Connection,
        form: &mut ReaderForm,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        let slot = match field {
            "last_name" => &mut form.last_name,
            "first_name" => &mut form.first_name,
            "middle_name" => &mut form.middle_name,
            "passport" => &mut form.passport,
            "phone" => &mut form.phone,
            "email" => &mut form.email,
            "registered_on" => &mut form.registered_on,
            other => return Err(unknown_field(other)),
        };
        *slot = value.to_string();
        Ok(())
    }

    fn field_values(&self, form: &ReaderForm) -> Vec<(&'static str, String)> {
        vec![
            ("last_name", form.last_name.clone()),
            ("first_name", form.first_name.clone()),
            ("middle_name", form.middle_name.clone()),
            ("passport", form.passport.clone()),
            ("phone", form.phone.clone()),
            ("email", form.email.clone()),
            ("registered_on", form.registered_on.clone()),
        ]
    }
}
