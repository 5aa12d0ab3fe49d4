//! The simplest screen: genres carry a single unique name.

use rusqlite::Connection;

use crate::db::genres;
use crate::error::OpError;
use crate::models::Genre;
use crate::navigator::Screen;

use super::{require, unknown_field};

pub struct GenresScreen;

#[derive(Debug, Clone, Default)]
pub struct GenreForm {
    pub name: String,
}

impl Screen for GenresScreen {
    type Row = Genre;
    type Form = GenreForm;

    fn kind(&self) -> &'static str {
        "genre"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Genre>, OpError> {
        genres::fetch_genres(conn)
    }

    fn row_id(&self, row: &Genre) -> i64 {
        row.id
    }

    fn form_for(&self, _conn: &Connection, row: &Genre) -> GenreForm {
        GenreForm {
            name: row.name.clone(),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &GenreForm) -> Result<(), OpError> {
        require("genre name", &form.name)?;
        genres::insert_genre(conn, &form.name)
    }

    fn update(&self, conn: &mut Connection, row: &Genre, form: &GenreForm) -> Result<(), OpError> {
        require("genre name", &form.name)?;
        genres::update_genre(conn, row.id, &form.name)
    }

    fn delete(&self, conn: &mut Connection, row: &Genre) -> Result<(), OpError> {
        genres::delete_genre(conn, row.id)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["name"]
    }

    fn set_field(
        &self,
        _conn: &Connection,
        form: &mut GenreForm,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        match field {
            "name" => {
                form.name = value.to_string();
                Ok(())
            }
            other => Err(unknown_field(other)),
        }
    }

    fn field_values(&self, form: &GenreForm) -> Vec<(&'static str, String)> {
        vec![("name", form.name.clone())]
    }
}
