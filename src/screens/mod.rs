//! The per-entity [`Screen`](crate::navigator::Screen) descriptors plugged
//! into the generic navigator, plus the small form-validation helpers they
//! share. Forms hold edit-buffer strings exactly as typed; validation runs
//! only when a commit is attempted, and a failed commit leaves the buffer
//! untouched.

mod books;
mod genres;
mod lendings;
mod librarians;
mod readers;
mod receipts;

pub use books::{BookForm, BooksScreen};
pub use genres::{GenreForm, GenresScreen};
pub use lendings::{LendingForm, LendingsScreen};
pub use librarians::{LibrarianForm, LibrariansScreen};
pub use readers::{ReaderForm, ReadersScreen};
pub use receipts::{ReceiptForm, ReceiptsScreen};

use crate::error::OpError;

/// A foreign-key form field: the display string the user sees plus the
/// resolved id carried from the moment the value was chosen. Free-typed
/// text leaves `chosen` empty and falls back to name resolution at commit
/// time, which is the fragile path the display-string scheme always had.
#[derive(Debug, Clone, Default)]
pub struct NameRef {
    pub text: String,
    pub chosen: Option<i64>,
}

impl NameRef {
    /// A value picked from a dropdown: the id travels with the text.
    pub fn chosen(id: i64, text: impl Into<String>) -> Self {
        NameRef {
            text: text.into(),
            chosen: Some(id),
        }
    }

    /// Free-typed text with no id yet.
    pub fn typed(text: impl Into<String>) -> Self {
        NameRef {
            text: text.into(),
            chosen: None,
        }
    }

    /// Produce the stable id: the carried one when present, otherwise a
    /// resolver lookup on the display text. An empty field is a validation
    /// failure; an unmatched name is a resolution failure naming the kind.
    pub fn resolve_with<F>(&self, kind: &'static str, lookup: F) -> Result<i64, OpError>
    where
        F: FnOnce(&str) -> Result<Option<i64>, OpError>,
    {
        if let Some(id) = self.chosen {
            return Ok(id);
        }
        if self.text.trim().is_empty() {
            return Err(OpError::validation(format!("{kind} must be selected")));
        }
        match lookup(&self.text)? {
            Some(id) => Ok(id),
            None => Err(OpError::not_found(kind, self.text.clone())),
        }
    }
}

/// Reject a blank required field.
pub(crate) fn require(label: &str, value: &str) -> Result<(), OpError> {
    if value.trim().is_empty() {
        Err(OpError::validation(format!("{label} is required")))
    } else {
        Ok(())
    }
}

/// Parse a required integer field.
pub(crate) fn require_i64(label: &str, value: &str) -> Result<i64, OpError> {
    require(label, value)?;
    value
        .trim()
        .parse()
        .map_err(|_| OpError::validation(format!("{label} must be a whole number")))
}

/// Parse a required decimal field.
pub(crate) fn require_f64(label: &str, value: &str) -> Result<f64, OpError> {
    require(label, value)?;
    value
        .trim()
        .parse()
        .map_err(|_| OpError::validation(format!("{label} must be a number")))
}

/// The error for a `set` against a field the screen does not have.
pub(crate) fn unknown_field(field: &str) -> OpError {
    OpError::validation(format!("unknown field \"{field}\""))
}
