//! Screen for stock arrivals. Book and librarian are foreign keys edited
//! through display strings; the persistence layer raises the book's
//! inventory counters in the same transaction as the receipt row.

use rusqlite::Connection;

use crate::dates::require_date;
use crate::db::resolve::{self, PersonKind};
use crate::db::receipts;
use crate::error::OpError;
use crate::models::Receipt;
use crate::navigator::Screen;

use super::{require, require_f64, require_i64, unknown_field, NameRef};

pub struct ReceiptsScreen;

#[derive(Debug, Clone, Default)]
pub struct ReceiptForm {
    pub invoice_number: String,
    pub received_on: String,
    pub supplier: String,
    pub quantity: String,
    pub unit_price: String,
    pub book: NameRef,
    pub librarian: NameRef,
}

struct ValidReceipt {
    quantity: i64,
    unit_price: f64,
}

impl ReceiptForm {
    fn validate(&self) -> Result<ValidReceipt, OpError> {
        require("invoice number", &self.invoice_number)?;
        require("receipt date", &self.received_on)?;
        require_date("receipt date", &self.received_on)?;
        require("supplier", &self.supplier)?;
        let quantity = require_i64("quantity", &self.quantity)?;
        if quantity <= 0 {
            return Err(OpError::validation("quantity must be a positive number"));
        }
        let unit_price = require_f64("unit price", &self.unit_price)?;
        Ok(ValidReceipt {
            quantity,
            unit_price,
        })
    }

    fn resolve_refs(&self, conn: &Connection) -> Result<(i64, i64), OpError> {
        let book_id = self
            .book
            .resolve_with("book", |title| resolve::book_id_by_title(conn, title))?;
        let librarian_id = self.librarian.resolve_with("librarian", |name| {
            resolve::person_id_by_full_name(conn, PersonKind::Librarian, name)
        })?;
        Ok((book_id, librarian_id))
    }
}

impl Screen for ReceiptsScreen {
    type Row = Receipt;
    type Form = ReceiptForm;

    fn kind(&self) -> &'static str {
        "receipt"
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Receipt>, OpError> {
        receipts::fetch_receipts(conn)
    }

    fn row_id(&self, row: &Receipt) -> i64 {
        row.id
    }

    fn form_for(&self, _conn: &Connection, row: &Receipt) -> ReceiptForm {
        ReceiptForm {
            invoice_number: row.invoice_number.clone(),
            received_on: row.received_on.clone(),
            supplier: row.supplier.clone(),
            quantity: row.quantity.to_string(),
            unit_price: row.unit_price.to_string(),
            book: NameRef::chosen(row.book_id, row.book_title.clone()),
            librarian: NameRef::chosen(row.librarian_id, row.librarian_name.clone()),
        }
    }

    fn insert(&self, conn: &mut Connection, form: &ReceiptForm) -> Result<(), OpError> {
        let valid = form.validate()?;
        let (book_id, librarian_id) = form.resolve_refs(conn)?;
        receipts::insert_receipt(
            conn,
            &form.invoice_number,
            &form.received_on,
            &form.supplier,
            valid.quantity,
            valid.unit_price,
            book_id,
            librarian_id,
        )
    }

    fn update(
        &self,
        conn: &mut Connection,
        row: &Receipt,
        form: &ReceiptForm,
    ) -> Result<(), OpError> {
        let valid = form.validate()?;
        let (book_id, librarian_id) = form.resolve_refs(conn)?;
        receipts::update_receipt(
            conn,
            row,
            &form.invoice_number,
            &form.received_on,
            &form.supplier,
            valid.quantity,
            valid.unit_price,
            book_id,
            librarian_id,
        )
    }

    fn delete(&self, conn: &mut Connection, row: &Receipt) -> Result<(), OpError> {
        receipts::delete_receipt(conn, row)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "invoice_number",
            "received_on",
            "supplier",
            "quantity",
            "unit_price",
            "book",
            "librarian",
        ]
    }

    fn set_field(
        &self,
        conn: &Connection,
        form: &mut ReceiptForm,
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
            "librarian" => {
                let id = resolve::person_id_by_full_name(conn, PersonKind::Librarian, value)?
                    .ok_or_else(|| OpError::not_found("librarian", value))?;
                form.librarian = NameRef::chosen(id, value);
                Ok(())
            }
            "invoice_number" => {
                form.invoice_number = value.to_string();
                Ok(())
            }
            "received_on" => {
                form.received_on = value.to_string();
                Ok(())
            }
            "supplier" => {
                form.supplier = value.to_string();
                Ok(())
            }
            "quantity" => {
                form.quantity = value.to_string();
                Ok(())
            }
            "unit_price" => {
                form.unit_price = value.to_string();
                Ok(())
            }
            other => Err(unknown_field(other)),
        }
    }

    fn field_values(&self, form: &ReceiptForm) -> Vec<(&'static str, String)> {
        vec![
            ("invoice_number", form.invoice_number.clone()),
            ("received_on", form.received_on.clone()),
            ("supplier", form.supplier.clone()),
            ("quantity", form.quantity.clone()),
            ("unit_price", form.unit_price.clone()),
            ("book", form.book.text.clone()),
            ("librarian", form.librarian.text.clone()),
        ]
    }
}
