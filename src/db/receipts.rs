//! Queries for book receipts (stock arrivals). Every mutation here adjusts
//! the referenced book's inventory counters inside the same transaction, so
//! a receipt row and its counter effect commit or roll back together.

use rusqlite::{params, Connection};

use crate::db::inventory;
use crate::error::{OpError, StoreContext};
use crate::models::{joined_full_name, Receipt};

/// Retrieve every receipt in id order, hydrated with the book title and
/// librarian display name the form shows. LEFT JOINs keep rows visible even
/// when a reference dangles.
pub fn fetch_receipts(conn: &Connection) -> Result<Vec<Receipt>, OpError> {
    let mut stmt = conn
        .prepare(
            "SELECT r.id, r.invoice_number, r.received_on, r.supplier, r.quantity,
                    r.unit_price, r.book_id, r.librarian_id,
                    COALESCE(b.title, '') AS book_title,
                    l.last_name, l.first_name, l.middle_name
             FROM receipts r
             LEFT JOIN books b ON r.book_id = b.id
             LEFT JOIN librarians l ON r.librarian_id = l.id
             ORDER BY r.id",
        )
        .store_context("preparing receipt query")?;

    let receipts = stmt
        .query_map([], |row| {
            Ok(Receipt {
                id: row.get(0)?,
                invoice_number: row.get(1)?,
                received_on: row.get(2)?,
                supplier: row.get(3)?,
                quantity: row.get(4)?,
                unit_price: row.get(5)?,
                book_id: row.get(6)?,
                librarian_id: row.get(7)?,
                book_title: row.get(8)?,
                librarian_name: joined_full_name(row.get(9)?, row.get(10)?, row.get(11)?),
            })
        })
        .store_context("loading receipts")?
        .collect::<Result<Vec<_>, _>>()
        .store_context("collecting receipts")?;

    Ok(receipts)
}

/// Insert a receipt and raise the book's counters by its quantity.
#[allow(clippy::too_many_arguments)]
pub fn insert_receipt(
    conn: &mut Connection,
    invoice_number: &str,
    received_on: &str,
    supplier: &str,
    quantity: i64,
    unit_price: f64,
    book_id: i64,
    librarian_id: i64,
) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting receipt insert")?;

    tx.execute(
        "INSERT INTO receipts (invoice_number, received_on, supplier, quantity,
                               unit_price, book_id, librarian_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            invoice_number,
            received_on,
            supplier,
            quantity,
            unit_price,
            book_id,
            librarian_id
        ],
    )
    .store_context("adding receipt")?;

    inventory::receive_copies(&tx, book_id, quantity)?;

    tx.commit().store_context("committing receipt insert")
}

/// Update a receipt. A changed book reference is treated as withdrawing the
/// old quantity from the old book and receiving the new quantity into the
/// new one; a quantity-only change applies the signed delta to the same
/// book.
#[allow(clippy::too_many_arguments)]
pub fn update_receipt(
    conn: &mut Connection,
    old: &Receipt,
    invoice_number: &str,
    received_on: &str,
    supplier: &str,
    quantity: i64,
    unit_price: f64,
    book_id: i64,
    librarian_id: i64,
) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting receipt update")?;

    tx.execute(
        "UPDATE receipts SET invoice_number = ?1, received_on = ?2, supplier = ?3,
                             quantity = ?4, unit_price = ?5, book_id = ?6, librarian_id = ?7
         WHERE id = ?8",
        params![
            invoice_number,
            received_on,
            supplier,
            quantity,
            unit_price,
            book_id,
            librarian_id,
            old.id
        ],
    )
    .store_context("updating receipt")?;

    if book_id != old.book_id {
        inventory::withdraw_copies(&tx, old.book_id, old.quantity)?;
        inventory::receive_copies(&tx, book_id, quantity)?;
    } else {
        inventory::adjust_copies(&tx, book_id, quantity - old.quantity)?;
    }

    tx.commit().store_context("committing receipt update")
}

/// Delete a receipt and withdraw its quantity from the book's counters.
pub fn delete_receipt(conn: &mut Connection, receipt: &Receipt) -> Result<(), OpError> {
    let tx = conn.transaction().store_context("starting receipt delete")?;

    tx.execute("DELETE FROM receipts WHERE id = ?1", params![receipt.id])
        .store_context("deleting receipt")?;

    inventory::withdraw_copies(&tx, receipt.book_id, receipt.quantity)?;

    tx.commit().store_context("committing receipt delete")
}
