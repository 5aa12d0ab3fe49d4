//! Guarded inventory counter updates. These keep `books.total_copies` and
//! `books.available_copies` derived correctly from receipts (additive) and
//! lendings (subtractive while unreturned).
//!
//! Each update carries its guard in the WHERE clause, so an update that
//! would produce an invalid stock level simply matches zero rows. A zero-row
//! match is consistency drift, not a store failure: it is logged at warn
//! with a distinct message and never aborts the surrounding transaction.
//! Callers run these inside the same transaction as the primary receipt or
//! lending mutation so the pair commits or rolls back together.

use rusqlite::{params, Connection};

use crate::error::{OpError, StoreContext};

/// Record `quantity` arriving copies: both counters rise together.
pub fn receive_copies(conn: &Connection, book_id: i64, quantity: i64) -> Result<(), OpError> {
    let changed = conn
        .execute(
            "UPDATE books
             SET total_copies = total_copies + ?1,
                 available_copies = available_copies + ?1
             WHERE id = ?2",
            params![quantity, book_id],
        )
        .store_context("raising book copy counters")?;
    report_drift(changed, book_id, "receive");
    Ok(())
}

/// Reverse a receipt of `quantity` copies. Guarded by `total_copies >= q` to
/// prevent negative stock; the guard failing leaves the counters untouched.
pub fn withdraw_copies(conn: &Connection, book_id: i64, quantity: i64) -> Result<(), OpError> {
    let changed = conn
        .execute(
            "UPDATE books
             SET total_copies = total_copies - ?1,
                 available_copies = available_copies - ?1
             WHERE id = ?2 AND total_copies >= ?1",
            params![quantity, book_id],
        )
        .store_context("lowering book copy counters")?;
    report_drift(changed, book_id, "withdraw");
    Ok(())
}

/// Take one copy off the shelf for a lending. Guarded by `available > 0`;
/// note the guard does not block the lending row itself, so a lending can be
/// recorded against a book with zero available copies and only the decrement
/// is skipped. A known gap, deliberately left in place; the skip shows up in
/// the drift log.
pub fn lend_copy(conn: &Connection, book_id: i64) -> Result<(), OpError> {
    let changed = conn
        .execute(
            "UPDATE books
             SET available_copies = available_copies - 1
             WHERE id = ?1 AND available_copies > 0",
            params![book_id],
        )
        .store_context("lowering available copies")?;
    report_drift(changed, book_id, "lend");
    Ok(())
}

/// Put one copy back on the shelf, unconditionally.
pub fn return_copy(conn: &Connection, book_id: i64) -> Result<(), OpError> {
    let changed = conn
        .execute(
            "UPDATE books
             SET available_copies = available_copies + 1
             WHERE id = ?1",
            params![book_id],
        )
        .store_context("raising available copies")?;
    report_drift(changed, book_id, "return");
    Ok(())
}

/// Apply a receipt quantity change against a single book as a signed delta.
pub fn adjust_copies(conn: &Connection, book_id: i64, delta: i64) -> Result<(), OpError> {
    if delta > 0 {
        receive_copies(conn, book_id, delta)
    } else if delta < 0 {
        withdraw_copies(conn, book_id, -delta)
    } else {
        Ok(())
    }
}

fn report_drift(changed: usize, book_id: i64, rule: &str) {
    if changed == 0 {
        log::warn!(
            "inventory drift: {rule} rule matched no rows for book {book_id} \
             (guard failed or book missing)"
        );
    }
}
