//! The generic record navigator: an in-memory cursor over one entity's rows
//! supporting linear paging, a "new record" composing mode, update-in-place,
//! and deletion. One engine serves all six entity screens; everything
//! entity-specific (load query, form mapping, validation, store mutations)
//! lives behind the [`Screen`] descriptor.
//!
//! State is an explicit [`Cursor`] value and every user action arrives as a
//! discrete [`Action`], so transitions are plain functions over values and
//! unit-testable against an in-memory store. After every successful
//! mutation the snapshot is reloaded in full rather than patched, which
//! keeps the displayed rows honest about store-side defaults at the cost of
//! a redundant round trip.

use std::cmp::min;

use rusqlite::Connection;

use crate::error::OpError;
use crate::notify::NotificationChannel;

/// Where the navigator currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Positioned on an existing row of the snapshot.
    Reviewing(usize),
    /// "New record" mode: no row selected, the form is being composed.
    Composing,
}

/// The four user actions every screen exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    Save,
    Delete,
}

/// Per-entity behavior plugged into the navigator. Implementations hold no
/// row state of their own; the navigator owns the snapshot and the form.
pub trait Screen {
    /// One loaded snapshot row.
    type Row: Clone;
    /// Edit buffer for composing or reviewing a record.
    type Form: Clone + Default;

    /// Singular noun used in notifications ("book", "receipt", ...).
    fn kind(&self) -> &'static str;

    /// Load the full snapshot, in the order the navigator pages through.
    fn load(&self, conn: &Connection) -> Result<Vec<Self::Row>, OpError>;

    /// Stable identifier of a row, used to re-find the same logical record
    /// after a reload.
    fn row_id(&self, row: &Self::Row) -> i64;

    /// Populate the edit buffer from an existing row. Receives the
    /// connection because some screens resolve display strings (for example
    /// the genre name) while hydrating.
    fn form_for(&self, conn: &Connection, row: &Self::Row) -> Self::Form;

    /// Validate the form and insert a new record. Must not mutate the store
    /// when validation or resolution fails.
    fn insert(&self, conn: &mut Connection, form: &Self::Form) -> Result<(), OpError>;

    /// Validate the form and update the given row in place.
    fn update(&self, conn: &mut Connection, row: &Self::Row, form: &Self::Form)
        -> Result<(), OpError>;

    /// Delete the given row.
    fn delete(&self, conn: &mut Connection, row: &Self::Row) -> Result<(), OpError>;

    /// Editable field names, for the driver's `set` command and `show`.
    fn field_names(&self) -> &'static [&'static str];

    /// Write one field of the edit buffer. Foreign-key fields resolve the
    /// display string immediately and carry the id from that moment; an
    /// unresolved name leaves the form unchanged.
    fn set_field(
        &self,
        conn: &Connection,
        form: &mut Self::Form,
        field: &str,
        value: &str,
    ) -> Result<(), OpError>;

    /// Current field values in display order.
    fn field_values(&self, form: &Self::Form) -> Vec<(&'static str, String)>;
}

/// Cursor-based browse/edit/insert/delete controller for one entity.
pub struct Navigator<S: Screen> {
    screen: S,
    rows: Vec<S::Row>,
    cursor: Cursor,
    form: S::Form,
}

impl<S: Screen> Navigator<S> {
    /// Load the snapshot and position on the first row, or enter composing
    /// mode when the table is empty. A load failure is reported and treated
    /// as an empty snapshot so the screen still comes up.
    pub fn open(screen: S, conn: &Connection, channel: &NotificationChannel) -> Self {
        let mut nav = Navigator {
            screen,
            rows: Vec::new(),
            cursor: Cursor::Composing,
            form: S::Form::default(),
        };
        nav.reload(conn, channel);
        if nav.rows.is_empty() {
            nav.enter_composing(channel);
        } else {
            nav.position(conn, 0);
        }
        nav
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn rows(&self) -> &[S::Row] {
        &self.rows
    }

    pub fn form(&self) -> &S::Form {
        &self.form
    }

    /// Direct mutable access to the edit buffer, for callers that manage
    /// field updates themselves rather than going through [`set_field`].
    ///
    /// [`set_field`]: Navigator::set_field
    pub fn form_mut(&mut self) -> &mut S::Form {
        &mut self.form
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// The row under the cursor, when reviewing.
    pub fn current_row(&self) -> Option<&S::Row> {
        match self.cursor {
            Cursor::Reviewing(i) => self.rows.get(i),
            Cursor::Composing => None,
        }
    }

    /// Write one form field through the screen descriptor.
    pub fn set_field(
        &mut self,
        conn: &Connection,
        field: &str,
        value: &str,
    ) -> Result<(), OpError> {
        self.screen.set_field(conn, &mut self.form, field, value)
    }

    /// Current form contents in display order.
    pub fn field_values(&self) -> Vec<(&'static str, String)> {
        self.screen.field_values(&self.form)
    }

    /// Single entry point for the four user actions.
    pub fn dispatch(&mut self, action: Action, conn: &mut Connection, channel: &NotificationChannel) {
        match action {
            Action::Previous => self.previous(conn, channel),
            Action::Next => self.next(conn, channel),
            Action::Save => self.save(conn, channel),
            Action::Delete => self.delete(conn, channel),
        }
    }

    /// Step back one record. From composing mode this returns to the last
    /// row; at the first row it stays put and says so.
    pub fn previous(&mut self, conn: &Connection, channel: &NotificationChannel) {
        match self.cursor {
            Cursor::Composing if !self.rows.is_empty() => {
                self.position(conn, self.rows.len() - 1);
            }
            Cursor::Composing => {
                channel.publish("this is the first record");
            }
            Cursor::Reviewing(i) if i > 0 => {
                self.position(conn, i - 1);
            }
            Cursor::Reviewing(_) => {
                channel.publish("this is the first record");
            }
        }
    }

    /// Step forward one record. Past the last row the navigator enters
    /// composing mode; in composing mode the action commits the new record.
    pub fn next(&mut self, conn: &mut Connection, channel: &NotificationChannel) {
        match self.cursor {
            Cursor::Composing => self.commit_insert(conn, channel),
            Cursor::Reviewing(i) if i + 1 < self.rows.len() => {
                self.position(conn, i + 1);
            }
            Cursor::Reviewing(_) => self.enter_composing(channel),
        }
    }

    /// Commit the form: insert when composing, update-in-place when
    /// reviewing. After an update the cursor stays on the same logical
    /// record even if the reload shuffled positions.
    pub fn save(&mut self, conn: &mut Connection, channel: &NotificationChannel) {
        match self.cursor {
            Cursor::Composing => self.commit_insert(conn, channel),
            Cursor::Reviewing(i) => {
                let row = match self.rows.get(i) {
                    Some(row) => row.clone(),
                    None => return,
                };
                match self.screen.update(conn, &row, &self.form) {
                    Ok(()) => {
                        channel.publish(&format!("{} record updated", self.screen.kind()));
                        let id = self.screen.row_id(&row);
                        self.reload(conn, channel);
                        if self.rows.is_empty() {
                            self.enter_composing(channel);
                        } else {
                            let at = self
                                .rows
                                .iter()
                                .position(|r| self.screen.row_id(r) == id)
                                .unwrap_or_else(|| min(i, self.rows.len() - 1));
                            self.position(conn, at);
                        }
                    }
                    Err(err) => channel.publish(&err.to_string()),
                }
            }
        }
    }

    /// Delete the row under the cursor and re-position on its neighbour.
    /// A no-op while composing: there is nothing to delete yet.
    pub fn delete(&mut self, conn: &mut Connection, channel: &NotificationChannel) {
        let i = match self.cursor {
            Cursor::Reviewing(i) => i,
            Cursor::Composing => {
                log::debug!("delete ignored while composing a new {}", self.screen.kind());
                return;
            }
        };
        let row = match self.rows.get(i) {
            Some(row) => row.clone(),
            None => return,
        };
        match self.screen.delete(conn, &row) {
            Ok(()) => {
                channel.publish(&format!("{} record deleted", self.screen.kind()));
                self.reload(conn, channel);
                if self.rows.is_empty() {
                    self.enter_composing(channel);
                } else {
                    self.position(conn, min(i, self.rows.len() - 1));
                }
            }
            Err(err) => channel.publish(&err.to_string()),
        }
    }

    /// Validated insert shared by `Next`-while-composing and `Save`. On any
    /// failure the store is untouched and the form keeps what the user
    /// typed.
    fn commit_insert(&mut self, conn: &mut Connection, channel: &NotificationChannel) {
        match self.screen.insert(conn, &self.form) {
            Ok(()) => {
                channel.publish(&format!("{} record added", self.screen.kind()));
                self.reload(conn, channel);
                if self.rows.is_empty() {
                    // Reload failed right after the insert; fall back to
                    // composing over the empty snapshot.
                    self.enter_composing(channel);
                } else {
                    self.position(conn, self.rows.len() - 1);
                }
            }
            Err(err) => channel.publish(&err.to_string()),
        }
    }

    /// Replace the snapshot wholesale. A failed load reports and leaves an
    /// empty snapshot; callers decide where the cursor lands.
    fn reload(&mut self, conn: &Connection, channel: &NotificationChannel) {
        match self.screen.load(conn) {
            Ok(rows) => {
                log::debug!("loaded {} {} records", rows.len(), self.screen.kind());
                self.rows = rows;
            }
            Err(err) => {
                channel.publish(&err.to_string());
                self.rows = Vec::new();
            }
        }
    }

    fn position(&mut self, conn: &Connection, at: usize) {
        self.cursor = Cursor::Reviewing(at);
        self.form = self.screen.form_for(conn, &self.rows[at]);
    }

    fn enter_composing(&mut self, channel: &NotificationChannel) {
        self.cursor = Cursor::Composing;
        self.form = S::Form::default();
        channel.publish(&format!("composing a new {} record", self.screen.kind()));
    }
}
