//! Core library surface for the desk-side library management tool.
//!
//! The heart of the crate is one generic [`navigator::Navigator`] engine
//! instantiated per entity screen, the guarded inventory rules in
//! [`db::inventory`] that keep book copy counters derived correctly from
//! receipts and lendings, and the notification channel/pool pair that fans
//! status messages out to reusable auto-dismissing surfaces.

pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod navigator;
pub mod notify;
pub mod pool;
pub mod screens;

/// Persistence entry points used by the binary and the integration tests.
pub use db::{ensure_schema, open_default};

/// The navigator engine and per-action dispatch surface.
pub use navigator::{Action, Cursor, Navigator, Screen};

/// Notification fan-out and the reusable display surfaces.
pub use notify::NotificationChannel;
pub use pool::NotificationPool;
