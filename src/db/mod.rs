//! Persistence module split across logical submodules, one per table family
//! plus the cross-cutting inventory rules and the name resolver.

pub mod books;
pub mod connection;
pub mod genres;
pub mod inventory;
pub mod lendings;
pub mod people;
pub mod receipts;
pub mod resolve;

pub use connection::{ensure_schema, open_default};
