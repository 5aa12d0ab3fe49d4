//! Domain models mirroring the SQLite schema. These stay light-weight data
//! holders so the persistence layer and the navigators can focus on queries
//! and state transitions. Date columns are kept as plain `YYYY-MM-DD`
//! strings because that is exactly what the store persists and the forms
//! edit; parsing happens only at validation time.

/// A book category. `name` doubles as the unique display string users pick
/// from and the resolver matches on.
#[derive(Debug, Clone)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A catalogued title together with its inventory counters. `available`
/// tracks copies currently on the shelf and must never exceed `total`;
/// receipts raise both counters, lendings move `available` alone.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year_published: i64,
    /// Genre reference; nullable because legacy rows may predate the genre
    /// catalogue.
    pub genre_id: Option<i64>,
    pub total_copies: i64,
    pub available_copies: i64,
    pub storage_location: String,
}

/// A staff member who can record receipts and lendings.
#[derive(Debug, Clone)]
pub struct Librarian {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub login: String,
    pub password: String,
    pub access_level: Option<String>,
}

/// A registered library patron.
#[derive(Debug, Clone)]
pub struct Reader {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub passport: String,
    pub phone: String,
    pub email: String,
    /// Registration date as a `YYYY-MM-DD` string.
    pub registered_on: String,
}

/// A stock arrival row, hydrated with the display strings its foreign keys
/// point at so the form can show them without extra lookups.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub id: i64,
    pub invoice_number: String,
    pub received_on: String,
    pub supplier: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub book_id: i64,
    pub librarian_id: i64,
    /// Joined book title; empty when the referenced book no longer exists.
    pub book_title: String,
    /// Joined librarian full name; empty when the reference is dangling.
    pub librarian_name: String,
}

/// A loan row, hydrated like [`Receipt`]. An empty `returned_on` means the
/// book is still out.
#[derive(Debug, Clone)]
pub struct Lending {
    pub id: i64,
    pub issued_on: String,
    pub return_period: String,
    pub returned_on: String,
    pub status: String,
    pub book_id: i64,
    pub reader_id: i64,
    pub librarian_id: i64,
    pub book_title: String,
    pub reader_name: String,
    pub librarian_name: String,
}

impl Lending {
    /// True once a return date has been recorded.
    pub fn is_returned(&self) -> bool {
        !self.returned_on.is_empty()
    }
}

/// Compose the `last first [middle]` display string used everywhere a person
/// is shown or looked up. The middle name is omitted entirely when absent so
/// the string round-trips through the resolver's positional split.
pub fn full_name(last: &str, first: &str, middle: Option<&str>) -> String {
    match middle {
        Some(middle) if !middle.is_empty() => format!("{last} {first} {middle}"),
        _ => format!("{last} {first}"),
    }
}

/// [`full_name`] over LEFT-JOINed name columns, where a dangling reference
/// leaves every component NULL. Such rows display as an empty string.
pub fn joined_full_name(
    last: Option<String>,
    first: Option<String>,
    middle: Option<String>,
) -> String {
    match (last, first) {
        (Some(last), Some(first)) => full_name(&last, &first, middle.as_deref()),
        _ => String::new(),
    }
}
