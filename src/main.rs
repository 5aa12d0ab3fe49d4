//! Line-oriented driver binary. Bootstraps logging and the database, wires
//! the notification channel to stdout and to the surface pool, then reads
//! commands from stdin and dispatches navigator actions. Deliberately thin:
//! all behavior lives in the library crate.

use std::cell::RefCell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use rusqlite::Connection;
use simplelog::{Config, LevelFilter, WriteLogger};

use library_desk::error::OpError;
use library_desk::navigator::{Action, Cursor, Navigator, Screen};
use library_desk::screens::{
    BooksScreen, GenresScreen, LendingsScreen, LibrariansScreen, ReadersScreen, ReceiptsScreen,
};
use library_desk::{db, NotificationChannel, NotificationPool};

/// Object-safe view of a `Navigator<S>` so the command loop can hold
/// whichever screen is open behind one box.
trait ScreenNavigator {
    fn dispatch(&mut self, action: Action, conn: &mut Connection, channel: &NotificationChannel);
    fn set_field(&mut self, conn: &Connection, field: &str, value: &str) -> Result<(), OpError>;
    fn field_names(&self) -> &'static [&'static str];
    fn field_values(&self) -> Vec<(&'static str, String)>;
    fn describe(&self) -> String;
}

impl<S: Screen> ScreenNavigator for Navigator<S> {
    fn dispatch(&mut self, action: Action, conn: &mut Connection, channel: &NotificationChannel) {
        Navigator::dispatch(self, action, conn, channel);
    }

    fn set_field(&mut self, conn: &Connection, field: &str, value: &str) -> Result<(), OpError> {
        Navigator::set_field(self, conn, field, value)
    }

    fn field_names(&self) -> &'static [&'static str] {
        self.screen().field_names()
    }

    fn field_values(&self) -> Vec<(&'static str, String)> {
        Navigator::field_values(self)
    }

    fn describe(&self) -> String {
        match self.cursor() {
            Cursor::Reviewing(i) => format!(
                "{}: record {} of {}",
                self.screen().kind(),
                i + 1,
                self.rows().len()
            ),
            Cursor::Composing => format!("{}: composing a new record", self.screen().kind()),
        }
    }
}

fn open_screen(
    name: &str,
    conn: &Connection,
    channel: &NotificationChannel,
) -> Option<Box<dyn ScreenNavigator>> {
    match name {
        "books" => Some(Box::new(Navigator::open(BooksScreen, conn, channel))),
        "genres" => Some(Box::new(Navigator::open(GenresScreen, conn, channel))),
        "librarians" => Some(Box::new(Navigator::open(LibrariansScreen, conn, channel))),
        "readers" => Some(Box::new(Navigator::open(ReadersScreen, conn, channel))),
        "receipts" => Some(Box::new(Navigator::open(ReceiptsScreen, conn, channel))),
        "lendings" => Some(Box::new(Navigator::open(LendingsScreen, conn, channel))),
        _ => None,
    }
}

fn init_logging() -> Result<()> {
    let dir = db::connection::data_dir()?;
    fs::create_dir_all(&dir).context("failed to create data directory")?;
    let file =
        fs::File::create(dir.join("library-desk.log")).context("failed to create log file")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .context("failed to initialize logging")?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let mut conn = db::open_default()?;

    let channel = NotificationChannel::new();
    let pool = Rc::new(RefCell::new(NotificationPool::new()));

    // Surfaces mirror what a windowed front end would show; stdout is the
    // second, human-facing subscriber.
    let sink = Rc::clone(&pool);
    channel.subscribe(move |message| {
        sink.borrow_mut().post(message, Instant::now());
    });
    channel.subscribe(|message| println!("* {message}"));

    println!("library-desk. commands: open <screen> | prev | next | save | delete");
    println!("                        set <field> <value> | fields | show | stock <title> | quit");

    let stdin = io::stdin();
    let mut active: Option<Box<dyn ScreenNavigator>> = None;

    loop {
        pool.borrow_mut().tick(Instant::now());

        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => break,
            "open" => match open_screen(rest, &conn, &channel) {
                Some(nav) => {
                    println!("{}", nav.describe());
                    active = Some(nav);
                }
                None => println!("unknown screen \"{rest}\""),
            },
            "prev" | "next" | "save" | "delete" => match active.as_mut() {
                Some(nav) => {
                    let action = match command {
                        "prev" => Action::Previous,
                        "next" => Action::Next,
                        "save" => Action::Save,
                        _ => Action::Delete,
                    };
                    nav.dispatch(action, &mut conn, &channel);
                    println!("{}", nav.describe());
                }
                None => println!("no screen open"),
            },
            "set" => match active.as_mut() {
                Some(nav) => {
                    let (field, value) = match rest.split_once(' ') {
                        Some((field, value)) => (field, value.trim()),
                        None => (rest, ""),
                    };
                    if let Err(err) = nav.set_field(&conn, field, value) {
                        channel.publish(&err.to_string());
                    }
                }
                None => println!("no screen open"),
            },
            "fields" => match active.as_ref() {
                Some(nav) => println!("  {}", nav.field_names().join(", ")),
                None => println!("no screen open"),
            },
            "show" => match active.as_ref() {
                Some(nav) => {
                    println!("{}", nav.describe());
                    for (field, value) in nav.field_values() {
                        println!("  {field}: {value}");
                    }
                }
                None => println!("no screen open"),
            },
            "stock" => match db::resolve::book_id_by_title(&conn, rest) {
                Ok(Some(id)) => match db::books::fetch_counters(&conn, id) {
                    Ok((total, available)) => {
                        println!("\"{rest}\": {available} of {total} copies available")
                    }
                    Err(err) => channel.publish(&err.to_string()),
                },
                Ok(None) => println!("no book titled \"{rest}\""),
                Err(err) => channel.publish(&err.to_string()),
            },
            other => println!("unknown command \"{other}\""),
        }
    }

    Ok(())
}
