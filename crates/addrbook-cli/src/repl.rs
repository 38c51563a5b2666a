//! Line-driven interactive session over stdin.

use addrbook_session::Session;
use addrbook_store::AddressBook;
use addrbook_sync::AddressSource;
use anyhow::Context;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display;

const HELP: &str = "\
Commands:
  set <field> [value]  set a form field (postCode, houseNumber, firstName, lastName)
  find                 look up addresses for the post code and house number
  list                 show the candidate addresses
  select <id>          choose a candidate address
  add                  save the selected address with the first and last name
  clear                clear all fields, results, and errors
  book                 show the address book (`book json` for JSON)
  state                show the current form values and status
  help                 show this help
  quit                 leave the session
";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Find,
    List,
    Select(String),
    Add,
    Clear,
    Book { json: bool },
    State,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (cmd, rest) = split_word(line);

    let command = match cmd {
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err(CommandError::Usage("set <field> [value]"));
            }
            Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "select" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("select <id>"));
            }
            Command::Select(rest.to_string())
        }
        "find" => Command::Find,
        "list" => Command::List,
        "add" => Command::Add,
        "clear" => Command::Clear,
        "book" => Command::Book {
            json: rest == "json",
        },
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<S: AddressSource>(mut session: Session<S, AddressBook>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{HELP}");

    while let Some(line) = lines.next_line().await.context("reading command")? {
        match parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => print!("{}", execute(&mut session, command).await?),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

/// Apply one command to the session and return what to print.
pub async fn execute<S: AddressSource>(
    session: &mut Session<S, AddressBook>,
    command: Command,
) -> anyhow::Result<String> {
    let out = match command {
        Command::Set { field, value } => match session.handle_change(&field, &value) {
            Ok(()) => String::new(),
            Err(err) => format!("{err}\n"),
        },
        Command::Find => match session.submit_lookup().await {
            Ok(_) => display::render_candidates(session.candidates(), session.selected()),
            Err(err) => format!("! {err}\n"),
        },
        Command::List => display::render_candidates(session.candidates(), session.selected()),
        Command::Select(id) => {
            session.select_address(id);
            display::render_candidates(session.candidates(), session.selected())
        }
        Command::Add => match session.submit_personal_info() {
            Ok(()) => {
                let saved = session
                    .book()
                    .entries()
                    .last()
                    .map(|a| a.summary())
                    .unwrap_or_default();
                format!("Saved {saved}\n")
            }
            Err(err) => format!("! {err}\n"),
        },
        Command::Clear => {
            session.clear_all();
            "Cleared all fields\n".to_string()
        }
        Command::Book { json: true } => {
            let json = session
                .book()
                .to_json_pretty()
                .context("serialising address book")?;
            format!("{json}\n")
        }
        Command::Book { json: false } => display::render_book(session.book()),
        Command::State => display::render_state(session),
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(out)
}
