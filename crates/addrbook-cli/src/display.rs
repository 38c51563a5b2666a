//! Plain-text rendering of candidates, the address book, and session state.

use std::fmt::Write;

use addrbook_core::Address;
use addrbook_session::Session;
use addrbook_store::{AddressBook, AddressSink};
use addrbook_sync::AddressSource;

/// Candidate list as radio options, the selected one marked `(*)`.
pub fn render_candidates(candidates: &[Address], selected: Option<&str>) -> String {
    if candidates.is_empty() {
        return "No addresses found.\n".to_string();
    }
    let mut out = String::new();
    for addr in candidates {
        let mark = if selected == Some(addr.id.as_str()) { '*' } else { ' ' };
        let _ = writeln!(out, "({mark}) {:<24} {}", addr.id, addr.summary());
    }
    out
}

pub fn render_book(book: &AddressBook) -> String {
    if book.is_empty() {
        return "Address book is empty.\n".to_string();
    }
    let mut out = String::new();
    for (i, addr) in book.iter().enumerate() {
        let person = addr.person().unwrap_or_default();
        let _ = writeln!(out, "{:>3}. {person} - {}", i + 1, addr.summary());
    }
    out
}

/// Both forms, the selection, the loading flag, and the error slot.
pub fn render_state<S, B>(session: &Session<S, B>) -> String
where
    S: AddressSource,
    B: AddressSink,
{
    let mut out = String::new();
    let forms = session
        .lookup_form()
        .values()
        .into_iter()
        .chain(session.person_form().values());
    for (name, value) in forms {
        let _ = writeln!(out, "  {name:<12} {value:?}");
    }
    let _ = writeln!(out, "  {:<12} {}", "selected", session.selected().unwrap_or("-"));
    let _ = writeln!(out, "  {:<12} {}", "candidates", session.candidates().len());
    let _ = writeln!(out, "  {:<12} {}", "loading", session.is_loading());
    let _ = writeln!(
        out,
        "  {:<12} {}",
        "error",
        session.error_message().unwrap_or_else(|| "-".into())
    );
    out
}
