//! One user's lookup-select-enrich cycle.
//!
//! A [`Session`] owns both forms, the transient result state (error slot,
//! loading flag, candidate list, selection) and the injected address source
//! and address book. All mutation goes through `&mut self`; the lookup's
//! network call is the only suspension point.

use std::collections::HashSet;

use addrbook_core::{
    Address, Form, FormError, FormField, LookupField, PersonField, RawAddress, transform_address,
};
use addrbook_store::AddressSink;
use addrbook_sync::{AddressSource, LookupError};
use tracing::{error, info, warn};

use crate::SessionError;

/// Ticket for one in-flight lookup, handed out by [`Session::begin_lookup`].
///
/// A ticket is only honoured by [`Session::finish_lookup`] if no clear-all
/// happened in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub postcode: String,
    pub house_number: String,
    generation: u64,
}

pub struct Session<S, B> {
    source: S,
    book: B,
    lookup_form: Form<LookupField>,
    person_form: Form<PersonField>,
    selected: Option<String>,
    candidates: Vec<Address>,
    loading: bool,
    error: Option<SessionError>,
    generation: u64,
}

impl<S, B> Session<S, B>
where
    S: AddressSource,
    B: AddressSink,
{
    /// Session with both forms starting out empty.
    pub fn new(source: S, book: B) -> Self {
        Self::with_forms(source, book, Form::empty(), Form::empty())
    }

    /// Session with caller-supplied initial form values; clear-all resets to these.
    pub fn with_forms(
        source: S,
        book: B,
        lookup_form: Form<LookupField>,
        person_form: Form<PersonField>,
    ) -> Self {
        Self {
            source,
            book,
            lookup_form,
            person_form,
            selected: None,
            candidates: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }

    // ── State ──

    pub fn lookup_form(&self) -> &Form<LookupField> {
        &self.lookup_form
    }

    pub fn person_form(&self) -> &Form<PersonField> {
        &self.person_form
    }

    pub fn lookup_form_mut(&mut self) -> &mut Form<LookupField> {
        &mut self.lookup_form
    }

    pub fn person_form_mut(&mut self) -> &mut Form<PersonField> {
        &mut self.person_form
    }

    pub fn candidates(&self) -> &[Address] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// Text for the error display slot.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn book(&self) -> &B {
        &self.book
    }

    // ── Input ──

    /// Change handler shared by both forms, routed by field name.
    pub fn handle_change(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if LookupField::from_name(name).is_some() {
            self.lookup_form.handle_change(name, value)
        } else {
            self.person_form.handle_change(name, value)
        }
    }

    /// Record the user's choice among the candidates. An empty id clears it.
    pub fn select_address(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.selected = (!id.is_empty()).then_some(id);
    }

    // ── Lookup workflow ──

    /// Validate the lookup form and move into the loading state.
    ///
    /// On success the error slot and the candidate list are cleared and the
    /// loading flag is set before any network traffic happens. A submit while
    /// another lookup is loading is refused with
    /// [`SessionError::LookupInFlight`] and changes nothing.
    pub fn begin_lookup(&mut self) -> Result<LookupRequest, SessionError> {
        if self.loading {
            warn!("lookup already in flight, ignoring submit");
            return Err(SessionError::LookupInFlight);
        }

        let postcode = self.lookup_form.get(LookupField::PostCode).to_string();
        let house_number = self.lookup_form.get(LookupField::HouseNumber).to_string();
        if postcode.is_empty() || house_number.is_empty() {
            warn!(%postcode, %house_number, "lookup form incomplete");
            return Err(self.fail(SessionError::MissingLookupFields));
        }

        self.error = None;
        self.candidates.clear();
        self.loading = true;
        self.generation = self.generation.wrapping_add(1);

        Ok(LookupRequest {
            postcode,
            house_number,
            generation: self.generation,
        })
    }

    /// Apply the outcome of the lookup started by `request`.
    ///
    /// Returns the number of candidates on success. Outcomes for a request
    /// that was superseded by clear-all are dropped with
    /// [`SessionError::LookupCancelled`].
    pub fn finish_lookup(
        &mut self,
        request: LookupRequest,
        outcome: Result<Vec<RawAddress>, LookupError>,
    ) -> Result<usize, SessionError> {
        if !self.loading || request.generation != self.generation {
            warn!(postcode = %request.postcode, "discarding stale lookup result");
            return Err(SessionError::LookupCancelled);
        }
        self.loading = false;

        match outcome {
            Ok(details) => {
                let mut seen = HashSet::new();
                self.candidates = details
                    .iter()
                    .map(|raw| transform_address(raw, &request.house_number))
                    .filter(|addr| {
                        let fresh = seen.insert(addr.id.clone());
                        if !fresh {
                            warn!(id = %addr.id, "dropping candidate with duplicate id");
                        }
                        fresh
                    })
                    .collect();
                info!(
                    postcode = %request.postcode,
                    house_number = %request.house_number,
                    count = self.candidates.len(),
                    "candidate addresses updated"
                );
                Ok(self.candidates.len())
            }
            Err(LookupError::Server { status, message }) => {
                warn!(status, ?message, "address lookup rejected");
                Err(self.fail(SessionError::Server { status, message }))
            }
            Err(err) => {
                error!(error = %err, "address lookup failed");
                Err(self.fail(SessionError::Transport))
            }
        }
    }

    /// Validate, query the source, and apply the result.
    pub async fn submit_lookup(&mut self) -> Result<usize, SessionError> {
        let request = self.begin_lookup()?;
        let outcome = self
            .source
            .fetch_addresses(&request.postcode, &request.house_number)
            .await;
        self.finish_lookup(request, outcome)
    }

    // ── Selection & enrichment workflow ──

    /// Merge the selected candidate with the personal-info form and save it.
    ///
    /// Checks, in order: something is selected and there are candidates;
    /// both names are filled; the selection is one of the candidates. The
    /// book is only touched when all three hold.
    pub fn submit_personal_info(&mut self) -> Result<(), SessionError> {
        let selected = match &self.selected {
            Some(id) if !self.candidates.is_empty() => id.clone(),
            _ => {
                warn!("personal info submitted without a selected address");
                return Err(self.fail(SessionError::NoAddressSelected));
            }
        };

        let first_name = self.person_form.get(PersonField::FirstName);
        let last_name = self.person_form.get(PersonField::LastName);
        if first_name.is_empty() || last_name.is_empty() {
            warn!("personal info form incomplete");
            return Err(self.fail(SessionError::MissingPersonFields));
        }

        let Some(found) = self.candidates.iter().find(|a| a.id == selected) else {
            warn!(id = %selected, "selected address is not a candidate");
            return Err(self.fail(SessionError::AddressNotFound));
        };

        let enriched = found.with_person(first_name, last_name);
        if let Err(err) = self.book.add_address(enriched) {
            error!(error = %err, "address book rejected entry");
            return Err(self.fail(SessionError::Store(err.to_string())));
        }

        self.error = None;
        Ok(())
    }

    // ── Clear all ──

    /// Reset every piece of transient state and both forms.
    ///
    /// A lookup still in flight is abandoned: its result will be discarded.
    pub fn clear_all(&mut self) {
        self.error = None;
        self.candidates.clear();
        self.selected = None;
        self.loading = false;
        self.lookup_form.reset();
        self.person_form.reset();
        self.generation = self.generation.wrapping_add(1);
        info!("session cleared");
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        self.error = Some(err.clone());
        err
    }
}
