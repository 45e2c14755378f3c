use crate::api::{ApiError, UpdateBrevetRequest};
use crate::authors::{decode_authors, encode_authors};
use crate::models::{AuthorRef, Brevet, Member};
use thiserror::Error;

pub(crate) const MSG_ROSTER_FAILED: &str = "Erreur lors de la récupération des membres";
pub(crate) const MSG_RECORD_FAILED: &str = "Erreur lors de la récupération du brevet";
pub(crate) const MSG_UPDATE_FAILED: &str = "Erreur lors de la mise à jour du brevet";
pub(crate) const MSG_UPDATED: &str = "Brevet mis à jour avec succès";

/// Local validation failure; nothing is sent.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormError {
    #[error("Veuillez sélectionner au moins un auteur.")]
    NoAuthor,
}

/// Why `begin_submit` did not produce a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitRejection {
    Invalid(FormError),
    /// A previous submit has not resolved yet.
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
    Rejected,
}

/// Load generation an async fetch was started under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// View lifetime a save was started under. Only teardown ends it; a reload does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SubmitTicket(u64);

/// Result of handing a response to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Applied {
    /// Started under an older generation; state untouched.
    Stale,
    Updated,
    Failed(&'static str),
}

/// Form state of one patent edit view.
///
/// Invariants:
/// - Load responses are applied only if their ticket matches `generation`.
/// - Submit responses are applied only if the view has not been torn down since.
/// - At most one submit is in flight (`phase == Submitting`), across reloads.
/// - The roster and the record write disjoint fields, so they may land in any order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditSession {
    title: String,
    doi: String,
    authors: Vec<AuthorRef>,
    roster: Vec<Member>,
    error: Option<String>,
    phase: SubmitPhase,
    generation: u64,
    lifetime: u64,
    pending_loads: u8,
}

impl EditSession {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn doi(&self) -> &str {
        &self.doi
    }

    pub fn roster(&self) -> &[Member] {
        &self.roster
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn selected_authors(&self) -> Vec<String> {
        self.authors.iter().map(|a| a.name.clone()).collect()
    }

    pub fn is_selected(&self, user_id: &str) -> bool {
        self.authors.iter().any(|a| a.user_id == user_id)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    fn fail(&mut self, message: &'static str) -> Applied {
        self.error = Some(message.to_string());
        Applied::Failed(message)
    }

    /// Start a new load generation for both fetches. Results of any earlier
    /// load become stale; a submit in flight keeps its ticket.
    pub fn begin_load(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.pending_loads = 2;
        Ticket(self.generation)
    }

    /// View is going away; nothing in flight may touch it afterwards.
    pub fn teardown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.lifetime = self.lifetime.wrapping_add(1);
        self.pending_loads = 0;
    }

    fn finish_load(&mut self) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
    }

    pub fn apply_roster(&mut self, ticket: Ticket, result: Result<Vec<Member>, ApiError>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        self.finish_load();

        match result {
            Ok(members) => {
                self.roster = members;
                Applied::Updated
            }
            Err(_) => self.fail(MSG_ROSTER_FAILED),
        }
    }

    pub fn apply_record(&mut self, ticket: Ticket, result: Result<Brevet, ApiError>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }
        self.finish_load();

        match result {
            Ok(brevet) => {
                self.authors = decode_authors(&brevet.author, &brevet.id_user);
                self.title = brevet.title;
                self.doi = brevet.doi;
                Applied::Updated
            }
            Err(_) => self.fail(MSG_RECORD_FAILED),
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_doi(&mut self, doi: String) {
        self.doi = doi;
    }

    /// Replace the selection with what the picker currently yields.
    pub fn select_authors(&mut self, authors: Vec<AuthorRef>) {
        self.authors = authors;
    }

    /// Validate and move to `Submitting`, returning the request body to send.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, UpdateBrevetRequest), SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::InFlight);
        }

        if self.authors.is_empty() {
            let e = FormError::NoAuthor;
            self.error = Some(e.to_string());
            self.phase = SubmitPhase::Rejected;
            return Err(SubmitRejection::Invalid(e));
        }

        let (author, id_user) = encode_authors(&self.authors);
        self.error = None;
        self.phase = SubmitPhase::Submitting;

        Ok((
            SubmitTicket(self.lifetime),
            UpdateBrevetRequest {
                title: self.title.clone(),
                doi: self.doi.clone(),
                author,
                id_user,
            },
        ))
    }

    pub fn finish_submit(&mut self, ticket: SubmitTicket, result: Result<(), ApiError>) -> Applied {
        if ticket.0 != self.lifetime {
            return Applied::Stale;
        }

        match result {
            Ok(()) => {
                self.phase = SubmitPhase::Succeeded;
                Applied::Updated
            }
            Err(_) => {
                self.phase = SubmitPhase::Failed;
                self.fail(MSG_UPDATE_FAILED)
            }
        }
    }
}

#[cfg(test)]
impl EditSession {
    pub fn authors(&self) -> &[AuthorRef] {
        &self.authors
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn selected_author_ids(&self) -> Vec<String> {
        self.authors.iter().map(|a| a.user_id.clone()).collect()
    }
}
