use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, Contact, ContactDraft, ContactId};
use crate::contacts::{DraftForm, FieldErrors, filter_contacts};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient one-line message for the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Local::now(),
        }
    }
}

/// Why a submit did not turn into a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    NoForm,
    InFlight,
    Invalid(FieldErrors),
}

/// Everything the screen shows. Only the controller mutates it.
#[derive(Debug, Clone)]
pub struct ContactsState {
    pub load: LoadState,
    /// Full list, newest first for contacts created in this session.
    pub contacts: Vec<Contact>,
    /// `contacts` narrowed by `search_term`.
    pub filtered: Vec<Contact>,
    pub search_term: String,
    pub form: Option<DraftForm>,
    pub pending_delete: Option<ContactId>,
    pub notice: Option<Notice>,
    load_generation: u64,
}

impl Default for ContactsState {
    fn default() -> Self {
        Self {
            load: LoadState::Idle,
            contacts: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            form: None,
            pending_delete: None,
            notice: None,
            load_generation: 0,
        }
    }
}

impl ContactsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    fn refilter(&mut self) {
        self.filtered = filter_contacts(&self.contacts, &self.search_term);
    }

    /// Enter `Loading`. Returns the generation the result must carry, or
    /// `None` when a load is already in flight.
    pub fn begin_load(&mut self) -> Option<u64> {
        if self.is_loading() {
            debug!("load already in flight");
            return None;
        }
        self.load_generation += 1;
        self.load = LoadState::Loading;
        Some(self.load_generation)
    }

    pub fn apply_loaded(&mut self, generation: u64, result: Result<Vec<Contact>, &ApiError>) {
        if generation != self.load_generation || !self.is_loading() {
            warn!(generation, current = self.load_generation, "dropping stale load result");
            return;
        }
        match result {
            Ok(contacts) => {
                info!(count = contacts.len(), "contacts loaded");
                self.contacts = contacts;
                self.refilter();
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                error!(kind=?e.kind(), status=?e.status(), err=%e, "failed to load contacts");
                self.load = LoadState::LoadFailed(e.to_string());
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    pub fn open_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(DraftForm::new());
        }
    }

    /// Close the form. A form with a create in flight stays open until the
    /// result arrives.
    pub fn cancel_form(&mut self) -> bool {
        if self.form.as_ref().is_some_and(|f| f.submitting) {
            debug!("cancel ignored while submitting");
            return false;
        }
        self.form = None;
        true
    }

    fn submitting_form(&mut self) -> Option<&mut DraftForm> {
        self.form.as_mut().filter(|f| f.submitting)
    }

    /// Validate the open form and mark it submitting.
    pub fn begin_submit(&mut self) -> Result<ContactDraft, SubmitRejected> {
        let form = self.form.as_mut().ok_or(SubmitRejected::NoForm)?;
        if form.submitting {
            return Err(SubmitRejected::InFlight);
        }
        form.submit_error = None;
        let draft = form.validate().map_err(SubmitRejected::Invalid)?;
        form.submitting = true;
        Ok(draft)
    }

    /// Insert the server's record first, or replace an entry with the same id.
    fn upsert_front(&mut self, contact: Contact) {
        if let Some(existing) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *existing = contact;
        } else {
            self.contacts.insert(0, contact);
        }
        self.refilter();
    }

    pub fn apply_created(&mut self, result: Result<Contact, &ApiError>) {
        match result {
            Ok(contact) => {
                info!(id=%contact.id, "contact created");
                self.notice = Some(Notice::new(
                    NoticeLevel::Info,
                    format!("Added {}", contact.name),
                ));
                self.upsert_front(contact);
                if self.submitting_form().is_some() {
                    self.form = None;
                }
            }
            Err(e) => {
                error!(kind=?e.kind(), status=?e.status(), err=%e, "failed to create contact");
                let message = e.to_string();
                if let Some(form) = self.submitting_form() {
                    form.submitting = false;
                    form.submit_error = Some(message.clone());
                }
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to create contact: {message}"),
                ));
            }
        }
    }

    pub fn apply_updated(&mut self, contact: Contact) {
        info!(id=%contact.id, "contact updated");
        if let Some(existing) = self.contacts.iter_mut().find(|c| c.id == contact.id) {
            *existing = contact;
        }
        self.refilter();
    }

    /// First step of the delete gate. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: ContactId) -> bool {
        if self.contact(&id).is_none() {
            warn!(id=%id, "delete requested for unknown contact");
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of the delete gate: only the id awaiting confirmation passes.
    pub fn confirm_delete(&mut self, id: &ContactId) -> bool {
        if self.pending_delete.as_ref() == Some(id) {
            self.pending_delete = None;
            true
        } else {
            warn!(id=%id, "delete confirmed without a matching request");
            false
        }
    }

    pub fn apply_deleted(&mut self, id: &ContactId, result: Result<(), &ApiError>) {
        match result {
            Ok(()) => {
                info!(id=%id, "contact deleted");
                let name = self.contact(id).map(|c| c.name.clone());
                self.contacts.retain(|c| &c.id != id);
                self.refilter();
                self.notice = Some(Notice::new(
                    NoticeLevel::Info,
                    format!("Deleted {}", name.unwrap_or_else(|| id.to_string())),
                ));
            }
            Err(e) => {
                error!(id=%id, kind=?e.kind(), status=?e.status(), err=%e, "failed to delete contact");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to delete contact: {e}"),
                ));
            }
        }
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
