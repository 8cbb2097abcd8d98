//! Single owner of the contact-list screen state.
//!
//! Presentation layers read [`ContactsState`] and report user intent as
//! [`UiEvent`]s. Network work runs on spawned tasks; their results come back
//! as [`Outcome`]s over a channel and are applied on the caller's thread by
//! [`ContactsController::poll_outcomes`]. The plain CLI uses the awaiting
//! variants (`load`, `add_contact`, ...) instead.

mod error;
mod state;

use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Contact, ContactDraft, ContactId, ContactsApi, Health};
use crate::contacts::{DraftForm, validate_draft};

pub use error::ContactsError;
pub use state::{ContactsState, LoadState, NoticeLevel, SubmitRejected};

/// Events emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchTermChanged(String),
    AddContactRequested,
    AddContactSubmitted(ContactDraft),
    AddContactCancelled,
    DeleteContactRequested(ContactId),
    DeleteContactConfirmed(ContactId),
    DeleteContactCancelled,
    RetryLoadRequested,
}

/// Result of a background request, applied back onto the state.
#[derive(Debug)]
pub enum Outcome {
    Loaded {
        generation: u64,
        result: Result<Vec<Contact>, ApiError>,
    },
    Created(Result<Contact, ApiError>),
    Deleted {
        id: ContactId,
        result: Result<(), ApiError>,
    },
}

pub struct ContactsController {
    api: Arc<dyn ContactsApi>,
    state: ContactsState,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    cancel: CancellationToken,
}

impl ContactsController {
    pub fn new(api: Arc<dyn ContactsApi>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: ContactsState::new(),
            outcome_tx,
            outcome_rx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &ContactsState {
        &self.state
    }

    /// The open add-contact form, for keystroke editing.
    pub fn form_mut(&mut self) -> Option<&mut DraftForm> {
        self.state.form.as_mut()
    }

    pub fn clear_notice(&mut self) {
        self.state.clear_notice();
    }

    pub fn handle(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        match event {
            UiEvent::SearchTermChanged(term) => self.state.set_search_term(term),
            UiEvent::AddContactRequested => self.state.open_form(),
            UiEvent::AddContactSubmitted(draft) => self.submit_form(draft),
            UiEvent::AddContactCancelled => {
                self.state.cancel_form();
            }
            UiEvent::DeleteContactRequested(id) => {
                self.state.request_delete(id);
            }
            UiEvent::DeleteContactConfirmed(id) => {
                if self.state.confirm_delete(&id) {
                    self.spawn_delete(id);
                }
            }
            UiEvent::DeleteContactCancelled => self.state.cancel_delete(),
            UiEvent::RetryLoadRequested => {
                if matches!(self.state.load, LoadState::LoadFailed(_)) {
                    self.start_load();
                }
            }
        }
    }

    /// Kick off the initial (or retried) load in the background.
    pub fn start_load(&mut self) {
        let Some(generation) = self.state.begin_load() else {
            return;
        };
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            Outcome::Loaded {
                generation,
                result: api.list_contacts(None).await,
            }
        });
    }

    fn submit_form(&mut self, draft: ContactDraft) {
        let form = self.state.form.get_or_insert_with(DraftForm::new);
        if !form.submitting {
            form.draft = draft;
        }
        match self.state.begin_submit() {
            Ok(draft) => {
                let api = Arc::clone(&self.api);
                self.spawn(async move { Outcome::Created(api.create_contact(&draft).await) });
            }
            Err(SubmitRejected::Invalid(errors)) => {
                debug!(count = errors.len(), %errors, "add-contact form rejected locally");
            }
            Err(reason) => debug!(?reason, "submit ignored"),
        }
    }

    fn spawn_delete(&mut self, id: ContactId) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.delete_contact(&id).await;
            Outcome::Deleted { id, result }
        });
    }

    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let tx = self.outcome_tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("request abandoned on shutdown");
                }
                outcome = fut => {
                    // Receiver gone means the controller was dropped.
                    let _ = tx.send(outcome);
                }
            }
        });
    }

    pub fn apply(&mut self, outcome: Outcome) {
        if self.cancel.is_cancelled() {
            debug!("ignoring outcome after shutdown");
            return;
        }
        match outcome {
            Outcome::Loaded { generation, result } => match result {
                Ok(contacts) => self.state.apply_loaded(generation, Ok(contacts)),
                Err(e) => self.state.apply_loaded(generation, Err(&e)),
            },
            Outcome::Created(result) => match result {
                Ok(contact) => self.state.apply_created(Ok(contact)),
                Err(e) => self.state.apply_created(Err(&e)),
            },
            Outcome::Deleted { id, result } => {
                self.state.apply_deleted(&id, result.as_ref().map(|_| ()))
            }
        }
    }

    /// Apply every finished request without blocking. Returns true if any
    /// state changed.
    pub fn poll_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
            changed = true;
        }
        changed
    }

    /// Wait for the next background result and apply it.
    #[cfg(test)]
    pub async fn next_outcome(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Abandon in-flight requests; their results are never applied.
    pub fn shutdown(&mut self) {
        info!("controller shutdown");
        self.cancel.cancel();
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        let Some(generation) = self.state.begin_load() else {
            warn!("load requested while another load is in flight");
            return Ok(());
        };
        match self.api.list_contacts(None).await {
            Ok(contacts) => {
                self.state.apply_loaded(generation, Ok(contacts));
                Ok(())
            }
            Err(e) => {
                self.state.apply_loaded(generation, Err(&e));
                Err(e)
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
    }

    pub async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiError> {
        self.api.get_contact(id).await
    }

    /// Server-side search; does not touch the screen state.
    pub async fn search_remote(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
        self.api.search_contacts(term).await
    }

    pub async fn health_check(&self) -> Result<Health, ApiError> {
        self.api.health_check().await
    }

    /// Validate then create. Invalid drafts never reach the network.
    pub async fn add_contact(&mut self, draft: ContactDraft) -> Result<Contact, ContactsError> {
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            return Err(ContactsError::Validation(errors));
        }
        match self.api.create_contact(&draft).await {
            Ok(contact) => {
                self.state.apply_created(Ok(contact.clone()));
                Ok(contact)
            }
            Err(e) => {
                self.state.apply_created(Err(&e));
                Err(e.into())
            }
        }
    }

    pub async fn update_contact(
        &mut self,
        id: &ContactId,
        draft: ContactDraft,
    ) -> Result<Contact, ContactsError> {
        let errors = validate_draft(&draft);
        if !errors.is_empty() {
            return Err(ContactsError::Validation(errors));
        }
        let contact = self.api.update_contact(id, &draft).await?;
        self.state.apply_updated(contact.clone());
        Ok(contact)
    }

    pub async fn delete_contact(&mut self, id: &ContactId) -> Result<(), ApiError> {
        let result = self.api.delete_contact(id).await;
        self.state.apply_deleted(id, result.as_ref().map(|_| ()));
        result
    }
}

impl Drop for ContactsController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
