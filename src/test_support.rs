use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::api::{ApiError, Contact, ContactDraft, ContactId, ContactsApi, Health};
use crate::controller::ContactsController;

/// In-memory contacts service. Answers from a fixed list unless a scripted
/// reply is queued, and records every call.
#[derive(Default)]
pub struct StubApi {
    contacts: Vec<Contact>,
    lists: Mutex<VecDeque<Result<Vec<Contact>, ApiError>>>,
    creates: Mutex<VecDeque<Result<Contact, ApiError>>>,
    deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    calls: Mutex<Vec<String>>,
    /// When set, list calls wait for a notification before answering.
    gate: Option<Arc<Notify>>,
}

pub fn contact(id: i64, name: &str, email: &str) -> Contact {
    Contact {
        id: ContactId::Int(id),
        name: name.into(),
        email: email.into(),
        phone: "555-0100".into(),
        avatar: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_contacts() -> Vec<Contact> {
    vec![
        contact(1, "Ann Lee", "ann@x.io"),
        contact(2, "Bob Roy", "bob@y.io"),
        contact(3, "Cy Tan", "cy@z.io"),
    ]
}

pub fn server_error(status: StatusCode, msg: &str) -> ApiError {
    ApiError::Server {
        status,
        message: msg.into(),
    }
}

impl StubApi {
    pub fn new(contacts: Vec<Contact>) -> Arc<Self> {
        Arc::new(Self {
            contacts,
            ..Default::default()
        })
    }

    pub fn gated(contacts: Vec<Contact>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            contacts,
            gate: Some(gate),
            ..Default::default()
        })
    }

    pub fn push_list(&self, r: Result<Vec<Contact>, ApiError>) {
        self.lists.lock().unwrap().push_back(r);
    }

    pub fn push_create(&self, r: Result<Contact, ApiError>) {
        self.creates.lock().unwrap().push_back(r);
    }

    pub fn push_delete(&self, r: Result<(), ApiError>) {
        self.deletes.lock().unwrap().push_back(r);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

pub fn controller_for(api: &Arc<StubApi>) -> ContactsController {
    ContactsController::new(Arc::clone(api) as Arc<dyn ContactsApi>)
}

#[async_trait]
impl ContactsApi for StubApi {
    async fn list_contacts(&self, _search: Option<&str>) -> Result<Vec<Contact>, ApiError> {
        self.record("list");
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let scripted = self.lists.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.contacts.clone()))
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiError> {
        self.record(format!("get {id}"));
        self.contacts
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| server_error(StatusCode::NOT_FOUND, "Contact not found"))
    }

    async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ApiError> {
        self.record(format!("create {}", draft.name));
        let scripted = self.creates.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| {
            let mut c = contact(99, &draft.name, &draft.email);
            c.phone = draft.phone.clone();
            Ok(c)
        })
    }

    async fn update_contact(
        &self,
        id: &ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact, ApiError> {
        self.record(format!("update {id}"));
        let mut c = contact(0, &draft.name, &draft.email);
        c.id = id.clone();
        c.phone = draft.phone.clone();
        Ok(c)
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<(), ApiError> {
        self.record(format!("delete {id}"));
        let scripted = self.deletes.lock().unwrap().pop_front();
        scripted.unwrap_or(Ok(()))
    }

    async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
        self.record(format!("search {term}"));
        let term = term.to_lowercase();
        Ok(self
            .contacts
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<Health, ApiError> {
        self.record("health");
        Ok(Health {
            status: "healthy".into(),
            timestamp: None,
        })
    }
}
