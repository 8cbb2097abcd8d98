mod client;
mod error;
pub mod types;

use async_trait::async_trait;

pub use client::ContactsClient;
pub use error::{ApiError, ApiErrorKind};
pub use types::*;

/// Remote contacts service. Every call is a single request/response with no
/// retries and no caching.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn list_contacts(&self, search: Option<&str>) -> Result<Vec<Contact>, ApiError>;
    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiError>;
    async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ApiError>;
    async fn update_contact(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact, ApiError>;
    async fn delete_contact(&self, id: &ContactId) -> Result<(), ApiError>;
    async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, ApiError>;
    async fn health_check(&self) -> Result<Health, ApiError>;
}
