use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::error::ApiError;
use super::types::{Contact, ContactDraft, ContactId, Health};
use super::ContactsApi;
use crate::config::HttpConfig;

/// HTTP+JSON client for the contacts service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    base: Url,
    pub(crate) inner: reqwest::Client,
}

impl ContactsClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref().trim();
        let base = Url::parse(raw).with_context(|| format!("invalid API base URL: {raw}"))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            bail!("API base URL must be an http(s) URL: {raw}");
        }
        let inner = build_http_client(&HttpConfig::default())?;
        Ok(Self { base, inner })
    }

    /// Rebuild the underlying client with the given timeouts.
    pub fn with_http_config(mut self, cfg: &HttpConfig) -> Result<Self> {
        self.inner = build_http_client(cfg)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<&ContactDraft>) -> Result<String, ApiError> {
        debug!(method=%method, url=%url, "api request");
        let mut req = self.inner.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.map_err(|e| {
            error!(method=%method, url=%url, err=%e, "api request failed to send");
            ApiError::Network(e)
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            error!(method=%method, url=%url, err=%e, "api response body read failed");
            ApiError::Network(e)
        })?;

        if !status.is_success() {
            let err = ApiError::from_response_body(status, &text);
            error!(method=%method, url=%url, status=%status.as_u16(), err=%err, "api non-success status");
            return Err(err);
        }
        debug!(method=%method, url=%url, status=%status.as_u16(), "api response");
        Ok(text)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&ContactDraft>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, url, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            error!(err=%e, "api response decode failed");
            ApiError::Decode(e)
        })
    }
}

fn build_http_client(cfg: &HttpConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(ms) = cfg.connect_timeout_ms {
        builder = builder.connect_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = cfg.request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    builder.build().context("build http client")
}

#[async_trait]
impl ContactsApi for ContactsClient {
    async fn list_contacts(&self, search: Option<&str>) -> Result<Vec<Contact>, ApiError> {
        let mut url = self.endpoint(&["contacts"]);
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("search", term);
        }
        self.request_json(Method::GET, url, None).await
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["contacts", &id]);
        self.request_json(Method::GET, url, None).await
    }

    async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ApiError> {
        let url = self.endpoint(&["contacts"]);
        self.request_json(Method::POST, url, Some(draft)).await
    }

    async fn update_contact(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["contacts", &id]);
        self.request_json(Method::PUT, url, Some(draft)).await
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["contacts", &id]);
        // Whatever the server puts in the body is ignored.
        self.send(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn search_contacts(&self, term: &str) -> Result<Vec<Contact>, ApiError> {
        let url = self.endpoint(&["contacts", "search", term]);
        self.request_json(Method::GET, url, None).await
    }

    async fn health_check(&self) -> Result<Health, ApiError> {
        let url = self.endpoint(&["health"]);
        self.request_json(Method::GET, url, None).await
    }
}
