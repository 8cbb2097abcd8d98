use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Server-assigned identifier. The API hands out integers, but nothing on the
/// client side depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Int(i64),
    Text(String),
}

impl ContactId {
    /// Parse a user-typed id. Numeric input becomes `Int` so it compares equal
    /// to ids decoded from JSON numbers.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(n) => ContactId::Int(n),
            Err(_) => ContactId::Text(raw.to_string()),
        })
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Int(n) => write!(f, "{n}"),
            ContactId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ContactId {
    fn from(n: i64) -> Self {
        ContactId::Int(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Contact {
    /// Stored avatar, or the generated one keyed by name.
    pub fn avatar_url(&self) -> String {
        match self.avatar.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => generated_avatar_url(&self.name),
        }
    }
}

pub fn generated_avatar_url(name: &str) -> String {
    let params = [
        ("name", name),
        ("background", "random"),
        ("color", "fff"),
        ("size", "150"),
    ];
    match Url::parse_with_params(AVATAR_SERVICE, &params) {
        Ok(url) => url.to_string(),
        Err(_) => AVATAR_SERVICE.to_string(),
    }
}

/// Unsaved contact fields; the body of POST and PUT requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Error payload shape produced by the contacts service.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}
