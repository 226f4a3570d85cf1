use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat key/value record decoded from the provider's redirect fragment.
///
/// Serialises as a plain JSON object so the value kept in local storage and
/// the payload posted to the opener window have the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OAuthResponse(BTreeMap<String, String>);

impl OAuthResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get("access_token")
    }

    pub fn state(&self) -> Option<&str> {
        self.get("state")
    }

    /// Lifetime in whole seconds, `None` when missing or not an integer.
    pub fn expires_in(&self) -> Option<u64> {
        self.get("expires_in")?.trim().parse().ok()
    }

    /// Decode a cross-window payload; anything but a flat string map is
    /// rejected.
    pub fn from_payload(payload: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }

    /// Non-empty and carrying this flow's `state` marker.
    pub fn has_state(&self, marker: &str) -> bool {
        !self.is_empty() && self.state() == Some(marker)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OAuthResponse {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Arguments the host passes along with every render event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderArgs {
    pub client_id: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Decoded host render event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderEvent {
    pub args: RenderArgs,
}
