use std::time::Duration;

use crate::constants::{
    DEFAULT_FRAME_HEIGHT, EXPIRY_MARGIN_SECS, GOOGLE_AUTH_ENDPOINT, POPUP_HEIGHT, POPUP_NAME,
    POPUP_WIDTH, STATE_MARKER, STORAGE_KEY,
};

/// Name and geometry of the login popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PopupSpec {
    fn default() -> Self {
        Self {
            name: POPUP_NAME.to_string(),
            width: POPUP_WIDTH,
            height: POPUP_HEIGHT,
        }
    }
}

impl PopupSpec {
    /// Feature string handed to `window.open`.
    pub fn features(&self) -> String {
        format!("height={},width={}", self.height, self.width)
    }
}

/// Widget configuration
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub auth_endpoint: String,
    pub state_marker: String,
    pub storage_key: String,
    pub expiry_margin: Duration,
    pub frame_height: u32,
    pub popup: PopupSpec,
}

impl Default for WidgetConfig {
    /// Talks to Google's production endpoint with the fixed flow marker.
    /// Everything the browser entry point needs works off this value; the
    /// env override in [`WidgetConfig::new`] only exists for pointing the
    /// popup at a local mock provider.
    fn default() -> Self {
        Self {
            auth_endpoint: GOOGLE_AUTH_ENDPOINT.to_string(),
            state_marker: STATE_MARKER.to_string(),
            storage_key: STORAGE_KEY.to_string(),
            expiry_margin: Duration::from_secs(EXPIRY_MARGIN_SECS),
            frame_height: DEFAULT_FRAME_HEIGHT,
            popup: PopupSpec::default(),
        }
    }
}

impl WidgetConfig {
    /// Create a config whose endpoint comes from the `GOOGLE_OAUTH_ENDPOINT`
    /// environment variable captured at build time.
    pub fn new() -> Result<Self, &'static str> {
        match option_env!("GOOGLE_OAUTH_ENDPOINT") {
            Some(url) => Ok(Self::from_endpoint(url)),
            None => Err("GOOGLE_OAUTH_ENDPOINT environment variable is not set"),
        }
    }

    /// Default config pointed at a different authorization endpoint.
    pub fn from_endpoint(url: &str) -> Self {
        Self {
            auth_endpoint: url.trim().to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_google_flow() {
        let cfg = WidgetConfig::default();
        assert_eq!(cfg.auth_endpoint, "https://accounts.google.com/o/oauth2/v2/auth");
        assert_eq!(cfg.state_marker, "streamlit-google-oauth");
        assert_eq!(cfg.storage_key, "oauth2-params");
        assert_eq!(cfg.expiry_margin, Duration::from_secs(120));
    }

    #[test]
    fn popup_features_are_height_then_width() {
        assert_eq!(PopupSpec::default().features(), "height=600,width=450");
    }

    #[test]
    fn from_endpoint_keeps_other_defaults() {
        let cfg = WidgetConfig::from_endpoint(" http://localhost:9000/auth ");
        assert_eq!(cfg.auth_endpoint, "http://localhost:9000/auth");
        assert_eq!(cfg.frame_height, 200);
        assert_eq!(cfg.popup, PopupSpec::default());
    }
}
