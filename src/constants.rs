// Fixed values of the login flow - the single source of truth for defaults
pub const STORAGE_KEY: &str = "oauth2-params";
pub const STATE_MARKER: &str = "streamlit-google-oauth";
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

// Logout fires this long before the provider-reported expiry
pub const EXPIRY_MARGIN_SECS: u64 = 120;

// Popup window
pub const POPUP_NAME: &str = "streamlit-google-oauth";
pub const POPUP_WIDTH: u32 = 450;
pub const POPUP_HEIGHT: u32 = 600;

// Iframe height reported to the host after every render
pub const DEFAULT_FRAME_HEIGHT: u32 = 200;

pub const LOGIN_LABEL: &str = "Login with Google!";
pub const LOGOUT_LABEL: &str = "Log out";
