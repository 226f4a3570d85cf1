//! Capabilities the widget needs from its surroundings.
//!
//! The state machine in [`crate::update`] never touches the browser
//! directly; the runtime executes its commands against these traits.  The
//! browser implementations live in [`crate::browser`] and
//! [`crate::views`], tests plug in recording mocks.

use std::time::Duration;

use crate::constants::{LOGIN_LABEL, LOGOUT_LABEL};
use crate::models::OAuthResponse;

/// Which single control the widget shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    LoggedIn,
    LoggedOut,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::LoggedIn => LOGOUT_LABEL,
            View::LoggedOut => LOGIN_LABEL,
        }
    }
}

/// Renders a [`View`], replacing whatever was shown before.
pub trait Surface {
    fn paint(&self, view: View);
}

/// Listener for the popup's cross-window message.
///
/// At most one registration exists at any time: `arm` replaces an existing
/// one and `disarm` is a no-op when nothing is registered.
pub trait MessageSource {
    fn arm(&self);
    fn disarm(&self);
    fn is_armed(&self) -> bool;
}

/// One-shot logout timer slot.  Scheduling replaces a pending timer.
pub trait Scheduler {
    fn schedule_logout(&self, delay: Duration);
    fn cancel(&self);
}

/// Opens the authorization popup.
pub trait PopupLauncher {
    /// Returns `false` when the browser refused to open the window.
    fn open(&self, url: &str, name: &str, features: &str) -> bool;
}

/// The window that opened the popup, seen from inside the popup.
pub trait Opener {
    fn post(&self, record: &OAuthResponse);
    fn close(&self);
}
