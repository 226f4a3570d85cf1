use std::time::Duration;

use serde_json::Value;

use crate::models::{OAuthResponse, RenderEvent};
use crate::ports::View;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Host delivered a render event; `session` is what local storage held
    /// at that moment.
    Render {
        event: RenderEvent,
        session: Option<OAuthResponse>,
    },

    /// "Login with Google!" was clicked on a page at `redirect_uri`.
    LoginClicked { redirect_uri: String },

    /// "Log out" was clicked.
    LogoutClicked,

    /// A cross-window `message` event reached the armed listener.
    OAuthMessage { origin: String, payload: Value },

    /// The logout timer fired.
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Remove the OAuth message listener, if any
    DisarmListener,

    /// Register the OAuth message listener
    ArmListener,

    /// Replace the widget's content
    Paint(View),

    /// Report the iframe height to the host
    SetFrameHeight(u32),

    /// Open the authorization popup
    OpenPopup { url: String },

    /// Arm the one-shot logout timer
    ScheduleLogout(Duration),

    /// Drop a pending logout timer
    CancelLogout,

    /// Delete the persisted session
    ClearSession,

    /// Hand the token (or `None` on logout) to the host
    ReportValue(Option<String>),
}

impl Command {
    /// Short tag used in debug logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::DisarmListener => "DisarmListener",
            Command::ArmListener => "ArmListener",
            Command::Paint(_) => "Paint",
            Command::SetFrameHeight(_) => "SetFrameHeight",
            Command::OpenPopup { .. } => "OpenPopup",
            Command::ScheduleLogout(_) => "ScheduleLogout",
            Command::CancelLogout => "CancelLogout",
            Command::ClearSession => "ClearSession",
            Command::ReportValue(_) => "ReportValue",
        }
    }
}
