//! The widget's state machine.
//!
//! `update` is pure: it mutates [`WidgetState`] and returns the side effects
//! as [`Command`]s, which the runtime executes in order.

use crate::config::WidgetConfig;
use crate::messages::{Command, Message};
use crate::models::{OAuthResponse, RenderEvent};
use crate::oauth::{authorization_url, logout_delay};
use crate::ports::View;
use crate::state::WidgetState;

pub fn update(state: &mut WidgetState, config: &WidgetConfig, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    match msg {
        Message::Render { event, session } => on_render(state, config, &mut commands, event, session),

        Message::LoginClicked { redirect_uri } => {
            if state.view != Some(View::LoggedOut) {
                crate::debug_log!("login click ignored: not logged out");
                return commands;
            }
            let Some(args) = state.args.as_ref() else {
                crate::debug_log!("login click ignored: no render args yet");
                return commands;
            };
            let url = match authorization_url(config, args, &redirect_uri) {
                Ok(url) => url,
                Err(e) => {
                    crate::warn_log!("Cannot build authorization URL: {}", e);
                    return commands;
                }
            };

            // Listener goes up before the popup exists.
            state.listening = true;
            commands.push(Command::ArmListener);
            commands.push(Command::OpenPopup { url });
        }

        Message::OAuthMessage { origin, payload } => {
            if !state.listening || origin != state.origin {
                return commands;
            }
            let Some(response) = OAuthResponse::from_payload(&payload) else {
                return commands;
            };
            if !response.has_state(&config.state_marker) {
                return commands;
            }
            let Some(token) = response.access_token() else {
                crate::debug_log!("oauth message without access_token ignored");
                return commands;
            };

            match logout_delay(&response, config.expiry_margin) {
                Some(delay) => {
                    state.logout_pending = true;
                    commands.push(Command::ScheduleLogout(delay));
                }
                None => crate::warn_log!("expires_in missing or not an integer; no logout scheduled"),
            }
            commands.push(Command::ReportValue(Some(token.to_string())));
        }

        Message::LogoutClicked => {
            if state.logout_pending {
                commands.push(Command::CancelLogout);
            }
            log_out(state, &mut commands);
        }

        Message::SessionExpired => {
            crate::debug_log!("session expired");
            log_out(state, &mut commands);
        }
    }

    commands
}

fn on_render(
    state: &mut WidgetState,
    config: &WidgetConfig,
    commands: &mut Vec<Command>,
    event: RenderEvent,
    session: Option<OAuthResponse>,
) {
    // Always tear the listener down first so renders never stack listeners.
    state.listening = false;
    commands.push(Command::DisarmListener);

    let view = match session {
        Some(record) if !record.is_empty() => View::LoggedIn,
        _ => View::LoggedOut,
    };
    state.args = Some(event.args);
    state.view = Some(view);

    commands.push(Command::Paint(view));
    commands.push(Command::SetFrameHeight(config.frame_height));
}

fn log_out(state: &mut WidgetState, commands: &mut Vec<Command>) {
    state.logout_pending = false;
    state.view = Some(View::LoggedOut);
    commands.push(Command::ClearSession);
    commands.push(Command::ReportValue(None));
    commands.push(Command::Paint(View::LoggedOut));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderArgs;
    use serde_json::json;
    use std::time::Duration;

    const ORIGIN: &str = "http://localhost:8501";

    fn render(session: Option<OAuthResponse>) -> Message {
        Message::Render {
            event: RenderEvent {
                args: RenderArgs {
                    client_id: "cid".into(),
                    scopes: vec!["email".into(), "profile".into()],
                },
            },
            session,
        }
    }

    fn token_message(state: &str, expires_in: &str) -> Message {
        Message::OAuthMessage {
            origin: ORIGIN.into(),
            payload: json!({ "access_token": "ABC", "expires_in": expires_in, "state": state }),
        }
    }

    fn logged_out_and_clicked() -> (WidgetState, WidgetConfig) {
        let mut state = WidgetState::new(ORIGIN);
        let cfg = WidgetConfig::default();
        update(&mut state, &cfg, render(None));
        update(
            &mut state,
            &cfg,
            Message::LoginClicked { redirect_uri: format!("{}/", ORIGIN) },
        );
        (state, cfg)
    }

    #[test]
    fn render_without_session_paints_login() {
        let mut state = WidgetState::new(ORIGIN);
        let cmds = update(&mut state, &WidgetConfig::default(), render(None));
        assert_eq!(
            cmds,
            vec![
                Command::DisarmListener,
                Command::Paint(View::LoggedOut),
                Command::SetFrameHeight(200),
            ]
        );
    }

    #[test]
    fn render_with_session_paints_logout() {
        let mut state = WidgetState::new(ORIGIN);
        let rec: OAuthResponse = [("access_token", "x")].into_iter().collect();
        let cmds = update(&mut state, &WidgetConfig::default(), render(Some(rec)));
        assert!(cmds.contains(&Command::Paint(View::LoggedIn)));
        assert_eq!(state.view, Some(View::LoggedIn));
    }

    #[test]
    fn empty_stored_record_counts_as_logged_out() {
        let mut state = WidgetState::new(ORIGIN);
        let cmds = update(&mut state, &WidgetConfig::default(), render(Some(OAuthResponse::new())));
        assert!(cmds.contains(&Command::Paint(View::LoggedOut)));
    }

    #[test]
    fn login_click_arms_listener_before_popup() {
        let mut state = WidgetState::new(ORIGIN);
        let cfg = WidgetConfig::default();
        update(&mut state, &cfg, render(None));
        let cmds = update(&mut state, &cfg, Message::LoginClicked { redirect_uri: "http://localhost:8501/".into() });
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0], Command::ArmListener);
        assert!(matches!(&cmds[1], Command::OpenPopup { url } if url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?")));
        assert!(state.listening);
    }

    #[test]
    fn login_click_before_render_does_nothing() {
        let mut state = WidgetState::new(ORIGIN);
        let cmds = update(&mut state, &WidgetConfig::default(), Message::LoginClicked { redirect_uri: "http://h/".into() });
        assert!(cmds.is_empty());
    }

    #[test]
    fn accepted_message_schedules_logout_then_reports() {
        let (mut state, cfg) = logged_out_and_clicked();
        let cmds = update(&mut state, &cfg, token_message("streamlit-google-oauth", "3600"));
        assert_eq!(
            cmds,
            vec![
                Command::ScheduleLogout(Duration::from_secs(3480)),
                Command::ReportValue(Some("ABC".into())),
            ]
        );
        assert!(state.logout_pending);
    }

    #[test]
    fn wrong_state_is_ignored() {
        let (mut state, cfg) = logged_out_and_clicked();
        assert!(update(&mut state, &cfg, token_message("someone-else", "3600")).is_empty());
    }

    #[test]
    fn foreign_origin_is_ignored() {
        let (mut state, cfg) = logged_out_and_clicked();
        let cmds = update(
            &mut state,
            &cfg,
            Message::OAuthMessage {
                origin: "https://evil.example".into(),
                payload: json!({ "access_token": "ABC", "expires_in": "3600", "state": "streamlit-google-oauth" }),
            },
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn non_flat_payload_is_ignored() {
        let (mut state, cfg) = logged_out_and_clicked();
        let cmds = update(
            &mut state,
            &cfg,
            Message::OAuthMessage {
                origin: ORIGIN.into(),
                payload: json!({ "state": "streamlit-google-oauth", "access_token": { "nested": true } }),
            },
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn message_without_armed_listener_is_ignored() {
        let mut state = WidgetState::new(ORIGIN);
        let cfg = WidgetConfig::default();
        update(&mut state, &cfg, render(None));
        assert!(update(&mut state, &cfg, token_message("streamlit-google-oauth", "3600")).is_empty());
    }

    #[test]
    fn unparsable_expiry_still_reports_token() {
        let (mut state, cfg) = logged_out_and_clicked();
        let cmds = update(&mut state, &cfg, token_message("streamlit-google-oauth", "soon"));
        assert_eq!(cmds, vec![Command::ReportValue(Some("ABC".into()))]);
        assert!(!state.logout_pending);
    }

    #[test]
    fn logout_cancels_pending_timer() {
        let (mut state, cfg) = logged_out_and_clicked();
        update(&mut state, &cfg, token_message("streamlit-google-oauth", "3600"));
        let cmds = update(&mut state, &cfg, Message::LogoutClicked);
        assert_eq!(
            cmds,
            vec![
                Command::CancelLogout,
                Command::ClearSession,
                Command::ReportValue(None),
                Command::Paint(View::LoggedOut),
            ]
        );
    }

    #[test]
    fn expiry_logs_out_without_cancel() {
        let (mut state, cfg) = logged_out_and_clicked();
        update(&mut state, &cfg, token_message("streamlit-google-oauth", "3600"));
        let cmds = update(&mut state, &cfg, Message::SessionExpired);
        assert_eq!(cmds[0], Command::ClearSession);
        assert!(cmds.contains(&Command::ReportValue(None)));
        assert!(!state.logout_pending);
    }

    #[test]
    fn rerender_disarms_listener() {
        let (mut state, cfg) = logged_out_and_clicked();
        let cmds = update(&mut state, &cfg, render(None));
        assert_eq!(cmds[0], Command::DisarmListener);
        assert!(!state.listening);
    }
}
