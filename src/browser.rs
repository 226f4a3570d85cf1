//! web-sys implementations of the ports in [`crate::ports`].

use std::cell::RefCell;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MessageEvent, Window};

use crate::host::decode_render_event;
use crate::messages::Message;
use crate::models::OAuthResponse;
use crate::ports::{MessageSource, Opener, PopupLauncher, Scheduler};
use crate::state::{dispatch_global_message, dispatch_global_render};

type MessageClosure = Closure<dyn FnMut(MessageEvent)>;

// ---------------------------------------------------------------------------
// OAuth message listener
// ---------------------------------------------------------------------------

/// Keeps at most one `message` listener registered on the window.
pub struct WindowMessageSource {
    window: Window,
    registered: RefCell<Option<MessageClosure>>,
}

impl WindowMessageSource {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            registered: RefCell::new(None),
        }
    }
}

impl MessageSource for WindowMessageSource {
    fn arm(&self) {
        self.disarm();

        let callback = Closure::wrap(Box::new(move |event: MessageEvent| {
            let payload = match serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) {
                Ok(v) => v,
                Err(_) => return,
            };
            dispatch_global_message(Message::OAuthMessage {
                origin: event.origin(),
                payload,
            });
        }) as Box<dyn FnMut(MessageEvent)>);

        match self
            .window
            .add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
        {
            Ok(()) => *self.registered.borrow_mut() = Some(callback),
            Err(e) => crate::warn_log!("Failed to register message listener: {:?}", e),
        }
    }

    fn disarm(&self) {
        if let Some(callback) = self.registered.borrow_mut().take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("message", callback.as_ref().unchecked_ref());
        }
    }

    fn is_armed(&self) -> bool {
        self.registered.borrow().is_some()
    }
}

// ---------------------------------------------------------------------------
// Logout timer
// ---------------------------------------------------------------------------

// setTimeout fires immediately for delays above 2^31-1 ms.
const MAX_TIMEOUT_MS: u128 = i32::MAX as u128;

/// One pending `setTimeout`; dropping the handle clears it.
#[derive(Default)]
pub struct TimeoutScheduler {
    pending: RefCell<Option<Timeout>>,
}

impl Scheduler for TimeoutScheduler {
    fn schedule_logout(&self, delay: Duration) {
        let millis = delay.as_millis().min(MAX_TIMEOUT_MS) as u32;
        let timeout = Timeout::new(millis, || {
            dispatch_global_message(Message::SessionExpired);
        });
        // Replacing the old handle cancels it.
        *self.pending.borrow_mut() = Some(timeout);
    }

    fn cancel(&self) {
        drop(self.pending.borrow_mut().take());
    }
}

// ---------------------------------------------------------------------------
// Popup
// ---------------------------------------------------------------------------

pub struct WindowPopup {
    window: Window,
}

impl WindowPopup {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl PopupLauncher for WindowPopup {
    fn open(&self, url: &str, name: &str, features: &str) -> bool {
        match self.window.open_with_url_and_target_and_features(url, name, features) {
            Ok(Some(popup)) => {
                let _ = popup.focus();
                true
            }
            Ok(None) => false,
            Err(e) => {
                crate::warn_log!("window.open failed: {:?}", e);
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Opener (popup side)
// ---------------------------------------------------------------------------

pub struct WindowOpener {
    window: Window,
}

impl WindowOpener {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn opener(&self) -> Option<Window> {
        let opener = self.window.opener().ok()?;
        if opener.is_null() || opener.is_undefined() {
            return None;
        }
        // Another browsing context's Window fails `instanceof` checks.
        Some(opener.unchecked_into::<Window>())
    }
}

impl Opener for WindowOpener {
    fn post(&self, record: &OAuthResponse) {
        let Some(opener) = self.opener() else {
            crate::warn_log!("No opener window to deliver the OAuth response to");
            return;
        };
        let payload = match record.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(v) => v,
            Err(e) => {
                crate::warn_log!("Failed to encode OAuth response: {}", e);
                return;
            }
        };
        // Both windows serve the widget page, so restrict delivery to our origin.
        let origin = self.window.location().origin().unwrap_or_else(|_| "/".to_string());
        if let Err(e) = opener.post_message(&payload, &origin) {
            crate::warn_log!("postMessage to opener failed: {:?}", e);
        }
    }

    fn close(&self) {
        let _ = self.window.close();
    }
}

// ---------------------------------------------------------------------------
// Host render events
// ---------------------------------------------------------------------------

/// Route `streamlit:render` messages from the host into the runtime.  The
/// listener lives for the page's lifetime.
pub fn listen_for_renders(window: &Window) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Some(render) = decode_render_event(event.data()) {
            dispatch_global_render(render);
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    window.add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}
