//! Persistence of the OAuth response record.
//!
//! The browser's `localStorage` is the only store; it is shared between the
//! widget window and the popup because both live on the same origin.  The
//! popup writes once before closing, the widget only reads and clears, so a
//! single key with a JSON value is all that is needed.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{from_str, to_string};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::models::OAuthResponse;

/// Get/set/clear access to the persisted session.
pub trait SessionStore {
    fn load(&self) -> Option<OAuthResponse>;
    fn save(&self, record: &OAuthResponse);
    fn clear(&self);
}

/// `window.localStorage` under a single key.
pub struct LocalStorageStore {
    storage: Storage,
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("local storage unavailable"))?;
        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<OAuthResponse> {
        let raw = self.storage.get_item(&self.key).ok().flatten()?;
        match from_str::<OAuthResponse>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                crate::warn_log!("Ignoring unreadable {} entry: {}", self.key, e);
                None
            }
        }
    }

    fn save(&self, record: &OAuthResponse) {
        let json = match to_string(record) {
            Ok(json) => json,
            Err(e) => {
                crate::warn_log!("Failed to serialise session: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.key, &json) {
            crate::warn_log!("Failed to persist session: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            crate::warn_log!("Failed to clear session: {:?}", e);
        }
    }
}

/// In-memory store; clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON currently held, as `localStorage` would hold it.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<OAuthResponse> {
        from_str(self.slot.borrow().as_deref()?).ok()
    }

    fn save(&self, record: &OAuthResponse) {
        *self.slot.borrow_mut() = to_string(record).ok();
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
