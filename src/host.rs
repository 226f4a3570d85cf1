//! Host bridge – the Streamlit component protocol.
//!
//! The widget lives in an iframe.  It talks to the hosting Streamlit page
//! with `postMessage` on `window.parent`; the page answers with
//! `streamlit:render` messages carrying the Python-side arguments.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::models::{RenderArgs, RenderEvent};

pub const RENDER_EVENT: &str = "streamlit:render";
const COMPONENT_READY: &str = "streamlit:componentReady";
const SET_FRAME_HEIGHT: &str = "streamlit:setFrameHeight";
const SET_COMPONENT_VALUE: &str = "streamlit:setComponentValue";
const API_VERSION: u32 = 1;

/// Callbacks into the embedding application.
pub trait HostBridge {
    fn set_component_ready(&self);
    fn set_frame_height(&self, height: u32);
    /// `Some(token)` after a login, `None` for logout / no session.
    fn set_component_value(&self, value: Option<&str>);
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

pub fn component_ready_message() -> Value {
    json!({
        "isStreamlitMessage": true,
        "type": COMPONENT_READY,
        "apiVersion": API_VERSION,
    })
}

pub fn frame_height_message(height: u32) -> Value {
    json!({
        "isStreamlitMessage": true,
        "type": SET_FRAME_HEIGHT,
        "height": height,
    })
}

pub fn component_value_message(value: Option<&str>) -> Value {
    json!({
        "isStreamlitMessage": true,
        "type": SET_COMPONENT_VALUE,
        "value": value,
        "dataType": "json",
    })
}

/// Only the fields we read; `dfs`, `disabled` and `theme` are ignored.
#[derive(Debug, Deserialize)]
struct HostMessage {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    args: Option<RenderArgs>,
}

impl HostMessage {
    fn into_render_event(self) -> Option<RenderEvent> {
        if self.kind != RENDER_EVENT {
            return None;
        }
        Some(RenderEvent { args: self.args? })
    }
}

/// Decode the `data` of a `message` event received from the host page.
pub fn decode_render_event(data: JsValue) -> Option<RenderEvent> {
    match serde_wasm_bindgen::from_value::<HostMessage>(data) {
        Ok(msg) => msg.into_render_event(),
        Err(e) => {
            crate::debug_log!("host: undecodable message: {}", e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Browser implementation
// ---------------------------------------------------------------------------

/// Posts protocol messages to the parent frame.
pub struct StreamlitBridge {
    parent: Window,
}

impl StreamlitBridge {
    pub fn new(window: &Window) -> Result<Self, JsValue> {
        let parent = window
            .parent()?
            .ok_or_else(|| JsValue::from_str("widget is not embedded in a host frame"))?;
        Ok(Self { parent })
    }

    fn send(&self, message: &Value) {
        let payload = match message.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(v) => v,
            Err(e) => {
                crate::warn_log!("host: failed to encode message: {}", e);
                return;
            }
        };
        // The host page origin is not known up front.
        if let Err(e) = self.parent.post_message(&payload, "*") {
            crate::warn_log!("host: postMessage failed: {:?}", e);
        }
    }
}

impl HostBridge for StreamlitBridge {
    fn set_component_ready(&self) {
        self.send(&component_ready_message());
    }

    fn set_frame_height(&self, height: u32) {
        self.send(&frame_height_message(height));
    }

    fn set_component_value(&self, value: Option<&str>) {
        self.send(&component_value_message(value));
    }
}
