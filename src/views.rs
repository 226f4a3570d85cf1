// src/views.rs
//
// DOM rendering of the widget: one button, wired to the matching message.
//
use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MouseEvent};

use crate::messages::Message;
use crate::ports::{Surface, View};
use crate::state::dispatch_global_message;

type ClickClosure = Closure<dyn FnMut(MouseEvent)>;

pub const BUTTON_TESTID: &str = "google-oauth-button";

/// Paints into `document.body`, replacing its previous content.
pub struct DomSurface {
    document: Document,
    // Click handler of the button currently on screen.
    on_click: RefCell<Option<ClickClosure>>,
    // Handler of the previous button; may still be on the call stack when a
    // click triggers a repaint, so it is only dropped one paint later.
    retired: RefCell<Option<ClickClosure>>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            on_click: RefCell::new(None),
            retired: RefCell::new(None),
        }
    }

    fn render(&self, view: View) -> Result<(), JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("<body> element missing"))?;
        body.set_inner_html("");

        let span = self.document.create_element("span")?;
        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("data-testid", BUTTON_TESTID)?;
        button.set_text_content(Some(view.label()));

        let click = Closure::wrap(Box::new(move |_: MouseEvent| {
            let msg = match view {
                View::LoggedIn => Message::LogoutClicked,
                View::LoggedOut => match current_href() {
                    Some(redirect_uri) => Message::LoginClicked { redirect_uri },
                    None => return,
                },
            };
            dispatch_global_message(msg);
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        span.append_child(&button)?;
        body.append_child(&span)?;

        let previous = self.on_click.replace(Some(click));
        *self.retired.borrow_mut() = previous;
        Ok(())
    }
}

impl Surface for DomSurface {
    fn paint(&self, view: View) {
        if let Err(e) = self.render(view) {
            crate::warn_log!("Failed to render widget: {:?}", e);
        }
    }
}

// The popup is redirected back to the page the widget was loaded from.
fn current_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}
