use std::cell::RefCell;

use crate::command_executors::execute_command;
use crate::config::WidgetConfig;
use crate::host::HostBridge;
use crate::messages::Message;
use crate::models::RenderEvent;
use crate::ports::{MessageSource, PopupLauncher, Scheduler, Surface, View};
use crate::storage::SessionStore;
use crate::update::update;

/// Everything the state machine remembers between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    /// Origin of the widget page; OAuth messages must come from here.
    pub origin: String,
    /// Arguments of the most recent render event.
    pub args: Option<crate::models::RenderArgs>,
    /// What is currently painted, `None` before the first render.
    pub view: Option<View>,
    /// Whether the OAuth message listener is registered.
    pub listening: bool,
    /// Whether a logout timer is pending.
    pub logout_pending: bool,
}

impl WidgetState {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            args: None,
            view: None,
            listening: false,
            logout_pending: false,
        }
    }
}

/// The side-effect capabilities the runtime executes commands against.
pub struct Ports {
    pub host: Box<dyn HostBridge>,
    pub store: Box<dyn SessionStore>,
    pub listener: Box<dyn MessageSource>,
    pub scheduler: Box<dyn Scheduler>,
    pub popup: Box<dyn PopupLauncher>,
    pub surface: Box<dyn Surface>,
}

/// State machine plus the ports its commands run against.
pub struct Runtime {
    state: WidgetState,
    config: WidgetConfig,
    ports: Ports,
}

impl Runtime {
    pub fn new(origin: &str, config: WidgetConfig, ports: Ports) -> Self {
        Self {
            state: WidgetState::new(origin),
            config,
            ports,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Tell the host we are ready for render events.
    pub fn announce(&self) {
        self.ports.host.set_component_ready();
        self.ports.host.set_frame_height(self.config.frame_height);
    }

    /// Handle a host render event, reading the session from the store.
    pub fn render(&mut self, event: RenderEvent) {
        let session = self.ports.store.load();
        self.dispatch(Message::Render { event, session });
    }

    pub fn dispatch(&mut self, msg: Message) {
        let commands = update(&mut self.state, &self.config, msg);
        for cmd in commands {
            execute_command(cmd, &self.ports, &self.config);
        }
    }
}

// ---------------------------------------------------------------------------
// Global runtime for browser callbacks
// ---------------------------------------------------------------------------

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

pub fn install_runtime(runtime: Runtime) {
    RUNTIME.with(|cell| {
        *cell.borrow_mut() = Some(runtime);
    });
}

/// Run `f` against the installed runtime.  Returns `None` when no runtime is
/// installed or it is already borrowed further up the stack.
pub fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
    RUNTIME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            crate::warn_log!("runtime busy; dropping event");
            None
        }
    })
}

/// Entry point for click handlers, message listeners and timers.
pub fn dispatch_global_message(msg: Message) {
    if with_runtime(|rt| rt.dispatch(msg)).is_none() {
        crate::debug_log!("no runtime installed; message dropped");
    }
}

pub fn dispatch_global_render(event: RenderEvent) {
    if with_runtime(|rt| rt.render(event)).is_none() {
        crate::debug_log!("no runtime installed; render dropped");
    }
}
