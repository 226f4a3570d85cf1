use crate::config::WidgetConfig;
use crate::messages::Command;
use crate::state::Ports;

pub fn execute_command(cmd: Command, ports: &Ports, config: &WidgetConfig) {
    debug_log!("Executing {} command", cmd.name());

    match cmd {
        Command::DisarmListener => ports.listener.disarm(),
        Command::ArmListener => ports.listener.arm(),
        Command::Paint(view) => ports.surface.paint(view),
        Command::SetFrameHeight(height) => ports.host.set_frame_height(height),
        Command::OpenPopup { url } => {
            // A blocked popup gives no feedback beyond the console.
            if !ports.popup.open(&url, &config.popup.name, &config.popup.features()) {
                crate::warn_log!("Login popup was blocked by the browser");
            }
        }
        Command::ScheduleLogout(delay) => {
            debug_log!("Logout scheduled in {}s", delay.as_secs());
            ports.scheduler.schedule_logout(delay);
        }
        Command::CancelLogout => ports.scheduler.cancel(),
        Command::ClearSession => ports.store.clear(),
        Command::ReportValue(value) => ports.host.set_component_value(value.as_deref()),
    }
}
