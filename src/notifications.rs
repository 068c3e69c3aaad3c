//! Completion sound support
//! Rings the terminal bell everywhere; on macOS also posts a notification with a sound

use std::io::Write;
#[cfg(target_os = "macos")]
use std::process::Command;

/// Fire-and-forget "time's up" signal
pub trait Notifier {
    fn play(&self, message: &str);
}

/// Notifier used by the running terminal app
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn play(&self, message: &str) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!("Terminal bell failed: {}", e);
        }

        notify_time_up(message);
    }
}

/// Send a system notification when a countdown expires
fn notify_time_up(message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Pomotick - Time's Up" sound name "Glass""#,
            message.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!("osascript notification failed: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

/// Counts plays instead of making noise
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub plays: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn play(&self, message: &str) {
        self.plays.borrow_mut().push(message.to_string());
    }
}
