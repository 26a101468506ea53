use crate::error::{DigestError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Default notification program.
pub const DEFAULT_NOTIFY_BIN: &str = "openclaw";

/// Delivery mode passed with every payload: send immediately.
pub const DELIVERY_MODE: &str = "now";

pub trait NotifySink {
    fn send(&self, text: &str, mode: &str) -> Result<()>;
}

/// Forwards payloads to an external command line tool as a system event.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: PathBuf,
}

impl CommandSink {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl NotifySink for CommandSink {
    fn send(&self, text: &str, mode: &str) -> Result<()> {
        let output = Command::new(&self.program)
            .args(["system", "event", "--text", text, "--mode", mode])
            .stdin(Stdio::null())
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(DigestError::Notify(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )))
        }
    }
}

/// Best-effort delivery; failures are logged and dropped.
pub fn deliver(sink: &dyn NotifySink, payload: &str) {
    match sink.send(payload, DELIVERY_MODE) {
        Ok(()) => tracing::debug!("notification delivered"),
        Err(err) => tracing::debug!("notification failed: {err}"),
    }
}
