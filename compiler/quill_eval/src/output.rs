//! Output destinations for rendered text.
//!
//! Enum dispatch over the handful of sinks a host needs: stdout for
//! command-line use, a buffer for tests and embedding, and a silent sink
//! for evaluating purely for side effects.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Where rendered text goes.
pub enum OutputHandler {
    Stdout,
    Buffer(Mutex<String>),
    Silent,
}

/// Shared handle; the host keeps a clone to read the buffer back.
pub type SharedOutput = Arc<OutputHandler>;

impl OutputHandler {
    pub fn write(&self, text: &str) {
        match self {
            OutputHandler::Stdout => {
                let mut stdout = std::io::stdout().lock();
                if let Err(err) = stdout.write_all(text.as_bytes()) {
                    tracing::warn!(%err, "failed to write template output");
                }
            }
            OutputHandler::Buffer(buffer) => buffer.lock().push_str(text),
            OutputHandler::Silent => {}
        }
    }

    /// Captured text. Empty for stdout and silent handlers.
    pub fn output(&self) -> String {
        match self {
            OutputHandler::Buffer(buffer) => buffer.lock().clone(),
            OutputHandler::Stdout | OutputHandler::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let OutputHandler::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

pub fn stdout_handler() -> SharedOutput {
    Arc::new(OutputHandler::Stdout)
}

pub fn buffer_handler() -> SharedOutput {
    Arc::new(OutputHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedOutput {
    Arc::new(OutputHandler::Silent)
}
