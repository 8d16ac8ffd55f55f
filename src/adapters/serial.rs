//! Serial echo adapter.
//!
//! Implements [`EchoSink`] by writing to stdout (the host stand-in for the
//! UART), optionally keeping a copy for inspection.

use std::io::Write;

use crate::app::ports::EchoSink;

#[derive(Default)]
pub struct SerialEcho {
    quiet: bool,
    captured: String,
}

impl SerialEcho {
    /// Echo to stdout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture only; nothing reaches stdout.
    pub fn capturing() -> Self {
        Self {
            quiet: true,
            captured: String::new(),
        }
    }

    pub fn captured(&self) -> &str {
        &self.captured
    }

    /// Hand back the captured text and start over.
    pub fn take(&mut self) -> String {
        core::mem::take(&mut self.captured)
    }
}

impl EchoSink for SerialEcho {
    fn echo(&mut self, text: &str) {
        self.captured.push_str(text);
        if !self.quiet {
            let mut out = std::io::stdout().lock();
            // Broken pipe is ignored.
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }
}
