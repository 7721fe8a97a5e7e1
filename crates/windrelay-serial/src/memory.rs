//! In-process line sink.
//!
//! Records every line instead of sending it to a device.

use std::sync::Mutex;

use tracing::debug;

use crate::sink::{LineSink, SinkError};

#[derive(Debug, Default)]
struct MemoryState {
    lines: Vec<String>,
    failure: Option<String>,
    open: bool,
    close_calls: usize,
}

/// A sink that keeps written lines in memory.
#[derive(Debug)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

impl MemorySink {
    /// Create an open, empty sink.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                open: true,
                ..Default::default()
            }),
        }
    }

    /// Make every subsequent write fail with `details`.
    pub fn fail_with(&self, details: &str) {
        self.lock().failure = Some(details.to_string());
    }

    /// Let writes succeed again.
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// All lines written so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    /// How many times `close` has been called.
    pub fn close_calls(&self) -> usize {
        self.lock().close_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut state = self.lock();
        if !state.open {
            return Err(SinkError::WriteFailed("serial port is closed".to_string()));
        }
        if let Some(details) = &state.failure {
            return Err(SinkError::WriteFailed(details.clone()));
        }
        debug!("Recorded {:?}", line);
        state.lines.push(line.to_string());
        Ok(())
    }

    fn close(&self) {
        let mut state = self.lock();
        state.open = false;
        state.close_calls += 1;
    }

    fn is_open(&self) -> bool {
        self.lock().open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_lines_in_order() {
        let sink = MemorySink::new();
        sink.write_line("1.0\n").unwrap();
        sink.write_line("2.5\n").unwrap();
        assert_eq!(sink.lines(), vec!["1.0\n", "2.5\n"]);
    }

    #[test]
    fn test_failure_mode() {
        let sink = MemorySink::new();
        sink.fail_with("Input/output error");

        assert_eq!(
            sink.write_line("1.0\n"),
            Err(SinkError::WriteFailed("Input/output error".to_string()))
        );
        assert!(sink.lines().is_empty());

        sink.recover();
        sink.write_line("1.0\n").unwrap();
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_closed_sink_rejects_writes() {
        let sink = MemorySink::new();
        sink.close();
        sink.close();

        assert!(!sink.is_open());
        assert_eq!(sink.close_calls(), 2);
        assert!(sink.write_line("1.0\n").is_err());
    }
}
