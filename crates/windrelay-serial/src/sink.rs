//! Serial device sink.
//!
//! The device is opened once at startup and shared by every request handler.
//! Writes are fire-and-forget: bytes go out on the wire and nothing is read
//! back. A bounded I/O timeout keeps a stuck device from hanging a request.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use thiserror::Error;
use tracing::{debug, info, warn};
use windrelay_core::RelayConfig;

/// Errors produced by a line sink.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SinkError {
    /// The device could not be opened (missing, permission denied, busy).
    #[error("Unable to open serial port {port}: {reason}")]
    PortUnavailable { port: String, reason: String },

    /// A line could not be written.
    #[error("{0}")]
    WriteFailed(String),
}

/// A destination for newline-terminated text lines.
///
/// Implementations must serialize concurrent calls to `write_line` so that
/// each line reaches the device as one contiguous run of bytes.
pub trait LineSink: Send + Sync {
    /// Write one complete line, including its terminator.
    fn write_line(&self, line: &str) -> Result<(), SinkError>;

    /// Release the underlying handle. Calling it again is a no-op.
    fn close(&self);

    /// Whether the sink still accepts writes.
    fn is_open(&self) -> bool;
}

/// Serial line settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PortSettings {
    /// Device path (e.g. /dev/ttyUSB0).
    pub path: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Write timeout.
    pub timeout: Duration,
}

impl PortSettings {
    pub fn new(path: &str, baud_rate: u32) -> Self {
        Self {
            path: path.to_string(),
            baud_rate,
            timeout: Duration::from_secs(1),
        }
    }

    /// Set the I/O timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&RelayConfig> for PortSettings {
    fn from(config: &RelayConfig) -> Self {
        Self::new(&config.serial_port, config.baud_rate).with_timeout(config.io_timeout)
    }
}

/// The single open connection to the serial device.
///
/// The handle sits behind a mutex that is held for the whole
/// write-and-flush of a line. `None` means the sink has been closed.
pub struct SerialSink<W = Box<dyn SerialPort>> {
    name: String,
    port: Mutex<Option<W>>,
}

impl SerialSink {
    /// Open the device 8N1 without flow control.
    pub fn open(settings: &PortSettings) -> Result<Self, SinkError> {
        let port = serialport::new(&settings.path, settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(settings.timeout)
            .open()
            .map_err(|e| SinkError::PortUnavailable {
                port: settings.path.clone(),
                reason: e.to_string(),
            })?;

        info!(
            "Opened serial port {} at {} baud",
            settings.path, settings.baud_rate
        );
        Ok(Self::from_writer(&settings.path, port))
    }
}

impl<W: Write + Send> SerialSink<W> {
    /// Wrap an already open writer.
    pub fn from_writer(name: &str, writer: W) -> Self {
        Self {
            name: name.to_string(),
            port: Mutex::new(Some(writer)),
        }
    }

    /// Device name used in log messages.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send> LineSink for SerialSink<W> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut guard = self
            .port
            .lock()
            .map_err(|_| SinkError::WriteFailed("serial port lock poisoned".to_string()))?;
        let port = guard
            .as_mut()
            .ok_or_else(|| SinkError::WriteFailed("serial port is closed".to_string()))?;

        port.write_all(line.as_bytes())
            .and_then(|_| port.flush())
            .map_err(|e| {
                warn!("Write to {} failed: {}", self.name, e);
                SinkError::WriteFailed(e.to_string())
            })?;

        debug!("Wrote {:?} to {}", line, self.name);
        Ok(())
    }

    fn close(&self) {
        // A poisoned lock still owns the handle; take it anyway.
        let mut guard = match self.port.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.take().is_some() {
            info!("Closed serial port {}", self.name);
        }
    }

    fn is_open(&self) -> bool {
        match self.port.lock() {
            Ok(guard) => guard.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }
}
