//! # windrelay-serial
//!
//! The serial sink: the one component that owns the outbound device
//! connection.
//!
//! Every writer goes through [`LineSink::write_line`], which serializes
//! access so that lines from concurrent requests never interleave.
//!
//! - [`SerialSink`] - a real device opened through `serialport`
//! - [`MemorySink`] - an in-process sink that records lines

pub mod memory;
pub mod sink;

pub use memory::MemorySink;
pub use sink::{LineSink, PortSettings, SerialSink, SinkError};
