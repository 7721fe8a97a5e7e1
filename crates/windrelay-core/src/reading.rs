//! Wind speed readings.
//!
//! A reading is a single wind speed value in km/h submitted by a client. It
//! lives only for the duration of one request: it is coerced out of the JSON
//! payload, formatted for the serial line and then dropped.
//!
//! # Payload
//!
//! ```json
//! { "windSpeedKmh": 12.3 }
//! ```
//!
//! Numeric strings (`"12.3"`, `"1_000"`) and booleans (as 1 or 0) are
//! accepted as well. No range is enforced:
//! negative and extreme values pass through unchanged.
//!
//! # Wire format
//!
//! One reading per line, fixed-point with a single decimal: `12.3\n`.

use serde_json::Value;
use thiserror::Error;

/// Name of the payload field carrying the reading.
pub const WIND_SPEED_FIELD: &str = "windSpeedKmh";

/// Reasons a payload could not be turned into a reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReading {
    /// Body is not valid JSON.
    #[error("Malformed JSON payload: {0}")]
    Malformed(String),

    /// Body is valid JSON but not an object.
    #[error("Payload is not a JSON object")]
    NotAnObject,

    /// The `windSpeedKmh` field is absent.
    #[error("Missing field `{}`", WIND_SPEED_FIELD)]
    MissingField,

    /// The field holds something that cannot be read as a number.
    #[error("Field `{}` is not numeric", WIND_SPEED_FIELD)]
    NotNumeric,

    /// The value parsed but is NaN or infinite.
    #[error("Wind speed is not a finite number")]
    NotFinite,
}

/// A single wind speed measurement in km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading(f64);

impl Reading {
    /// Create a reading, rejecting NaN and infinities.
    pub fn new(kmh: f64) -> Result<Self, InvalidReading> {
        if kmh.is_finite() {
            Ok(Self(kmh))
        } else {
            Err(InvalidReading::NotFinite)
        }
    }

    /// Parse a raw request body.
    ///
    /// An empty body is treated as `{}`, so it fails with `MissingField`.
    pub fn from_payload(body: &[u8]) -> Result<Self, InvalidReading> {
        if body.is_empty() {
            return Err(InvalidReading::MissingField);
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| InvalidReading::Malformed(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Extract the reading from an already parsed JSON document.
    pub fn from_json(value: &Value) -> Result<Self, InvalidReading> {
        let object = value.as_object().ok_or(InvalidReading::NotAnObject)?;
        let field = object
            .get(WIND_SPEED_FIELD)
            .ok_or(InvalidReading::MissingField)?;
        Self::new(coerce_number(field)?)
    }

    /// The value in km/h.
    pub fn kmh(&self) -> f64 {
        self.0
    }

    /// Format the reading as a serial line, e.g. `7.0\n`.
    pub fn to_wire_line(&self) -> String {
        format!("{:.1}\n", self.0)
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} km/h", self.0)
    }
}

/// Numbers pass through, booleans count as 1 or 0, numeric strings are
/// parsed. Everything else fails.
fn coerce_number(value: &Value) -> Result<f64, InvalidReading> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(InvalidReading::NotNumeric),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => strip_digit_separators(s.trim())
            .ok_or(InvalidReading::NotNumeric)?
            .parse::<f64>()
            .map_err(|_| InvalidReading::NotNumeric),
        _ => Err(InvalidReading::NotNumeric),
    }
}

/// Remove `_` separators such as `1_000`.
///
/// Each `_` must sit between two ASCII digits; anything else is rejected.
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c == '_' {
            let before = i > 0 && bytes[i - 1].is_ascii_digit();
            let after = bytes.get(i + 1).map_or(false, |b| b.is_ascii_digit());
            if !(before && after) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}
