//! Subtitle segment model
//!
//! Transcript data arrives from the upstream library as loosely typed
//! records. This module turns those records into typed [`Segment`] values
//! and rejects anything that would produce malformed SRT output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Segment validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("Invalid segment #{index}: {reason}")]
    InvalidSegment { index: usize, reason: String },
}

/// One timed unit of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Offset from video start in seconds
    pub start: f64,
    /// Display duration in seconds
    pub duration: f64,
    /// Subtitle payload, passed through verbatim
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }

    /// End time in seconds (`start + duration`)
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Build a segment from an untyped record.
    ///
    /// `index` is the 1-based position of the record in its sequence and is
    /// only used for error reporting.
    pub(super) fn from_record(index: usize, record: &Value) -> Result<Self, SegmentError> {
        let invalid = |reason: String| SegmentError::InvalidSegment { index, reason };

        let fields = record
            .as_object()
            .ok_or_else(|| invalid(format!("expected an object, got {}", kind_of(record))))?;

        let start = seconds_field(fields, "start").map_err(invalid)?;
        let duration = seconds_field(fields, "duration").map_err(invalid)?;
        let text = match fields.get("text") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(invalid(format!(
                    "field `text` must be a string, got {}",
                    kind_of(other)
                )))
            }
            None => return Err(invalid("missing field `text`".to_string())),
        };

        Self::checked(index, start, duration, text)
    }

    /// Build a segment from typed values, rejecting negative or non-finite
    /// times.
    pub fn checked(
        index: usize,
        start: f64,
        duration: f64,
        text: impl Into<String>,
    ) -> Result<Self, SegmentError> {
        for (name, seconds) in [("start", start), ("duration", duration)] {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(SegmentError::InvalidSegment {
                    index,
                    reason: format!(
                        "field `{}` must be a non-negative number, got {}",
                        name, seconds
                    ),
                });
            }
        }

        Ok(Self::new(start, duration, text))
    }
}

/// Validate a whole sequence of records, stopping at the first bad one.
pub(super) fn segments_from_records(records: &[Value]) -> Result<Vec<Segment>, SegmentError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| Segment::from_record(i + 1, record))
        .collect()
}

fn seconds_field(fields: &Map<String, Value>, name: &str) -> Result<f64, String> {
    let value = fields
        .get(name)
        .ok_or_else(|| format!("missing field `{}`", name))?;
    value
        .as_f64()
        .ok_or_else(|| format!("field `{}` must be a number, got {}", name, kind_of(value)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
