//! SubRip (SRT) generation
//!
//! Produces numbered cue blocks of the form
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:02,500
//! Hello
//!
//! ```
//!
//! Milliseconds are truncated, never rounded.

use serde_json::Value;

use super::segment::{segments_from_records, Segment, SegmentError};

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// The hour field is zero-padded to two digits and widens as needed.
/// Negative input is clamped to zero.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);

    let hours = floor_div(seconds, 3600.0) as u64;
    let minutes = floor_div(seconds % 3600.0, 60.0) as u64;
    let remainder = seconds % 60.0;
    let whole_seconds = remainder.trunc() as u64;
    let millis = ((remainder - remainder.trunc()) * 1000.0) as u64;

    format!(
        "{:02}:{:02}:{:02},{:03}",
        hours, minutes, whole_seconds, millis
    )
}

/// Render segments as an SRT document, one block per segment in input order.
pub fn format_segments(segments: &[Segment]) -> String {
    let mut srt = String::new();

    for (i, segment) in segments.iter().enumerate() {
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_time(segment.start),
            format_time(segment.end()),
            segment.text
        ));
    }

    srt
}

/// Validate untyped records and render them. Never returns partial output.
pub(super) fn records_to_srt(records: &[Value]) -> Result<String, SegmentError> {
    let segments = segments_from_records(records)?;
    Ok(format_segments(&segments))
}

/// Floating-point floor division computed from the remainder, so that
/// `floor_div(a, b) * b + a % b == a` holds at exact boundaries.
fn floor_div(a: f64, b: f64) -> f64 {
    let div = (a - a % b) / b;
    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}
