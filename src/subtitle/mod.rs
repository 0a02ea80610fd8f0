//! Subtitle module
//!
//! This module handles transcript-to-subtitle conversion:
//! - Typed segment records validated at the boundary
//! - SRT timestamp formatting with millisecond truncation
//! - SRT document generation

pub mod segment;
pub mod srt;

pub use segment::{Segment, SegmentError};
pub use srt::format_segments;
